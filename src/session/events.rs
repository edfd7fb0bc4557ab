use std::ops::Range;

use crate::source::FetchError;
use crate::types::{FeedKind, Query, ResultItem};

/// Messages the render layer sends to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Open the panel and start a fresh session.
    Show,
    /// Close the panel and discard the session.
    Close,
    /// The search box text changed.
    QueryChanged(String),
    /// Load the next page of whichever feed is on screen.
    FetchMore,
    /// Clear one feed back to its initial state.
    ResetValues(FeedKind),
    /// The render surface now shows this range of the active feed.
    Viewport(Range<usize>),
    /// The user picked the item at this index of the active feed.
    Select(usize),
}

/// Notifications sent to subscribers whenever observable state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Shown,
    Closed,
    /// The debounced query changed.
    QueryCommitted(Query),
    FetchStarted { feed: FeedKind, offset: usize },
    PageLoaded {
        feed: FeedKind,
        added: usize,
        exhausted: bool,
    },
    FetchFailed { feed: FeedKind, error: FetchError },
    /// A feed was cleared back to its initial state.
    Reset { feed: FeedKind },
    /// An item was picked; the panel closes right after.
    Selected(ResultItem),
}
