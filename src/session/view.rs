use crate::pagination::PagedFetcher;
use crate::source::FetchError;
use crate::types::{FeedKind, Query, ResultItem};

/// Read-only snapshot of one feed for the render layer.
#[derive(Debug, Clone, Copy)]
pub struct FeedView<'a> {
    pub feed: FeedKind,
    pub items: &'a [ResultItem],
    pub is_loading: bool,
    pub exhausted: bool,
    /// Failure of the latest request, cleared when the next one starts.
    pub error: Option<&'a FetchError>,
}

impl<'a> FeedView<'a> {
    pub(crate) fn of(fetcher: &'a PagedFetcher) -> Self {
        let cursor = fetcher.cursor();
        Self {
            feed: fetcher.feed(),
            items: cursor.items(),
            is_loading: cursor.is_loading(),
            exhausted: cursor.is_exhausted(),
            error: cursor.last_error(),
        }
    }
}

/// The feed currently on screen.
#[derive(Debug, Clone, Copy)]
pub enum ActiveView<'a> {
    /// The query is empty, so trending items are shown.
    Trending(FeedView<'a>),
    /// Results for a committed query.
    Search { query: &'a Query, feed: FeedView<'a> },
}

impl<'a> ActiveView<'a> {
    pub fn feed(&self) -> &FeedView<'a> {
        match self {
            ActiveView::Trending(feed) | ActiveView::Search { feed, .. } => feed,
        }
    }

    pub fn items(&self) -> &'a [ResultItem] {
        self.feed().items
    }

    pub fn kind(&self) -> FeedKind {
        self.feed().feed
    }
}
