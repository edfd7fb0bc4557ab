use std::collections::HashSet;

use crate::source::FetchError;
use crate::types::{FetchToken, ItemId, ResultItem};

/// Observable state of a [`PageCursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// No request outstanding and more pages may exist.
    Idle,
    /// Exactly one request is outstanding.
    Loading,
    /// The source reported its last page; no further request is issued.
    Exhausted,
}

/// Bookmark of how far one source has been paged and what has arrived so far.
///
/// `in_flight` is `Some` exactly while one request is outstanding, and only a
/// response carrying that token may change the cursor.
#[derive(Debug, Default)]
pub struct PageCursor {
    offset: usize,
    exhausted: bool,
    in_flight: Option<FetchToken>,
    accumulated: Vec<ResultItem>,
    seen: HashSet<ItemId>,
    last_error: Option<FetchError>,
}

impl PageCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CursorState {
        if self.in_flight.is_some() {
            CursorState::Loading
        } else if self.exhausted {
            CursorState::Exhausted
        } else {
            CursorState::Idle
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn in_flight(&self) -> Option<FetchToken> {
        self.in_flight
    }

    pub fn items(&self) -> &[ResultItem] {
        &self.accumulated
    }

    /// The failure of the most recent request, kept until the next one starts.
    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// Whether a response tagged with `token` is the one this cursor awaits.
    pub fn is_live(&self, token: FetchToken) -> bool {
        self.in_flight == Some(token)
    }

    /// Whether a new request may be issued right now.
    pub fn can_fetch(&self) -> bool {
        self.state() == CursorState::Idle
    }

    /// Enter `Loading` with `token` as the live request.
    ///
    /// Returns `false` and leaves the cursor untouched if it is loading or
    /// exhausted.
    pub(crate) fn begin(&mut self, token: FetchToken) -> bool {
        if !self.can_fetch() {
            return false;
        }
        self.in_flight = Some(token);
        self.last_error = None;
        true
    }

    /// Apply a successful page for the live request and return how many new
    /// items were kept.
    ///
    /// `returned` is what the source sent, duplicates included; it is what the
    /// offset advances by, so the next request continues where the source
    /// left off even when some items were already known.
    pub(crate) fn complete(
        &mut self,
        items: Vec<ResultItem>,
        has_more: bool,
        page_size: usize,
        replace: bool,
    ) -> usize {
        let returned = items.len();
        if replace {
            self.accumulated.clear();
            self.seen.clear();
        }

        let before = self.accumulated.len();
        for item in items {
            if self.seen.insert(item.id.clone()) {
                self.accumulated.push(item);
            }
        }

        self.offset += returned;
        self.exhausted = returned < page_size || !has_more;
        self.in_flight = None;
        self.accumulated.len() - before
    }

    /// Record a failed request. Offset and exhaustion are left alone so the
    /// next request retries the same page.
    pub(crate) fn fail(&mut self, error: FetchError) {
        self.in_flight = None;
        self.last_error = Some(error);
    }

    /// Forget everything and invalidate any outstanding request.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.exhausted = false;
        self.in_flight = None;
        self.accumulated.clear();
        self.seen.clear();
        self.last_error = None;
    }
}
