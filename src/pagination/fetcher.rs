use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::{PageCursor, TokenMint};
use crate::source::FetchError;
use crate::types::{FeedKind, PageQuery, PageRequest, PageResponse, Query, ResultItem};

/// What applying a response did to the fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The response did not carry the live token and was dropped.
    Stale,
    /// A page arrived; `added` counts the items that were not already known.
    Loaded { added: usize, exhausted: bool },
    /// The request failed; the cursor is idle again and may be retried.
    Failed(FetchError),
}

/// Loads one source page by page on top of a [`PageCursor`].
#[derive(Debug)]
pub struct PagedFetcher {
    feed: FeedKind,
    page_size: usize,
    cursor: PageCursor,
}

impl PagedFetcher {
    pub fn new(feed: FeedKind, page_size: usize) -> Self {
        Self {
            feed,
            page_size: page_size.max(1),
            cursor: PageCursor::new(),
        }
    }

    pub fn feed(&self) -> FeedKind {
        self.feed
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn items(&self) -> &[ResultItem] {
        self.cursor.items()
    }

    pub fn is_loading(&self) -> bool {
        self.cursor.is_loading()
    }

    /// Issue a request for the next page, unless one is already outstanding,
    /// the source is exhausted, or there is nothing to search for.
    ///
    /// The offset only moves once the page has arrived.
    pub fn fetch_next(
        &mut self,
        query: &Query,
        api_key: &Arc<str>,
        mint: &mut TokenMint,
    ) -> Option<PageRequest> {
        if self.feed == FeedKind::Search && query.is_empty() {
            trace!(feed = %self.feed, "no query to search for");
            return None;
        }
        if !self.cursor.can_fetch() {
            trace!(feed = %self.feed, state = ?self.cursor.state(), "fetch skipped");
            return None;
        }

        let token = mint.mint();
        self.cursor.begin(token);
        let text = match self.feed {
            FeedKind::Trending => String::new(),
            FeedKind::Search => query.as_str().to_string(),
        };
        debug!(feed = %self.feed, %token, offset = self.cursor.offset(), "fetch issued");

        Some(PageRequest {
            token,
            query: PageQuery {
                feed: self.feed,
                text,
                offset: self.cursor.offset(),
                limit: self.page_size,
                api_key: Arc::clone(api_key),
            },
        })
    }

    /// Fold a response into the cursor if it answers the live request.
    pub fn apply(&mut self, response: PageResponse) -> ApplyOutcome {
        if response.feed != self.feed || !self.cursor.is_live(response.token) {
            debug!(feed = %self.feed, token = %response.token, "stale response dropped");
            return ApplyOutcome::Stale;
        }

        match response.result {
            Ok(page) => {
                let returned = page.items.len();
                let added = self.cursor.complete(
                    page.items,
                    page.has_more,
                    self.page_size,
                    response.offset == 0,
                );
                let exhausted = self.cursor.is_exhausted();
                debug!(
                    feed = %self.feed,
                    returned,
                    added,
                    exhausted,
                    offset = self.cursor.offset(),
                    "page applied"
                );
                ApplyOutcome::Loaded { added, exhausted }
            }
            Err(error) => {
                warn!(feed = %self.feed, kind = error.kind(), %error, "fetch failed");
                self.cursor.fail(error.clone());
                ApplyOutcome::Failed(error)
            }
        }
    }

    /// Drop accumulated items and invalidate any outstanding request.
    pub fn reset(&mut self) {
        if let Some(token) = self.cursor.in_flight() {
            debug!(feed = %self.feed, %token, "outstanding request invalidated");
        }
        self.cursor.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::CursorState;
    use crate::types::Page;

    fn key() -> Arc<str> {
        Arc::from("key")
    }

    fn items(range: std::ops::Range<usize>) -> Vec<ResultItem> {
        range
            .map(|index| ResultItem::new(format!("id-{index}"), "", ""))
            .collect()
    }

    fn issue(fetcher: &mut PagedFetcher, mint: &mut TokenMint) -> PageRequest {
        fetcher
            .fetch_next(&Query::new("cat"), &key(), mint)
            .expect("request issued")
    }

    #[test]
    fn requests_use_the_current_offset_and_page_size() {
        let mut mint = TokenMint::new();
        let mut fetcher = PagedFetcher::new(FeedKind::Search, 25);
        let request = issue(&mut fetcher, &mut mint);

        assert_eq!(request.query.offset, 0);
        assert_eq!(request.query.limit, 25);
        assert_eq!(request.query.text, "cat");
        assert_eq!(fetcher.cursor().offset(), 0);
        assert_eq!(fetcher.cursor().state(), CursorState::Loading);
    }

    #[test]
    fn fetch_while_loading_changes_nothing() {
        let mut mint = TokenMint::new();
        let mut fetcher = PagedFetcher::new(FeedKind::Trending, 25);
        let request = issue(&mut fetcher, &mut mint);

        assert!(fetcher.fetch_next(&Query::empty(), &key(), &mut mint).is_none());
        assert_eq!(fetcher.cursor().in_flight(), Some(request.token));
        assert_eq!(fetcher.cursor().offset(), 0);
        assert!(fetcher.items().is_empty());
    }

    #[test]
    fn search_without_query_is_not_issued() {
        let mut mint = TokenMint::new();
        let mut fetcher = PagedFetcher::new(FeedKind::Search, 25);
        assert!(fetcher.fetch_next(&Query::new("  "), &key(), &mut mint).is_none());
        assert_eq!(fetcher.cursor().state(), CursorState::Idle);
    }

    #[test]
    fn trending_requests_carry_no_text() {
        let mut mint = TokenMint::new();
        let mut fetcher = PagedFetcher::new(FeedKind::Trending, 25);
        let request = issue(&mut fetcher, &mut mint);
        assert!(request.query.text.is_empty());
    }

    #[test]
    fn pages_advance_the_offset_after_arrival() {
        let mut mint = TokenMint::new();
        let mut fetcher = PagedFetcher::new(FeedKind::Trending, 25);

        let first = issue(&mut fetcher, &mut mint);
        let outcome = fetcher.apply(first.respond(Ok(Page::new(items(0..25), true))));
        assert_eq!(
            outcome,
            ApplyOutcome::Loaded {
                added: 25,
                exhausted: false
            }
        );

        let second = issue(&mut fetcher, &mut mint);
        assert_eq!(second.query.offset, 25);
        fetcher.apply(second.respond(Ok(Page::new(items(25..40), true))));
        assert_eq!(fetcher.items().len(), 40);
        assert_eq!(fetcher.cursor().state(), CursorState::Exhausted);
        assert!(fetcher.fetch_next(&Query::empty(), &key(), &mut mint).is_none());
    }

    #[test]
    fn server_reporting_no_more_exhausts_a_full_page() {
        let mut mint = TokenMint::new();
        let mut fetcher = PagedFetcher::new(FeedKind::Trending, 5);
        let request = issue(&mut fetcher, &mut mint);
        fetcher.apply(request.respond(Ok(Page::new(items(0..5), false))));
        assert!(fetcher.cursor().is_exhausted());
    }

    #[test]
    fn overlapping_pages_are_deduplicated() {
        let mut mint = TokenMint::new();
        let mut fetcher = PagedFetcher::new(FeedKind::Trending, 3);

        let first = issue(&mut fetcher, &mut mint);
        fetcher.apply(first.respond(Ok(Page::new(items(0..3), true))));
        let second = issue(&mut fetcher, &mut mint);
        let outcome = fetcher.apply(second.respond(Ok(Page::new(items(2..5), true))));

        assert_eq!(
            outcome,
            ApplyOutcome::Loaded {
                added: 2,
                exhausted: false
            }
        );
        let ids: Vec<&str> = fetcher.items().iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["id-0", "id-1", "id-2", "id-3", "id-4"]);
    }

    #[test]
    fn response_after_reset_is_stale() {
        let mut mint = TokenMint::new();
        let mut fetcher = PagedFetcher::new(FeedKind::Search, 25);
        let request = issue(&mut fetcher, &mut mint);

        fetcher.reset();
        let outcome = fetcher.apply(request.respond(Ok(Page::new(items(0..25), true))));

        assert_eq!(outcome, ApplyOutcome::Stale);
        assert!(fetcher.items().is_empty());
        assert_eq!(fetcher.cursor().offset(), 0);
        assert_eq!(fetcher.cursor().state(), CursorState::Idle);
    }

    #[test]
    fn failure_allows_retry_at_the_same_offset() {
        let mut mint = TokenMint::new();
        let mut fetcher = PagedFetcher::new(FeedKind::Trending, 25);
        let first = issue(&mut fetcher, &mut mint);
        fetcher.apply(first.respond(Ok(Page::new(items(0..25), true))));

        let second = issue(&mut fetcher, &mut mint);
        let outcome = fetcher.apply(second.respond(Err(FetchError::server(503, "unavailable"))));
        assert!(matches!(outcome, ApplyOutcome::Failed(FetchError::Server { status: 503, .. })));
        assert_eq!(fetcher.cursor().state(), CursorState::Idle);
        assert!(!fetcher.cursor().is_exhausted());
        assert_eq!(fetcher.items().len(), 25);

        let retry = issue(&mut fetcher, &mut mint);
        assert_eq!(retry.query.offset, 25);
        assert_ne!(retry.token, second.token);
    }

    #[test]
    fn responses_for_another_feed_are_ignored() {
        let mut mint = TokenMint::new();
        let mut trending = PagedFetcher::new(FeedKind::Trending, 25);
        let mut search = PagedFetcher::new(FeedKind::Search, 25);
        let request = issue(&mut trending, &mut mint);

        let outcome = search.apply(request.respond(Ok(Page::new(items(0..3), true))));
        assert_eq!(outcome, ApplyOutcome::Stale);
        assert!(trending.is_loading());
    }
}
