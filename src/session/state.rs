use crate::debounce::Debouncer;
use crate::pagination::PagedFetcher;
use crate::types::{FeedKind, Query};

use super::SessionConfig;

/// Everything that lives exactly as long as the panel is open.
///
/// A new session is built on every show and dropped on close; nothing in it
/// is ever reused across opens.
#[derive(Debug)]
pub(crate) struct SearchSession {
    trending: PagedFetcher,
    search: PagedFetcher,
    pub(crate) raw_text: String,
    pub(crate) query: Query,
    pub(crate) debouncer: Debouncer<Query>,
}

impl SearchSession {
    pub(crate) fn new(config: &SessionConfig) -> Self {
        Self {
            trending: PagedFetcher::new(FeedKind::Trending, config.page_size),
            search: PagedFetcher::new(FeedKind::Search, config.page_size),
            raw_text: String::new(),
            query: Query::empty(),
            debouncer: Debouncer::new(Query::empty(), config.quiet_period),
        }
    }

    /// Search while a query is committed, trending otherwise.
    pub(crate) fn active_kind(&self) -> FeedKind {
        if self.query.is_empty() {
            FeedKind::Trending
        } else {
            FeedKind::Search
        }
    }

    pub(crate) fn fetcher(&self, feed: FeedKind) -> &PagedFetcher {
        match feed {
            FeedKind::Trending => &self.trending,
            FeedKind::Search => &self.search,
        }
    }

    pub(crate) fn fetcher_mut(&mut self, feed: FeedKind) -> &mut PagedFetcher {
        match feed {
            FeedKind::Trending => &mut self.trending,
            FeedKind::Search => &mut self.search,
        }
    }
}
