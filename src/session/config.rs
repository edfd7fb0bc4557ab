use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::scroll::DEFAULT_SCROLL_THRESHOLD;
use crate::debounce::DEFAULT_QUIET_PERIOD;
use crate::pagination::DEFAULT_PAGE_SIZE;

/// Externally supplied knobs for a [`SearchSessionController`](super::SearchSessionController).
#[derive(Clone)]
pub struct SessionConfig {
    /// Passed through to the page source untouched.
    pub api_key: Arc<str>,
    pub page_size: usize,
    /// How long the query text must stay unchanged before it is searched.
    pub quiet_period: Duration,
    /// Fraction of the visible range that, when left below the viewport,
    /// triggers loading the next page.
    pub scroll_threshold: f32,
}

impl SessionConfig {
    #[must_use]
    pub fn new(api_key: impl Into<Arc<str>>) -> Self {
        Self {
            api_key: api_key.into(),
            page_size: DEFAULT_PAGE_SIZE,
            quiet_period: DEFAULT_QUIET_PERIOD,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    #[must_use]
    pub fn with_scroll_threshold(mut self, threshold: f32) -> Self {
        self.scroll_threshold = threshold;
        self
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("api_key", &"<redacted>")
            .field("page_size", &self.page_size)
            .field("quiet_period", &self.quiet_period)
            .field("scroll_threshold", &self.scroll_threshold)
            .finish()
    }
}
