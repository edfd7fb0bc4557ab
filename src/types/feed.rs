use std::fmt;

use serde::Serialize;

/// Identifies one of the two independently paginated result streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    /// Query-independent feed shown while the search box is empty.
    Trending,
    /// Results for the current debounced query.
    Search,
}

impl FeedKind {
    /// Return the lowercase label used in logs and plain output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FeedKind::Trending => "trending",
            FeedKind::Search => "search",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
