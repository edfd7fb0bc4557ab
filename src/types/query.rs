use std::fmt;

/// Committed search text.
///
/// Surrounding whitespace is dropped on construction, so a blank text is the
/// empty query, which stands for "no search, show trending".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self(text.trim().to_string())
    }

    /// The empty query.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
