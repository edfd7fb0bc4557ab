use std::fmt;
use std::sync::Arc;

use super::{FeedKind, ResultItem};
use crate::source::FetchError;

/// Opaque marker tying a response to the request that produced it.
///
/// Tokens are minted by [`TokenMint`](crate::pagination::TokenMint) and are
/// never reused, so a response can only ever match the request it answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchToken(u64);

impl FetchToken {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FetchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arguments handed to a [`PageSource`](crate::source::PageSource).
#[derive(Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub feed: FeedKind,
    /// Search text; empty for the trending feed.
    pub text: String,
    pub offset: usize,
    pub limit: usize,
    pub api_key: Arc<str>,
}

impl fmt::Debug for PageQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageQuery")
            .field("feed", &self.feed)
            .field("text", &self.text)
            .field("offset", &self.offset)
            .field("limit", &self.limit)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// One page of results as returned by a source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<ResultItem>,
    pub has_more: bool,
}

impl Page {
    #[must_use]
    pub fn new(items: Vec<ResultItem>, has_more: bool) -> Self {
        Self { items, has_more }
    }
}

/// A request issued by a fetcher, ready to be dispatched to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub token: FetchToken,
    pub query: PageQuery,
}

impl PageRequest {
    /// Pair this request with the outcome of running it.
    #[must_use]
    pub fn respond(&self, result: Result<Page, FetchError>) -> PageResponse {
        PageResponse {
            token: self.token,
            feed: self.query.feed,
            offset: self.query.offset,
            result,
        }
    }
}

/// The outcome of a [`PageRequest`], carrying the token it was issued with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    pub token: FetchToken,
    pub feed: FeedKind,
    pub offset: usize,
    pub result: Result<Page, FetchError>,
}
