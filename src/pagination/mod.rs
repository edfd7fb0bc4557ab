//! Per-source pagination: a [`PageCursor`] state machine and the
//! [`PagedFetcher`] that issues requests against it.

mod cursor;
mod fetcher;

pub use cursor::{CursorState, PageCursor};
pub use fetcher::{ApplyOutcome, PagedFetcher};

use crate::types::FetchToken;

/// Default number of items requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Hands out fetch tokens that are never repeated for the mint's lifetime.
///
/// The controller keeps one mint across sessions, so a token issued before a
/// reset or a close can never match a request issued after it.
#[derive(Debug, Default)]
pub struct TokenMint {
    last: u64,
}

impl TokenMint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mint(&mut self) -> FetchToken {
        self.last = self.last.wrapping_add(1);
        FetchToken::from_raw(self.last)
    }
}
