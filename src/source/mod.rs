//! Page sources: the raw clients the fetch worker calls on behalf of a
//! cursor.

mod error;
mod giphy;
mod memory;

pub use error::FetchError;
pub use giphy::{DEFAULT_BASE_URL, GiphyOptions, GiphySource};
pub use memory::StaticSource;

use crate::types::{Page, PageQuery};

/// A remote (or in-memory) feed that can serve one page at a time.
///
/// Implementations are called from the fetch worker's threads and must not
/// hold any controller state; everything they need arrives in the
/// [`PageQuery`].
pub trait PageSource: Send + Sync {
    fn fetch(&self, query: &PageQuery) -> Result<Page, FetchError>;
}
