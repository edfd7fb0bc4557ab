//! Core crate exports for the `gifpick` search controller.
//!
//! The controller pages a trending feed and a search feed from a remote source,
//! debounces the query typed into the picker and keeps responses for stale
//! requests from reaching the screen. Rendering is left to the embedder: it
//! drives a [`SearchSessionController`] and reads an [`ActiveView`] back.

pub mod app_dirs;
pub mod debounce;
pub mod logging;
pub mod pagination;
pub mod session;
pub mod source;
mod systems;
pub mod types;

pub use debounce::Debouncer;
pub use pagination::{PageCursor, PagedFetcher};
pub use session::{
    ActiveView, FeedView, SearchSessionController, SessionCommand, SessionConfig, SessionEvent,
};
pub use source::{FetchError, GiphyOptions, GiphySource, PageSource, StaticSource};
pub use types::{FeedKind, ItemId, Page, PageQuery, Query, ResultItem};
