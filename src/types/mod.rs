//! Types shared between the pagination core, the fetch worker and the
//! render surface.

mod feed;
mod item;
mod page;
mod query;

pub use feed::FeedKind;
pub use item::{ItemId, Rendition, ResultItem};
pub use page::{FetchToken, Page, PageQuery, PageRequest, PageResponse};
pub use query::Query;
