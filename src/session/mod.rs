//! The search session controller: two paginated feeds, a debounced query and
//! the show/close lifecycle of the picker panel.

mod config;
mod controller;
mod events;
mod runtime;
mod scroll;
mod state;
mod view;

pub use config::SessionConfig;
pub use controller::SearchSessionController;
pub use events::{SessionCommand, SessionEvent};
pub use runtime::FetchRuntime;
pub use scroll::{DEFAULT_SCROLL_THRESHOLD, ScrollTrigger};
pub use view::{ActiveView, FeedView};

pub use crate::systems::fetch::FetchCommand;

#[cfg(test)]
mod tests;
