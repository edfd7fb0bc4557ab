//! Diagnostic logging for the controller and the `gifpick` binary.
//!
//! Library code only emits `tracing` events. Installing a subscriber is left to
//! the binary (or an embedder that already has one).

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `GIFPICK_LOG=gifpick=debug`.
pub const LOG_ENV: &str = "GIFPICK_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install a stderr subscriber filtered by [`LOG_ENV`].
///
/// Calling this more than once, or after another subscriber was installed, is
/// harmless: the first subscriber stays in place.
pub fn initialize() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
