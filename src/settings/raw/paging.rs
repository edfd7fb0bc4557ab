use std::time::Duration;

use serde::Deserialize;

use gifpick::debounce::DEFAULT_QUIET_PERIOD;
use gifpick::pagination::DEFAULT_PAGE_SIZE;
use gifpick::session::DEFAULT_SCROLL_THRESHOLD;

use crate::cli::CliArgs;

/// `[paging]` options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct PagingSection {
    pub(super) page_size: Option<usize>,
    pub(super) scroll_threshold: Option<f32>,
}

pub(super) struct PagingSettings {
    pub(super) page_size: usize,
    pub(super) scroll_threshold: f32,
}

impl PagingSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(value) = cli.page_size {
            self.page_size = Some(value);
        }
        if let Some(value) = cli.scroll_threshold {
            self.scroll_threshold = Some(value);
        }
    }

    pub(super) fn resolve(self) -> PagingSettings {
        PagingSettings {
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            scroll_threshold: self.scroll_threshold.unwrap_or(DEFAULT_SCROLL_THRESHOLD),
        }
    }
}

/// `[search]` options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchSection {
    pub(super) debounce_ms: Option<u64>,
}

impl SearchSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(value) = cli.debounce_ms {
            self.debounce_ms = Some(value);
        }
    }

    pub(super) fn resolve(self) -> Duration {
        self.debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_QUIET_PERIOD)
    }
}
