use std::time::Duration;

use serde::Deserialize;

use gifpick::source::DEFAULT_BASE_URL;

use crate::cli::CliArgs;

use super::non_blank;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// `[api]` options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ApiSection {
    pub(super) key: Option<String>,
    pub(super) base_url: Option<String>,
    pub(super) rating: Option<String>,
    pub(super) timeout_secs: Option<u64>,
}

pub(super) struct ApiSettings {
    pub(super) key: Option<String>,
    pub(super) base_url: String,
    pub(super) rating: Option<String>,
    pub(super) timeout: Duration,
}

impl ApiSection {
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(key) = cli.api_key.clone() {
            self.key = Some(key);
        }
        if let Some(url) = cli.base_url.clone() {
            self.base_url = Some(url);
        }
        if let Some(rating) = cli.rating.clone() {
            self.rating = Some(rating);
        }
        if let Some(value) = cli.timeout_secs {
            self.timeout_secs = Some(value);
        }
    }

    pub(super) fn resolve(self) -> ApiSettings {
        let base_url = non_blank(self.base_url)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        ApiSettings {
            key: non_blank(self.key),
            base_url,
            rating: non_blank(self.rating).map(|rating| rating.to_ascii_lowercase()),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }
}
