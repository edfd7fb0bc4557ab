use std::time::Duration;

use thiserror::Error;

use gifpick::{GiphyOptions, SessionConfig};

mod sources;
mod summary;
mod validation;

pub(crate) use sources::{ConfigSources, SettingSource};

/// Largest page the trending and search endpoints accept.
pub(crate) const MAX_PAGE_SIZE: usize = 50;

/// A resolved setting that cannot be used.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
	#[error("invalid value for {key} from {origin}: {reason} (value: {value})")]
	OutOfRange {
		key: &'static str,
		value: String,
		origin: SettingSource,
		reason: String,
	},
	#[error("no Giphy API key configured ({origin} is empty); pass --api-key or use --offline")]
	MissingApiKey { origin: SettingSource },
}

impl ConfigError {
	pub(crate) fn out_of_range(
		key: &'static str,
		value: impl ToString,
		origin: SettingSource,
		reason: impl Into<String>,
	) -> Self {
		Self::OutOfRange {
			key,
			value: value.to_string(),
			origin,
			reason: reason.into(),
		}
	}

	/// Configuration key the error refers to.
	pub(crate) fn key(&self) -> &'static str {
		match self {
			Self::OutOfRange { key, .. } => key,
			Self::MissingApiKey { .. } => "api.key",
		}
	}
}

/// Application-ready configuration derived from user input, config files and
/// sensible defaults.
#[derive(Debug)]
pub struct ResolvedConfig {
	pub api_key: Option<String>,
	pub base_url: String,
	pub rating: Option<String>,
	pub timeout: Duration,
	pub page_size: usize,
	pub scroll_threshold: f32,
	pub debounce: Duration,
	pub offline: bool,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
		validation::validate(self, sources)
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		summary::print_summary(self);
	}

	/// Controller settings for a session against the configured source.
	pub fn session_config(&self) -> SessionConfig {
		SessionConfig::new(self.api_key.as_deref().unwrap_or_default())
			.with_page_size(self.page_size)
			.with_quiet_period(self.debounce)
			.with_scroll_threshold(self.scroll_threshold)
	}

	pub fn giphy_options(&self) -> GiphyOptions {
		GiphyOptions {
			base_url: self.base_url.clone(),
			rating: self.rating.clone(),
			timeout: self.timeout,
		}
	}
}
