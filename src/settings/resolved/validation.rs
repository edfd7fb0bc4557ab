use super::{ConfigError, ConfigSources, MAX_PAGE_SIZE, ResolvedConfig};

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), ConfigError> {
	if config.page_size == 0 || config.page_size > MAX_PAGE_SIZE {
		return Err(ConfigError::out_of_range(
			"paging.page_size",
			config.page_size,
			sources.source_for_page_size(),
			format!("must be between 1 and {MAX_PAGE_SIZE}"),
		));
	}

	let threshold = config.scroll_threshold;
	if !(threshold > 0.0 && threshold <= 1.0) {
		return Err(ConfigError::out_of_range(
			"paging.scroll_threshold",
			threshold,
			sources.source_for_scroll_threshold(),
			"must be greater than 0 and at most 1",
		));
	}

	if config.timeout.is_zero() {
		return Err(ConfigError::out_of_range(
			"api.timeout_secs",
			0,
			sources.source_for_timeout(),
			"must be greater than zero",
		));
	}

	if !config.offline && config.api_key.is_none() {
		return Err(ConfigError::MissingApiKey {
			origin: sources.source_for_api_key(),
		});
	}

	Ok(())
}
