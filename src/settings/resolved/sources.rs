use std::fmt;

#[derive(Debug, Clone)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) api_key: Option<SettingSource>,
	pub(crate) api_timeout_secs: Option<SettingSource>,
	pub(crate) paging_page_size: Option<SettingSource>,
	pub(crate) paging_scroll_threshold: Option<SettingSource>,
}

impl ConfigSources {
	pub(crate) fn source_for_api_key(&self) -> SettingSource {
		self.api_key
			.clone()
			.unwrap_or(SettingSource::ConfigKey("api.key"))
	}

	pub(crate) fn source_for_timeout(&self) -> SettingSource {
		self.api_timeout_secs
			.clone()
			.unwrap_or(SettingSource::ConfigKey("api.timeout_secs"))
	}

	pub(crate) fn source_for_page_size(&self) -> SettingSource {
		self.paging_page_size
			.clone()
			.unwrap_or(SettingSource::ConfigKey("paging.page_size"))
	}

	pub(crate) fn source_for_scroll_threshold(&self) -> SettingSource {
		self.paging_scroll_threshold
			.clone()
			.unwrap_or(SettingSource::ConfigKey("paging.scroll_threshold"))
	}
}
