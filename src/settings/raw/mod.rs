use anyhow::{Error, Result};
use serde::Deserialize;
use std::env;

use crate::cli::CliArgs;

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource};
use super::sources::api_key_env_var;

mod api;
mod paging;

use api::ApiSection;
use paging::{PagingSection, SearchSection};

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
    api: ApiSection,
    paging: PagingSection,
    search: SearchSection,
}

impl RawConfig {
    /// Apply CLI overrides on top of the raw configuration values.
    pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        self.api.apply_cli_overrides(cli);
        self.paging.apply_cli_overrides(cli);
        self.search.apply_cli_overrides(cli);
    }

    /// Convert the raw configuration into a [`ResolvedConfig`], validating and
    /// filling defaults where required.
    pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
        let sources = ConfigSources {
            api_key: detect_source(
                cli.api_key.is_some(),
                self.api.key.is_some(),
                api_key_env_var(),
                "--api-key",
                "api.key",
            ),
            api_timeout_secs: detect_source(
                cli.timeout_secs.is_some(),
                self.api.timeout_secs.is_some(),
                "GIFPICK__API__TIMEOUT_SECS",
                "--timeout-secs",
                "api.timeout_secs",
            ),
            paging_page_size: detect_source(
                cli.page_size.is_some(),
                self.paging.page_size.is_some(),
                "GIFPICK__PAGING__PAGE_SIZE",
                "--page-size",
                "paging.page_size",
            ),
            paging_scroll_threshold: detect_source(
                cli.scroll_threshold.is_some(),
                self.paging.scroll_threshold.is_some(),
                "GIFPICK__PAGING__SCROLL_THRESHOLD",
                "--threshold",
                "paging.scroll_threshold",
            ),
        };

        let api = self.api.resolve();
        let paging = self.paging.resolve();

        let config = ResolvedConfig {
            api_key: api.key,
            base_url: api.base_url,
            rating: api.rating,
            timeout: api.timeout,
            page_size: paging.page_size,
            scroll_threshold: paging.scroll_threshold,
            debounce: self.search.resolve(),
            offline: cli.offline,
        };

        config.validate(&sources).map_err(Error::new)?;

        Ok(config)
    }
}

fn detect_source(
    cli_present: bool,
    value_present: bool,
    env_var: &'static str,
    cli_flag: &'static str,
    key: &'static str,
) -> Option<SettingSource> {
    if !value_present {
        return None;
    }

    if cli_present {
        return Some(SettingSource::CliFlag(cli_flag));
    }

    if env::var_os(env_var).is_some() {
        return Some(SettingSource::Environment(env_var));
    }

    Some(SettingSource::ConfigKey(key))
}

/// Trim a user supplied string, treating blank values as unset.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
