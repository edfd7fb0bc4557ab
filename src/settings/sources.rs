//! Where configuration values come from, lowest precedence first:
//! default files, `--config` files, `GIFPICK__SECTION__KEY` variables and
//! finally `GIPHY_API_KEY`. CLI flags are applied on top by the caller.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File};

use crate::cli::CliArgs;
use gifpick::app_dirs;

/// Prefix of the sectioned variables, e.g. `GIFPICK__PAGING__PAGE_SIZE`.
const ENV_PREFIX: &str = "GIFPICK";
const ENV_SEPARATOR: &str = "__";

/// The key name Giphy's own tooling and docs use.
pub(super) const GIPHY_KEY_ENV: &str = "GIPHY_API_KEY";
pub(super) const SECTIONED_KEY_ENV: &str = "GIFPICK__API__KEY";

/// Merge every configuration layer into a single [`Config`].
pub(super) fn build_config(cli: &CliArgs) -> Result<Config> {
    let mut builder = Config::builder();

    for (path, required) in config_files(cli) {
        builder = builder.add_source(File::from(path).required(required));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    builder = builder
        .set_override_option("api.key", giphy_key_from_env())
        .with_context(|| format!("failed to apply {GIPHY_KEY_ENV}"))?;

    builder.build().context("failed to read configuration")
}

/// Files to merge in order, each paired with whether it must exist.
///
/// Default locations are optional and skipped entirely with `--no-config`;
/// files named with `--config` are required.
fn config_files(cli: &CliArgs) -> Vec<(PathBuf, bool)> {
    let defaults = if cli.no_config {
        Vec::new()
    } else {
        default_config_files()
    };

    defaults
        .into_iter()
        .map(|path| (path, false))
        .chain(cli.config.iter().cloned().map(|path| (path, true)))
        .collect()
}

/// `config.toml` in the user config directory, then the per-project files in
/// the working directory.
pub(super) fn default_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(dir) = app_dirs::get_config_dir() {
        files.push(dir.join("config.toml"));
    }

    if let Ok(current_dir) = env::current_dir() {
        files.push(current_dir.join(".gifpick.toml"));
        files.push(current_dir.join("gifpick.toml"));
    }

    files
}

fn giphy_key_from_env() -> Option<String> {
    env::var(GIPHY_KEY_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// The variable an environment-supplied API key was read from.
pub(super) fn api_key_env_var() -> &'static str {
    if giphy_key_from_env().is_some() {
        GIPHY_KEY_ENV
    } else {
        SECTIONED_KEY_ENV
    }
}
