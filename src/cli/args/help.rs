use std::fmt::Write;

use clap::ValueEnum;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use gifpick::app_dirs;
use gifpick::logging::LOG_ENV;

/// How the loaded items are printed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Header line, then one tab-separated `id title url` row per item.
    Plain,
    /// The feed, query and items as pretty-printed JSON.
    Json,
}

/// Version banner naming where configuration is read from.
pub(super) fn long_version() -> &'static str {
    let config_file = match app_dirs::get_config_dir() {
        Ok(dir) => dir.join("config.toml").display().to_string(),
        Err(err) => format!("unavailable ({err})"),
    };

    let mut banner = format!("gifpick {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(banner);
    let _ = writeln!(banner, "user config: {config_file}");
    let _ = write!(banner, "project config: ./.gifpick.toml, ./gifpick.toml");

    Box::leak(banner.into_boxed_str())
}

/// Environment variables listed after the option help.
pub(super) fn environment_help() -> String {
    [
        ("GIPHY_API_KEY", "API key, overridden by --api-key"),
        ("GIFPICK__<SECTION>__<KEY>", "any config key, e.g. GIFPICK__PAGING__PAGE_SIZE"),
        ("GIFPICK_CONFIG", "extra config files, like --config"),
        (app_dirs::CONFIG_DIR_ENV, "replaces the user config directory"),
        (LOG_ENV, "log filter, e.g. gifpick=debug (default: warn)"),
    ]
    .iter()
    .fold(String::from("Environment:\n"), |mut help, (name, what)| {
        let _ = writeln!(help, "  {name:<28} {what}");
        help
    })
}

pub(super) fn cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().effects(Effects::BOLD | Effects::UNDERLINE))
        .usage(AnsiColor::Magenta.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Blue.on_default().effects(Effects::BOLD))
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default().effects(Effects::BOLD))
}
