use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::help::{OutputFormat, cli_styles, environment_help, long_version};

/// Command-line arguments accepted by the `gifpick` binary.
#[derive(Parser, Debug)]
#[command(
    name = "gifpick",
    version,
    long_version = long_version(),
    about = "Browse trending GIFs or search for one, a page at a time",
    after_help = environment_help(),
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "GIFPICK_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'k',
        long = "api-key",
        value_name = "KEY",
        help = "Giphy API key (default: GIPHY_API_KEY or api.key from configuration)"
    )]
    pub(crate) api_key: Option<String>,
    #[arg(
        long = "base-url",
        value_name = "URL",
        help = "Override the API base URL (default: https://api.giphy.com)"
    )]
    pub(crate) base_url: Option<String>,
    #[arg(
        long,
        value_name = "RATING",
        help = "Content rating passed to the API, e.g. g or pg-13 (default: none)"
    )]
    pub(crate) rating: Option<String>,
    #[arg(
        long = "timeout-secs",
        value_name = "SECS",
        help = "Request timeout in seconds (default: 10)"
    )]
    pub(crate) timeout_secs: Option<u64>,
    #[arg(
        short = 's',
        long = "page-size",
        value_name = "NUM",
        help = "Items requested per page, at most 50 (default: 25)"
    )]
    pub(crate) page_size: Option<usize>,
    #[arg(
        short = 't',
        long = "threshold",
        value_name = "FRACTION",
        help = "Fraction of the list scrolled before the next page loads (default: 0.9)"
    )]
    pub(crate) scroll_threshold: Option<f32>,
    #[arg(
        short = 'd',
        long = "debounce-ms",
        value_name = "MS",
        help = "Quiet period before a typed query is searched (default: 1000)"
    )]
    pub(crate) debounce_ms: Option<u64>,
    #[arg(
        short = 'q',
        long,
        value_name = "QUERY",
        help = "Text to type into the picker (default: browse trending)"
    )]
    pub(crate) query: Option<String>,
    #[arg(
        long,
        value_name = "NUM",
        default_value_t = 1,
        help = "Number of pages to load before printing"
    )]
    pub(crate) pages: usize,
    #[arg(
        long = "wait-secs",
        value_name = "SECS",
        default_value_t = 30,
        help = "Give up waiting for pages after this many seconds"
    )]
    pub(crate) wait_secs: u64,
    #[arg(
        long,
        help = "Serve built-in sample data instead of calling the API (default: disabled)"
    )]
    pub(crate) offline: bool,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Choose how to print the result"
    )]
    pub(crate) output: OutputFormat,
}
