mod definitions;
mod help;

use clap::Parser;
pub(crate) use definitions::CliArgs;
pub(crate) use help::OutputFormat;

/// Parse command line arguments into [`CliArgs`].
pub(crate) fn parse_cli() -> CliArgs {
	CliArgs::parse()
}
