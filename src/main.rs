mod cli;
mod settings;
mod workflow;

use std::time::Duration;

use anyhow::Result;
use cli::{CliArgs, OutputFormat, parse_cli, print_json, print_plain};
use settings::ResolvedConfig;
use workflow::PickerWorkflow;

fn main() -> Result<()> {
	gifpick::logging::initialize();

	let cli = parse_cli();
	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	run_picker(&cli, resolved)
}

/// Execute the picker workflow and print output in the chosen format.
fn run_picker(cli: &CliArgs, settings: ResolvedConfig) -> Result<()> {
	let workflow = PickerWorkflow::from_config(
		&settings,
		cli.query.clone(),
		cli.pages,
		Duration::from_secs(cli.wait_secs),
	)?;
	let outcome = workflow.run()?;

	match cli.output {
		OutputFormat::Plain => print_plain(&outcome),
		OutputFormat::Json => print_json(&outcome)?,
	}

	Ok(())
}
