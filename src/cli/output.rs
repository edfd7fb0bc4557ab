use anyhow::Result;

use crate::workflow::PickerOutcome;

/// Print a plain-text representation of the picker contents.
pub(crate) fn print_plain(outcome: &PickerOutcome) {
	if outcome.query.is_empty() {
		println!("Trending ({} items)", outcome.items.len());
	} else {
		println!("Results for '{}' ({} items)", outcome.query, outcome.items.len());
	}

	for item in &outcome.items {
		println!("{}\t{}\t{}", item.id, item.title, item.url);
	}

	if let Some(error) = &outcome.error {
		println!("Last request failed: {error}");
	} else if outcome.exhausted {
		println!("(end of results)");
	}
}

/// Format the picker contents as a JSON string.
pub(crate) fn format_outcome_json(outcome: &PickerOutcome) -> Result<String> {
	Ok(serde_json::to_string_pretty(outcome)?)
}

/// Print the JSON representation of the picker contents.
pub(crate) fn print_json(outcome: &PickerOutcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}
