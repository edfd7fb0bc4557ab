use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	println!("Effective configuration:");
	println!(
		"  Source: {}",
		if config.offline {
			"built-in sample data"
		} else {
			config.base_url.as_str()
		}
	);
	println!(
		"  API key: {}",
		if config.api_key.is_some() {
			"(set)"
		} else {
			"(not set)"
		}
	);
	println!(
		"  Rating: {}",
		config.rating.as_deref().unwrap_or("(API default)")
	);
	println!("  Timeout: {}s", config.timeout.as_secs());
	println!("  Page size: {}", config.page_size);
	println!("  Scroll threshold: {}", config.scroll_threshold);
	println!("  Debounce: {}ms", config.debounce.as_millis());
}
