//! Console logging for the binary. Library code only uses the `log` macros.

use log::LevelFilter;

/// Environment variable holding an `env_logger` filter that overrides the
/// verbosity flags.
pub const LOG_ENV: &str = "DRAWGRAPH_LOG";

/// Map `-v`/`-q` counts onto a level; warnings are shown by default.
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
	if quiet {
		return LevelFilter::Error;
	}
	match verbose {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	}
}

/// Install the global logger. Calling it twice is harmless.
pub fn initialize(level: LevelFilter) {
	let _ = env_logger::Builder::new()
		.filter_level(level)
		.parse_env(LOG_ENV)
		.format_timestamp(None)
		.format_target(false)
		.try_init();
}
