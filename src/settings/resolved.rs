use std::path::PathBuf;

use drawgraph::{DrawTarget, StyleOption, Viewer};
use thiserror::Error;

use super::sources::SettingSource;

pub(super) const DEFAULT_SOURCE: &str = "graph.json";
pub(super) const DEFAULT_DESTINATION: &str = "app/input.json";
pub(super) const DEFAULT_VIEWER: &str = "app/index.html";

#[derive(Debug, Error)]
#[error("invalid value for {key} from {origin}: {reason} (value: {value})")]
pub(crate) struct ConfigError {
	pub(crate) key: &'static str,
	pub(crate) value: String,
	pub(crate) origin: SettingSource,
	pub(crate) reason: String,
}

impl ConfigError {
	pub(crate) fn invalid<V, R>(key: &'static str, value: V, origin: SettingSource, reason: R) -> Self
	where
		V: Into<String>,
		R: Into<String>,
	{
		Self {
			key,
			value: value.into(),
			origin,
			reason: reason.into(),
		}
	}
}

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedConfig {
	pub(crate) source: PathBuf,
	pub(crate) destination: PathBuf,
	pub(crate) viewer: PathBuf,
	pub(crate) default_style: StyleOption,
	pub(crate) open_viewer: bool,
	pub(crate) viewer_command: Option<Vec<String>>,
}

impl ResolvedConfig {
	/// The files and viewer a draw request works on.
	pub(crate) fn draw_target(&self) -> DrawTarget {
		let mut viewer = Viewer::new(&self.viewer);
		if let Some((program, args)) = self
			.viewer_command
			.as_deref()
			.and_then(|command| command.split_first())
		{
			viewer = viewer.with_command(program, args);
		}

		DrawTarget::new(&self.source, &self.destination, viewer).with_open_viewer(self.open_viewer)
	}

	/// Print a human readable summary of the effective configuration.
	pub(crate) fn print_summary(&self) {
		println!("{}", self.summary());
	}

	fn summary(&self) -> String {
		let launcher = match &self.viewer_command {
			Some(command) => command.join(" "),
			None => "(system default browser)".to_string(),
		};
		[
			"Effective configuration:".to_string(),
			format!("  Source: {}", self.source.display()),
			format!("  Destination: {}", self.destination.display()),
			format!("  Viewer page: {}", self.viewer.display()),
			format!("  Default style: {}", self.default_style),
			format!("  Open viewer: {}", bool_to_word(self.open_viewer)),
			format!("  Launcher: {launcher}"),
		]
		.join("\n")
	}
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}
