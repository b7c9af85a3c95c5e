use std::path::PathBuf;

use serde::Deserialize;

use drawgraph::StyleOption;

use crate::cli::CliArgs;

use super::resolved::{
	ConfigError, DEFAULT_DESTINATION, DEFAULT_SOURCE, DEFAULT_VIEWER, ResolvedConfig,
};
use super::sources::ConfigSources;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	paths: PathsSection,
	style: StyleSection,
	viewer: ViewerSection,
}

/// File locations as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PathsSection {
	source: Option<PathBuf>,
	destination: Option<PathBuf>,
	viewer: Option<PathBuf>,
}

/// Style selection before it is parsed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct StyleSection {
	default: Option<String>,
}

/// How the viewer page is opened.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ViewerSection {
	open: Option<bool>,
	command: Option<Vec<String>>,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(path) = cli.source.clone() {
			self.paths.source = Some(path);
		}
		if let Some(path) = cli.destination.clone() {
			self.paths.destination = Some(path);
		}
		if let Some(path) = cli.viewer.clone() {
			self.paths.viewer = Some(path);
		}
		if let Some(style) = cli.style {
			self.style.default = Some(StyleOption::from(style).as_str().to_string());
		}
		if let Some(open) = cli.open {
			self.viewer.open = Some(open);
		}
		if cli.no_open {
			self.viewer.open = Some(false);
		}
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self, sources: &ConfigSources) -> Result<ResolvedConfig, ConfigError> {
		let source = resolve_path(self.paths.source, DEFAULT_SOURCE, "paths.source", sources)?;
		let destination = resolve_path(
			self.paths.destination,
			DEFAULT_DESTINATION,
			"paths.destination",
			sources,
		)?;
		let viewer = resolve_path(self.paths.viewer, DEFAULT_VIEWER, "paths.viewer", sources)?;

		let default_style = match self.style.default {
			Some(raw) => raw.parse::<StyleOption>().map_err(|err| {
				ConfigError::invalid("style.default", raw.clone(), sources.source_for_style(), err.to_string())
			})?,
			None => StyleOption::default(),
		};

		let viewer_command = match self.viewer.command {
			Some(command) if command.iter().all(|part| part.trim().is_empty()) => {
				return Err(ConfigError::invalid(
					"viewer.command",
					format!("{command:?}"),
					sources.source_for_command(),
					"the launcher command must name a program",
				));
			}
			other => other,
		};

		Ok(ResolvedConfig {
			source,
			destination,
			viewer,
			default_style,
			open_viewer: self.viewer.open.unwrap_or(true),
			viewer_command,
		})
	}
}

fn resolve_path(
	value: Option<PathBuf>,
	default: &str,
	key: &'static str,
	sources: &ConfigSources,
) -> Result<PathBuf, ConfigError> {
	match value {
		Some(path) if path.as_os_str().is_empty() => Err(ConfigError::invalid(
			key,
			String::new(),
			sources.source_for_path(key),
			"path must not be empty",
		)),
		Some(path) => Ok(path),
		None => Ok(PathBuf::from(default)),
	}
}
