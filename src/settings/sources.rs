use std::env;
use std::fmt;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use config::{Config, ConfigError, File};
use drawgraph::app_dirs;

use crate::cli::CliArgs;

const ENV_PREFIX: &str = "drawgraph";

/// Build a [`Config`] from the optional `defaults` files (lowest precedence
/// first), then `--config` files, then `DRAWGRAPH__*` variables.
pub(super) fn build_config(cli: &CliArgs, defaults: &[PathBuf]) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in defaults {
			builder = builder.add_source(File::from(path.clone()).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		config::Environment::with_prefix(ENV_PREFIX)
			.separator("__")
			.try_parsing(true)
			.list_separator(",")
			.with_list_parse_key("viewer.command"),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

/// Discover the default configuration file locations that should be consulted.
pub(super) fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(file) = app_dirs::get_config_file() {
		files.push(file);
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join(".drawgraph.toml"));
		files.push(current_dir.join("drawgraph.toml"));
	}

	files
}

/// Where a validated value came from, for error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

/// A validated key together with its CLI flag and environment variable.
struct Setting {
	key: &'static str,
	flag: Option<&'static str>,
	env: &'static str,
}

const STYLE_DEFAULT: Setting = Setting {
	key: "style.default",
	flag: Some("--style"),
	env: "DRAWGRAPH__STYLE__DEFAULT",
};
const PATHS_SOURCE: Setting = Setting {
	key: "paths.source",
	flag: Some("--source"),
	env: "DRAWGRAPH__PATHS__SOURCE",
};
const PATHS_DESTINATION: Setting = Setting {
	key: "paths.destination",
	flag: Some("--destination"),
	env: "DRAWGRAPH__PATHS__DESTINATION",
};
const PATHS_VIEWER: Setting = Setting {
	key: "paths.viewer",
	flag: Some("--viewer"),
	env: "DRAWGRAPH__PATHS__VIEWER",
};
const VIEWER_COMMAND: Setting = Setting {
	key: "viewer.command",
	flag: None,
	env: "DRAWGRAPH__VIEWER__COMMAND",
};

/// Origins of the values that are validated after loading.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) style_default: Option<SettingSource>,
	pub(crate) paths_source: Option<SettingSource>,
	pub(crate) paths_destination: Option<SettingSource>,
	pub(crate) paths_viewer: Option<SettingSource>,
	pub(crate) viewer_command: Option<SettingSource>,
}

impl ConfigSources {
	/// Record which values were supplied by flags or environment variables;
	/// anything else came from a configuration file.
	pub(crate) fn detect(cli: &CliArgs) -> Self {
		Self {
			style_default: origin(&STYLE_DEFAULT, cli.style.is_some()),
			paths_source: origin(&PATHS_SOURCE, cli.source.is_some()),
			paths_destination: origin(&PATHS_DESTINATION, cli.destination.is_some()),
			paths_viewer: origin(&PATHS_VIEWER, cli.viewer.is_some()),
			viewer_command: origin(&VIEWER_COMMAND, false),
		}
	}

	pub(crate) fn source_for_style(&self) -> SettingSource {
		self.style_default
			.clone()
			.unwrap_or(SettingSource::ConfigKey(STYLE_DEFAULT.key))
	}

	pub(crate) fn source_for_path(&self, key: &'static str) -> SettingSource {
		let recorded = match key {
			"paths.source" => &self.paths_source,
			"paths.destination" => &self.paths_destination,
			"paths.viewer" => &self.paths_viewer,
			_ => &None,
		};
		recorded.clone().unwrap_or(SettingSource::ConfigKey(key))
	}

	pub(crate) fn source_for_command(&self) -> SettingSource {
		self.viewer_command
			.clone()
			.unwrap_or(SettingSource::ConfigKey(VIEWER_COMMAND.key))
	}
}

fn origin(setting: &Setting, from_cli: bool) -> Option<SettingSource> {
	if from_cli && let Some(flag) = setting.flag {
		return Some(SettingSource::CliFlag(flag));
	}
	env::var_os(setting.env).map(|_| SettingSource::Environment(setting.env))
}
