use std::path::PathBuf;

use anyhow::{Result, anyhow};
use drawgraph::StyleOption;

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use super::sources::{ConfigSources, build_config, default_config_files};
use crate::cli::CliArgs;

/// Load configuration by combining CLI arguments, config files and environment
/// variables.
pub(crate) fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	load_from(cli, &default_config_files())
}

/// Style to mark as selected when only listing styles. A broken
/// configuration is not fatal here; the CLI flag or the built-in default is
/// used instead.
pub(crate) fn listing_style(cli: &CliArgs) -> StyleOption {
	listing_style_from(cli, &default_config_files())
}

fn listing_style_from(cli: &CliArgs, defaults: &[PathBuf]) -> StyleOption {
	match load_from(cli, defaults) {
		Ok(resolved) => resolved.default_style,
		Err(err) => {
			log::warn!("ignoring configuration: {err:#}");
			cli.style.map(StyleOption::from).unwrap_or_default()
		}
	}
}

fn load_from(cli: &CliArgs, defaults: &[PathBuf]) -> Result<ResolvedConfig> {
	let builder = build_config(cli, defaults)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	let sources = ConfigSources::detect(cli);
	raw.apply_cli_overrides(cli);
	Ok(raw.resolve(&sources)?)
}

#[cfg(test)]
mod tests {
	use std::env;
	use std::fs;
	use std::path::Path;

	use clap::Parser;
	use tempfile::{TempDir, tempdir};

	use super::*;

	/// Writes the user config file, the working-directory file and an explicit
	/// `--config` file, each overriding part of the previous one.
	fn layered_files() -> (TempDir, Vec<PathBuf>, PathBuf) {
		let dir = tempdir().unwrap();
		let user = dir.path().join("config.toml");
		let local = dir.path().join("drawgraph.toml");
		let explicit = dir.path().join("explicit.toml");
		fs::write(
			&user,
			"[style]\ndefault = \"polygon\"\n\n[paths]\ndestination = \"user/input.json\"\nviewer = \"user/index.html\"\n\n[viewer]\nopen = false\n",
		)
		.unwrap();
		fs::write(
			&local,
			"[paths]\ndestination = \"local/input.json\"\nviewer = \"local/index.html\"\n",
		)
		.unwrap();
		fs::write(&explicit, "[paths]\nviewer = \"explicit/index.html\"\n").unwrap();
		(dir, vec![user, local], explicit)
	}

	fn cli(args: &[&str]) -> CliArgs {
		CliArgs::parse_from(std::iter::once("drawgraph").chain(args.iter().copied()))
	}

	fn path_arg(path: &Path) -> &str {
		path.to_str().expect("utf-8 temp path")
	}

	#[test]
	fn later_layers_override_earlier_ones() {
		let (_dir, defaults, explicit) = layered_files();
		let cli = cli(&["--config", path_arg(&explicit)]);

		let resolved = load_from(&cli, &defaults).expect("loads");

		assert_eq!(resolved.default_style, StyleOption::Polygon);
		assert!(!resolved.open_viewer);
		assert_eq!(resolved.destination, PathBuf::from("local/input.json"));
		assert_eq!(resolved.viewer, PathBuf::from("explicit/index.html"));
	}

	#[test]
	fn cli_flags_beat_every_file() {
		let (_dir, defaults, explicit) = layered_files();
		let cli = cli(&[
			"--config",
			path_arg(&explicit),
			"--viewer",
			"flag/index.html",
			"--style",
			"random",
			"--open",
			"true",
		]);

		let resolved = load_from(&cli, &defaults).expect("loads");

		assert_eq!(resolved.viewer, PathBuf::from("flag/index.html"));
		assert_eq!(resolved.default_style, StyleOption::Random);
		assert!(resolved.open_viewer);
	}

	#[test]
	fn no_config_skips_default_files_but_not_explicit_ones() {
		let (_dir, defaults, explicit) = layered_files();
		let cli = cli(&["--no-config", "--config", path_arg(&explicit)]);

		let resolved = load_from(&cli, &defaults).expect("loads");

		assert_eq!(resolved.default_style, StyleOption::Random);
		assert_eq!(resolved.destination, PathBuf::from("app/input.json"));
		assert_eq!(resolved.viewer, PathBuf::from("explicit/index.html"));
	}

	#[test]
	fn missing_explicit_config_is_an_error() {
		let dir = tempdir().unwrap();
		let absent = dir.path().join("absent.toml");
		let cli = cli(&["--config", path_arg(&absent)]);

		assert!(load_from(&cli, &[]).is_err());
	}

	#[test]
	fn missing_default_files_are_ignored() {
		let dir = tempdir().unwrap();
		let cli = cli(&["--style", "polygon"]);

		let resolved = load_from(&cli, &[dir.path().join("config.toml")]).expect("loads");

		assert_eq!(resolved.default_style, StyleOption::Polygon);
	}

	#[test]
	fn listing_style_follows_configuration_and_survives_errors() {
		let (dir, defaults, _explicit) = layered_files();

		assert_eq!(listing_style_from(&cli(&[]), &defaults), StyleOption::Polygon);

		let broken = cli(&[
			"--config",
			path_arg(&dir.path().join("absent.toml")),
			"--style",
			"topologically-sorted",
		]);
		assert_eq!(
			listing_style_from(&broken, &defaults),
			StyleOption::TopologicallySorted
		);
	}

	#[test]
	fn environment_overrides_files_and_splits_only_the_command() {
		let dir = tempdir().unwrap();
		let explicit = dir.path().join("explicit.toml");
		fs::write(
			&explicit,
			"[paths]\nsource = \"file/graph.json\"\n\n[viewer]\ncommand = [\"chromium\"]\n",
		)
		.unwrap();
		// SAFETY: these variables are only read by configuration loading, and no
		// other test asserts on `paths.source` or `viewer.command` after loading.
		unsafe {
			env::set_var("DRAWGRAPH__PATHS__SOURCE", "data/a,b.json");
			env::set_var("DRAWGRAPH__VIEWER__COMMAND", "firefox,--new-tab");
		}

		let result = load_from(&cli(&["--config", path_arg(&explicit)]), &[]);

		// SAFETY: removing the variables set above.
		unsafe {
			env::remove_var("DRAWGRAPH__PATHS__SOURCE");
			env::remove_var("DRAWGRAPH__VIEWER__COMMAND");
		}

		let resolved = result.expect("loads");
		assert_eq!(resolved.source, PathBuf::from("data/a,b.json"));
		assert_eq!(
			resolved.viewer_command,
			Some(vec!["firefox".to_string(), "--new-tab".to_string()])
		);
	}
}
