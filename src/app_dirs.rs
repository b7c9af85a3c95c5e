//! Where `drawgraph` looks for the user's `config.toml`.
//!
//! `DRAWGRAPH_CONFIG_DIR` points the lookup at another directory, which is
//! how tests and portable installs keep the real user file out of the way.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "drawgraph";
const APPLICATION: &str = "drawgraph";
const CONFIG_FILE: &str = "config.toml";

pub const CONFIG_DIR_ENV: &str = "DRAWGRAPH_CONFIG_DIR";

fn project_dirs() -> Result<ProjectDirs> {
	ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
		.ok_or_else(|| anyhow!("no home directory to place drawgraph settings in"))
}

/// Directory named by `var`, if it is set to something non-empty.
fn dir_from_env(var: &str) -> Option<PathBuf> {
	env::var_os(var)
		.filter(|value| !value.is_empty())
		.map(PathBuf::from)
}

/// Directory holding the user's settings, shown by `--version`.
pub fn get_config_dir() -> Result<PathBuf> {
	match dir_from_env(CONFIG_DIR_ENV) {
		Some(dir) => Ok(dir),
		None => Ok(project_dirs()?.config_dir().to_path_buf()),
	}
}

/// The user's settings file, the first and weakest configuration layer. It
/// need not exist.
pub fn get_config_file() -> Result<PathBuf> {
	Ok(get_config_dir()?.join(CONFIG_FILE))
}
