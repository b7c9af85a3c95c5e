use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A style name outside the closed [`StyleOption`](crate::StyleOption) set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown style '{name}' (expected one of: random, polygon, topologically-sorted)")]
pub struct UnknownStyle {
	pub name: String,
}

/// Failures of the read-rewrite-write operation.
#[derive(Debug, Error)]
pub enum PatchError {
	/// The source document is missing, unreadable or not UTF-8.
	#[error("failed to read source document {}", path.display())]
	ReadSource {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The destination could not be created or written.
	#[error("failed to write destination document {}", path.display())]
	WriteDestination {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

impl PatchError {
	/// Path of the file the failed step was touching.
	pub fn path(&self) -> &PathBuf {
		match self {
			Self::ReadSource { path, .. } | Self::WriteDestination { path, .. } => path,
		}
	}
}

/// Failures while handing the viewer page to the operating system.
#[derive(Debug, Error)]
pub enum ViewerError {
	#[error("viewer page {} does not exist", path.display())]
	MissingPage { path: PathBuf },

	#[error("failed to resolve viewer page {}", path.display())]
	ResolvePage {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// A configured launcher command could not be spawned.
	#[error("failed to launch '{program}'")]
	Launch {
		program: String,
		#[source]
		source: io::Error,
	},

	/// A launcher started but exited with a failure status straight away.
	#[error("'{program}' exited with {status}")]
	LauncherFailed { program: String, status: String },

	/// None of the platform openers were available.
	#[error("no default browser launcher available (tried: {})", tried.join(", "))]
	NoLauncher { tried: Vec<String> },
}

/// Errors surfaced by a single draw request.
#[derive(Debug, Error)]
pub enum SessionError {
	#[error(transparent)]
	Patch(#[from] PatchError),

	#[error(transparent)]
	Viewer(#[from] ViewerError),
}
