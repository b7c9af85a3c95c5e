//! Hand the viewer page to the system's default browser.
//!
//! There is no portable "open this URI" call in the standard library, so the
//! platform's opener helper is spawned instead. A configured command replaces
//! the platform candidates entirely.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::ViewerError;

/// How long a launcher may take to hand the page over before it is left to
/// run in the background.
const LAUNCH_GRACE: Duration = Duration::from_millis(1500);
const LAUNCH_POLL: Duration = Duration::from_millis(20);

/// Program and leading arguments used to open a URI; the URI is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Launcher {
	program: String,
	args: Vec<String>,
}

impl Launcher {
	fn new(program: &str, args: &[&str]) -> Self {
		Self {
			program: program.to_string(),
			args: args.iter().map(|arg| arg.to_string()).collect(),
		}
	}

	fn spawn(&self, uri: &str) -> io::Result<Child> {
		Command::new(&self.program)
			.args(&self.args)
			.arg(uri)
			.stdin(Stdio::null())
			.stdout(Stdio::null())
			.stderr(Stdio::null())
			.spawn()
	}
}

/// An HTML page to show in the browser.
#[derive(Debug, Clone)]
pub struct Viewer {
	page: PathBuf,
	command: Option<Launcher>,
}

impl Viewer {
	pub fn new(page: impl Into<PathBuf>) -> Self {
		Self {
			page: page.into(),
			command: None,
		}
	}

	/// Open the page with `program args... <uri>` instead of the platform
	/// opener.
	pub fn with_command<S: AsRef<str>>(mut self, program: &str, args: &[S]) -> Self {
		self.command = Some(Launcher {
			program: program.to_string(),
			args: args.iter().map(|arg| arg.as_ref().to_string()).collect(),
		});
		self
	}

	pub fn page(&self) -> &Path {
		&self.page
	}

	/// `file://` URI of the page, which must exist.
	pub fn uri(&self) -> Result<String, ViewerError> {
		if !self.page.exists() {
			return Err(ViewerError::MissingPage {
				path: self.page.clone(),
			});
		}
		let absolute = self
			.page
			.canonicalize()
			.map_err(|source| ViewerError::ResolvePage {
				path: self.page.clone(),
				source,
			})?;
		Ok(file_uri(&absolute))
	}

	/// Ask the operating system to show the page. Returns once the launcher
	/// has handed the page over; the browser itself is not waited on.
	pub fn open(&self) -> Result<(), ViewerError> {
		let uri = self.uri()?;

		if let Some(launcher) = &self.command {
			let child = launcher.spawn(&uri).map_err(|source| ViewerError::Launch {
				program: launcher.program.clone(),
				source,
			})?;
			return check_started(&launcher.program, child);
		}

		let candidates = platform_launchers();
		let mut tried = Vec::with_capacity(candidates.len());
		for launcher in candidates {
			log::debug!("opening {uri} with {}", launcher.program);
			match launcher.spawn(&uri) {
				Ok(child) => return check_started(&launcher.program, child),
				Err(err) => {
					log::warn!("launcher {} unavailable: {err}", launcher.program);
					tried.push(launcher.program);
				}
			}
		}

		Err(ViewerError::NoLauncher { tried })
	}
}

/// Wait up to [`LAUNCH_GRACE`] for the launcher to exit and report a failure
/// status. Openers return once the browser has the page; a launcher still
/// running after the grace period is reaped on a background thread.
fn check_started(program: &str, child: Child) -> Result<(), ViewerError> {
	check_started_within(program, child, LAUNCH_GRACE)
}

fn check_started_within(program: &str, mut child: Child, grace: Duration) -> Result<(), ViewerError> {
	let deadline = Instant::now() + grace;
	loop {
		match child.try_wait() {
			Ok(Some(status)) if status.success() => return Ok(()),
			Ok(Some(status)) => {
				return Err(ViewerError::LauncherFailed {
					program: program.to_string(),
					status: status.to_string(),
				});
			}
			Ok(None) if Instant::now() < deadline => thread::sleep(LAUNCH_POLL),
			Ok(None) => {
				log::debug!("{program} still running, leaving it in the background");
				thread::spawn(move || {
					let _ = child.wait();
				});
				return Ok(());
			}
			Err(err) => {
				log::warn!("cannot poll {program}: {err}");
				return Ok(());
			}
		}
	}
}

#[cfg(target_os = "macos")]
fn platform_launchers() -> Vec<Launcher> {
	vec![Launcher::new("open", &[])]
}

#[cfg(windows)]
fn platform_launchers() -> Vec<Launcher> {
	vec![Launcher::new("cmd", &["/C", "start", ""])]
}

#[cfg(not(any(target_os = "macos", windows)))]
fn platform_launchers() -> Vec<Launcher> {
	vec![
		Launcher::new("xdg-open", &[]),
		Launcher::new("gio", &["open"]),
		Launcher::new("wslview", &[]),
	]
}

/// Build a `file://` URI for an absolute path, percent-encoding anything
/// outside the unreserved and path characters.
pub fn file_uri(path: &Path) -> String {
	let raw = path.to_string_lossy();
	let trimmed = raw.strip_prefix(r"\\?\").unwrap_or(&*raw);
	let normalized = trimmed.replace('\\', "/");

	let mut uri = String::from("file://");
	if !normalized.starts_with('/') {
		uri.push('/');
	}
	for byte in normalized.bytes() {
		match byte {
			b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' | b':' => {
				uri.push(byte as char)
			}
			other => uri.push_str(&format!("%{other:02X}")),
		}
	}
	uri
}
