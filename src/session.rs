//! The selection state and the "draw" action, plus a line-based command loop
//! that drives them from a terminal.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use serde::Serialize;

use crate::error::SessionError;
use crate::patch::{PatchReport, patch};
use crate::style::StyleOption;
use crate::viewer::Viewer;

/// Files a draw request reads, writes and shows.
#[derive(Debug, Clone)]
pub struct DrawTarget {
	pub source: PathBuf,
	pub destination: PathBuf,
	pub viewer: Viewer,
	/// Whether a successful patch is followed by opening the viewer.
	pub open_viewer: bool,
}

impl DrawTarget {
	pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>, viewer: Viewer) -> Self {
		Self {
			source: source.into(),
			destination: destination.into(),
			viewer,
			open_viewer: true,
		}
	}

	pub fn with_open_viewer(mut self, open: bool) -> Self {
		self.open_viewer = open;
		self
	}
}

/// Outcome of a successful draw.
#[derive(Debug, Clone, Serialize)]
pub struct DrawReport {
	pub style: StyleOption,
	pub patch: PatchReport,
	/// Whether the viewer was handed to the browser.
	pub opened: bool,
}

/// Holds the currently selected style and the files it is applied to.
#[derive(Debug, Clone)]
pub struct Session {
	target: DrawTarget,
	selected: StyleOption,
}

impl Session {
	pub fn new(target: DrawTarget) -> Self {
		Self {
			target,
			selected: StyleOption::default(),
		}
	}

	pub fn with_selection(mut self, style: StyleOption) -> Self {
		self.selected = style;
		self
	}

	pub fn target(&self) -> &DrawTarget {
		&self.target
	}

	pub fn selected(&self) -> StyleOption {
		self.selected
	}

	pub fn select(&mut self, style: StyleOption) {
		log::debug!("selected style {style}");
		self.selected = style;
	}

	/// Patch the destination with the selected style, then open the viewer.
	/// The viewer is never opened when patching failed.
	pub fn draw(&self) -> Result<DrawReport, SessionError> {
		let style = self.selected;
		let report = patch(&self.target.source, &self.target.destination, style)?;

		let opened = if self.target.open_viewer {
			self.target.viewer.open()?;
			true
		} else {
			false
		};

		Ok(DrawReport {
			style,
			patch: report,
			opened,
		})
	}

	/// Run [`Session::draw`], logging the outcome instead of returning it so
	/// the session stays usable after a failure.
	pub fn trigger(&self) -> bool {
		match self.draw() {
			Ok(report) => {
				log::info!(
					"drew {} into {}",
					report.style,
					report.patch.destination.display()
				);
				true
			}
			Err(err) => {
				log::error!("draw failed: {}", failure_message(err));
				false
			}
		}
	}

	/// Read commands from `input` until `quit` or end of input.
	///
	/// Only failures of the streams themselves are returned; failed draws are
	/// reported and the loop continues.
	pub fn run_interactive<R: BufRead, W: Write>(
		&mut self,
		input: R,
		mut output: W,
	) -> io::Result<()> {
		writeln!(output, "Pick the style of graph display, then `draw`. Type `help` for commands.")?;
		self.write_styles(&mut output)?;

		let mut lines = input.lines();
		loop {
			write!(output, "[{}]> ", self.selected)?;
			output.flush()?;

			let Some(line) = lines.next().transpose()? else {
				writeln!(output)?;
				return Ok(());
			};
			let line = line.trim();
			if line.is_empty() {
				continue;
			}

			let (command, argument) = match line.split_once(char::is_whitespace) {
				Some((command, rest)) => (command, rest.trim()),
				None => (line, ""),
			};

			match command.to_ascii_lowercase().as_str() {
				"quit" | "exit" => return Ok(()),
				"help" => write_help(&mut output)?,
				"list" | "styles" => self.write_styles(&mut output)?,
				"select" | "use" => match parse_selection(argument) {
					Ok(style) => {
						self.select(style);
						writeln!(output, "selected {style}")?;
					}
					Err(message) => writeln!(output, "{message}")?,
				},
				"draw" => {
					if self.trigger() {
						writeln!(output, "drawn as {}", self.selected)?;
					} else {
						writeln!(output, "draw failed; see log output")?;
					}
				}
				"status" => self.write_status(&mut output)?,
				other => writeln!(output, "unknown command '{other}' (try `help`)")?,
			}
		}
	}

	fn write_styles<W: Write>(&self, output: &mut W) -> io::Result<()> {
		for (index, style) in StyleOption::ALL.iter().enumerate() {
			let marker = if *style == self.selected { '*' } else { ' ' };
			writeln!(output, " {marker} {}. {style}", index + 1)?;
		}
		Ok(())
	}

	fn write_status<W: Write>(&self, output: &mut W) -> io::Result<()> {
		writeln!(output, "selected:    {}", self.selected)?;
		writeln!(output, "source:      {}", self.target.source.display())?;
		writeln!(output, "destination: {}", self.target.destination.display())?;
		writeln!(output, "viewer:      {}", self.target.viewer.page().display())?;
		writeln!(
			output,
			"open viewer: {}",
			if self.target.open_viewer { "yes" } else { "no" }
		)
	}
}

fn write_help<W: Write>(output: &mut W) -> io::Result<()> {
	writeln!(output, "commands:")?;
	writeln!(output, "  list               show the available styles")?;
	writeln!(output, "  select <name|n>    choose a style by name or number")?;
	writeln!(output, "  draw               write the input file and open the viewer")?;
	writeln!(output, "  status             show the selection and file paths")?;
	writeln!(output, "  quit               leave")
}

/// Accept either a 1-based position or any spelling of a style name.
fn parse_selection(argument: &str) -> Result<StyleOption, String> {
	if argument.is_empty() {
		return Err("usage: select <name|number>".to_string());
	}
	if let Ok(position) = argument.parse::<usize>() {
		return StyleOption::from_position(position).ok_or_else(|| {
			format!(
				"no style numbered {position} (choose 1-{})",
				StyleOption::ALL.len()
			)
		});
	}
	argument.parse().map_err(|err: crate::UnknownStyle| err.to_string())
}

/// One-line rendering of an error and its causes.
fn failure_message(err: SessionError) -> String {
	format!("{:#}", anyhow::Error::new(err))
}
