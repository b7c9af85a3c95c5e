//! Line-oriented model of the viewer's JSON input.
//!
//! The document is never parsed as JSON. The first line is treated as the
//! opening brace and re-emitted by the writer, lines mentioning
//! [`MARKER`] are replaced by a single freshly written assignment, and every
//! other line passes through untouched.

use std::fs;
use std::io;
use std::path::Path;

use crate::style::StyleOption;

/// Field the viewer reads the layout style from.
pub const MARKER: &str = "visualFormat";

/// Line that always opens a rendered document.
pub const HEADER: &str = "{";

/// Lines of a source document, split the way a buffered line reader does.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigDocument {
	lines: Vec<String>,
}

/// Style value found on a document's marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedStyle {
	/// The value names a known option.
	Known(StyleOption),
	/// The value is present but not one of the options.
	Other(String),
}

impl ConfigDocument {
	/// Split `text` into lines. `\n`, `\r\n` and a lone `\r` all end a line
	/// and are removed; a trailing line without a terminator is kept.
	pub fn from_text(text: &str) -> Self {
		let mut lines = Vec::new();
		let mut rest = text;
		while let Some(end) = rest.find(['\r', '\n']) {
			lines.push(rest[..end].to_string());
			let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
			rest = &rest[end + terminator..];
		}
		if !rest.is_empty() {
			lines.push(rest.to_string());
		}
		Self { lines }
	}

	/// Read the whole document at `path` into memory.
	pub fn read(path: &Path) -> io::Result<Self> {
		let text = fs::read_to_string(path)?;
		Ok(Self::from_text(&text))
	}

	pub fn lines(&self) -> &[String] {
		&self.lines
	}

	/// Lines after the discarded opening line.
	fn body(&self) -> impl Iterator<Item = &str> {
		self.lines.iter().skip(1).map(String::as_str)
	}

	/// Body lines that survive a rewrite, in their original order.
	pub fn retained_lines(&self) -> impl Iterator<Item = &str> {
		self.body().filter(|line| !is_marker(line))
	}

	/// Number of body lines that mention the marker field.
	pub fn marker_count(&self) -> usize {
		self.body().filter(|line| is_marker(line)).count()
	}

	/// Render the rewritten document for `style`. Every line, the last one
	/// included, is terminated by `\n`.
	pub fn render(&self, style: StyleOption) -> String {
		let mut out = String::new();
		out.push_str(HEADER);
		out.push('\n');
		out.push_str(&marker_line(style));
		out.push('\n');
		for line in self.retained_lines() {
			out.push_str(line);
			out.push('\n');
		}
		out
	}

	/// Style recorded on the first marker line of the body, if any.
	pub fn recorded_style(&self) -> Option<RecordedStyle> {
		let line = self.body().find(|line| is_marker(line))?;
		let value = marker_value(line)?;
		Some(match value.parse() {
			Ok(style) => RecordedStyle::Known(style),
			Err(_) => RecordedStyle::Other(value.to_string()),
		})
	}
}

/// The assignment line written for `style`.
pub fn marker_line(style: StyleOption) -> String {
	format!("\"{MARKER}\": \"{}\",", style.wire_name())
}

fn is_marker(line: &str) -> bool {
	line.contains(MARKER)
}

/// Extract the quoted value following the marker key on `line`.
fn marker_value(line: &str) -> Option<&str> {
	let after_key = &line[line.find(MARKER)? + MARKER.len()..];
	let after_colon = &after_key[after_key.find(':')? + 1..];
	let open = after_colon.find('"')? + 1;
	let rest = &after_colon[open..];
	let close = rest.find('"')?;
	Some(&rest[..close])
}
