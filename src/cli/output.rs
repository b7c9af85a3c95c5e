use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Result;
use drawgraph::{ConfigDocument, DrawReport, RecordedStyle, StyleOption};
use serde::Serialize;
use serde_json::json;

use super::OutputFormat;

/// Style information for one of the files a draw touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct FileStatus {
	pub(crate) path: PathBuf,
	pub(crate) exists: bool,
	/// False when the file exists but is not readable UTF-8 text.
	pub(crate) readable: bool,
	pub(crate) style: Option<String>,
	/// Whether `style` names one of the known options.
	pub(crate) known: bool,
}

impl FileStatus {
	/// Inspect `path`, telling a missing file apart from one that cannot be
	/// read.
	pub(crate) fn inspect(path: &Path) -> Self {
		let (exists, recorded) = match ConfigDocument::read(path) {
			Ok(document) => (true, Some(document.recorded_style())),
			Err(err) if err.kind() == ErrorKind::NotFound => (false, None),
			Err(err) => {
				log::warn!("cannot read {}: {err}", path.display());
				(true, None)
			}
		};

		let (style, known) = match recorded.clone().flatten() {
			Some(RecordedStyle::Known(style)) => (Some(style.to_string()), true),
			Some(RecordedStyle::Other(raw)) => (Some(raw), false),
			None => (None, false),
		};

		Self {
			path: path.to_path_buf(),
			exists,
			readable: recorded.is_some(),
			style,
			known,
		}
	}

	fn describe(&self) -> String {
		if !self.exists {
			return "(missing)".to_string();
		}
		if !self.readable {
			return "(unreadable)".to_string();
		}
		match &self.style {
			None => "(none)".to_string(),
			Some(style) if self.known => style.clone(),
			Some(style) => format!("{style} (not a known style)"),
		}
	}
}

/// Print the style list, marking `selected`.
pub(crate) fn print_styles(format: OutputFormat, selected: StyleOption) -> Result<()> {
	println!("{}", format_styles(format, selected)?);
	Ok(())
}

fn format_styles(format: OutputFormat, selected: StyleOption) -> Result<String> {
	match format {
		OutputFormat::Plain => Ok(StyleOption::ALL
			.iter()
			.map(|style| {
				let marker = if *style == selected { '*' } else { ' ' };
				format!("{marker} {style}")
			})
			.collect::<Vec<_>>()
			.join("\n")),
		OutputFormat::Json => {
			let styles: Vec<_> = StyleOption::ALL
				.iter()
				.map(|style| {
					json!({
						"name": style.as_str(),
						"value": style.wire_name(),
						"selected": *style == selected,
					})
				})
				.collect();
			Ok(serde_json::to_string_pretty(&styles)?)
		}
	}
}

/// Print the result of a successful draw.
pub(crate) fn print_draw(format: OutputFormat, report: &DrawReport) -> Result<()> {
	match format {
		OutputFormat::Plain => {
			println!(
				"Wrote {} with style {}",
				report.patch.destination.display(),
				report.style
			);
			if report.opened {
				println!("Opened the viewer in the default browser");
			}
		}
		OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
	}
	Ok(())
}

/// Print the recorded style of the source and destination files.
pub(crate) fn print_status(
	format: OutputFormat,
	source: &FileStatus,
	destination: &FileStatus,
) -> Result<()> {
	println!("{}", format_status(format, source, destination)?);
	Ok(())
}

fn format_status(
	format: OutputFormat,
	source: &FileStatus,
	destination: &FileStatus,
) -> Result<String> {
	match format {
		OutputFormat::Plain => Ok(format!(
			"source      {}: {}\ndestination {}: {}",
			source.path.display(),
			source.describe(),
			destination.path.display(),
			destination.describe()
		)),
		OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
			"source": source,
			"destination": destination,
		}))?),
	}
}
