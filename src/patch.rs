use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::document::ConfigDocument;
use crate::error::PatchError;
use crate::style::StyleOption;

/// What a successful [`patch`] wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchReport {
	pub style: StyleOption,
	pub destination: PathBuf,
	/// Body lines copied from the source.
	pub kept_lines: usize,
	/// Source lines dropped because they carried an older style.
	pub replaced_markers: usize,
	pub bytes_written: usize,
}

/// Rewrite the document at `source` for `style` and write it to
/// `destination`, replacing whatever was there.
///
/// The source is read completely before the destination is opened, so a
/// missing source leaves the destination untouched. Parent directories of the
/// destination are not created.
pub fn patch(
	source: &Path,
	destination: &Path,
	style: StyleOption,
) -> Result<PatchReport, PatchError> {
	let document = ConfigDocument::read(source).map_err(|source_err| PatchError::ReadSource {
		path: source.to_path_buf(),
		source: source_err,
	})?;

	let rendered = document.render(style);
	let write_err = |err| PatchError::WriteDestination {
		path: destination.to_path_buf(),
		source: err,
	};

	let file = File::create(destination).map_err(write_err)?;
	let mut writer = BufWriter::new(file);
	writer.write_all(rendered.as_bytes()).map_err(write_err)?;
	writer.flush().map_err(write_err)?;

	let report = PatchReport {
		style,
		destination: destination.to_path_buf(),
		kept_lines: document.retained_lines().count(),
		replaced_markers: document.marker_count(),
		bytes_written: rendered.len(),
	};
	log::debug!(
		"patched {} -> {} ({} lines kept, {} markers replaced)",
		source.display(),
		destination.display(),
		report.kept_lines,
		report.replaced_markers
	);

	Ok(report)
}

#[cfg(test)]
mod tests {
	use std::fs;

	use tempfile::tempdir;

	use super::*;

	#[test]
	fn writes_patched_document() {
		let dir = tempdir().unwrap();
		let source = dir.path().join("graph.json");
		let destination = dir.path().join("input.json");
		fs::write(
			&source,
			"{\n\"visualFormat\": \"old\",\n\"nodes\": [1,2,3]\n}",
		)
		.unwrap();

		let report = patch(&source, &destination, StyleOption::Polygon).expect("patch");

		let written = fs::read_to_string(&destination).unwrap();
		assert_eq!(written, "{\n\"visualFormat\": \"polygon\",\n\"nodes\": [1,2,3]\n}\n");
		assert_eq!(report.kept_lines, 2);
		assert_eq!(report.replaced_markers, 1);
		assert_eq!(report.bytes_written, written.len());
	}

	#[test]
	fn overwrites_existing_destination() {
		let dir = tempdir().unwrap();
		let source = dir.path().join("graph.json");
		let destination = dir.path().join("input.json");
		fs::write(&source, "{\n\"edges\": []\n}\n").unwrap();
		fs::write(&destination, "stale content that is much longer than the new one\n".repeat(20))
			.unwrap();

		patch(&source, &destination, StyleOption::Random).expect("patch");

		assert_eq!(
			fs::read_to_string(&destination).unwrap(),
			"{\n\"visualFormat\": \"random\",\n\"edges\": []\n}\n"
		);
	}

	#[test]
	fn repatching_output_is_byte_identical() {
		let dir = tempdir().unwrap();
		let source = dir.path().join("graph.json");
		let first = dir.path().join("first.json");
		let second = dir.path().join("second.json");
		fs::write(
			&source,
			"{\n\"labels\": [\"a\", \"b\"],\n\"visualFormat\": \"polygon\",\n\"edges\": [[0, 1, 2]]\n}\n",
		)
		.unwrap();

		patch(&source, &first, StyleOption::TopologicallySorted).unwrap();
		patch(&first, &second, StyleOption::TopologicallySorted).unwrap();

		assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
	}

	#[test]
	fn missing_source_leaves_destination_untouched() {
		let dir = tempdir().unwrap();
		let source = dir.path().join("absent.json");
		let destination = dir.path().join("input.json");
		fs::write(&destination, "previous\n").unwrap();

		let err = patch(&source, &destination, StyleOption::Polygon).unwrap_err();

		assert!(matches!(err, PatchError::ReadSource { ref path, .. } if path == &source));
		assert_eq!(fs::read_to_string(&destination).unwrap(), "previous\n");
	}

	#[test]
	fn missing_source_does_not_create_destination() {
		let dir = tempdir().unwrap();
		let destination = dir.path().join("input.json");

		let result = patch(&dir.path().join("absent.json"), &destination, StyleOption::Random);

		assert!(result.is_err());
		assert!(!destination.exists());
	}

	#[test]
	fn missing_destination_parent_is_a_write_error() {
		let dir = tempdir().unwrap();
		let source = dir.path().join("graph.json");
		let destination = dir.path().join("app").join("input.json");
		fs::write(&source, "{\n}\n").unwrap();

		let err = patch(&source, &destination, StyleOption::Random).unwrap_err();

		assert!(matches!(err, PatchError::WriteDestination { .. }));
		assert!(!dir.path().join("app").exists());
	}

	#[test]
	fn non_utf8_source_is_a_read_error() {
		let dir = tempdir().unwrap();
		let source = dir.path().join("graph.json");
		fs::write(&source, [0x7b, 0x0a, 0xff, 0xfe, 0x0a]).unwrap();

		let err = patch(&source, &dir.path().join("out.json"), StyleOption::Random).unwrap_err();

		assert!(matches!(err, PatchError::ReadSource { .. }));
	}
}
