use std::fs;
use std::path::Path;

use drawgraph::{
	DrawTarget, PatchError, Session, SessionError, StyleOption, Viewer, ViewerError, patch,
};
use tempfile::tempdir;

const GRAPH: &str = "{\n\"labels\": [\"A\", \"B\", \"C\"],\n\"visualFormat\": \"random\",\n\"edges\": [[0, 1, 3], [1, 2, 5]]\n}\n";

fn layout(root: &Path) {
	fs::create_dir(root.join("app")).unwrap();
	fs::write(root.join("graph.json"), GRAPH).unwrap();
	fs::write(root.join("app/index.html"), "<html><body><canvas id=\"canvas\"></canvas></body></html>").unwrap();
}

fn target(root: &Path) -> DrawTarget {
	DrawTarget::new(
		root.join("graph.json"),
		root.join("app/input.json"),
		Viewer::new(root.join("app/index.html")),
	)
}

#[test]
fn every_style_produces_viewer_input() {
	let dir = tempdir().unwrap();
	layout(dir.path());
	let mut session = Session::new(target(dir.path()).with_open_viewer(false));

	for style in StyleOption::ALL {
		session.select(style);
		let report = session.draw().expect("draw");
		let written = fs::read_to_string(dir.path().join("app/input.json")).unwrap();

		assert_eq!(report.style, style);
		assert_eq!(
			written,
			format!(
				"{{\n\"visualFormat\": \"{}\",\n\"labels\": [\"A\", \"B\", \"C\"],\n\"edges\": [[0, 1, 3], [1, 2, 5]]\n}}\n",
				style.wire_name()
			)
		);
		let parsed: serde_json::Value = serde_json::from_str(&written).expect("valid json");
		assert_eq!(parsed["visualFormat"], style.wire_name());
		assert_eq!(parsed["edges"][1][2], 5);
	}
}

#[test]
fn patching_the_output_again_changes_nothing() {
	let dir = tempdir().unwrap();
	layout(dir.path());
	let input = dir.path().join("app/input.json");
	let again = dir.path().join("app/again.json");

	patch(&dir.path().join("graph.json"), &input, StyleOption::Polygon).unwrap();
	patch(&input, &again, StyleOption::Polygon).unwrap();

	assert_eq!(fs::read(&input).unwrap(), fs::read(&again).unwrap());
}

#[test]
fn missing_app_directory_is_reported_and_nothing_is_written() {
	let dir = tempdir().unwrap();
	fs::write(dir.path().join("graph.json"), GRAPH).unwrap();
	let session = Session::new(target(dir.path()));

	let err = session.draw().unwrap_err();

	assert!(matches!(err, SessionError::Patch(PatchError::WriteDestination { .. })));
	assert!(!dir.path().join("app").exists());
	assert!(!session.trigger());
}

#[cfg(unix)]
#[test]
fn custom_launcher_opens_the_viewer_after_patching() {
	let dir = tempdir().unwrap();
	layout(dir.path());
	let mut target = target(dir.path());
	target.viewer = target.viewer.clone().with_command("true", &[] as &[&str]);
	let session = Session::new(target).with_selection(StyleOption::TopologicallySorted);

	let report = session.draw().expect("draw");

	assert!(report.opened);
	assert_eq!(report.patch.replaced_markers, 1);
}

#[cfg(unix)]
#[test]
fn failing_launcher_makes_the_draw_fail() {
	let dir = tempdir().unwrap();
	layout(dir.path());
	let mut target = target(dir.path());
	target.viewer = target.viewer.clone().with_command("false", &[] as &[&str]);
	let session = Session::new(target);

	let err = session.draw().unwrap_err();

	assert!(matches!(err, SessionError::Viewer(ViewerError::LauncherFailed { .. })));
	assert!(!session.trigger());
	assert!(dir.path().join("app/input.json").exists());
}

#[test]
fn interactive_transcript_drives_the_same_operation() {
	let dir = tempdir().unwrap();
	layout(dir.path());
	let mut session = Session::new(target(dir.path()).with_open_viewer(false));
	let mut output = Vec::new();

	session
		.run_interactive("select polygon\ndraw\nexit\n".as_bytes(), &mut output)
		.unwrap();

	let written = fs::read_to_string(dir.path().join("app/input.json")).unwrap();
	assert_eq!(written.lines().nth(1), Some("\"visualFormat\": \"polygon\","));
	assert!(String::from_utf8(output).unwrap().contains("drawn as polygon"));
}
