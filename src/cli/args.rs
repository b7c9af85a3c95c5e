use std::fmt::Write;
use std::path::PathBuf;

use clap::{
	ArgAction, ColorChoice, Command, CommandFactory, FromArgMatches, Parser, Subcommand, ValueEnum,
	builder::{
		BoolishValueParser, Styles,
		styling::{AnsiColor, Effects},
	},
};
use drawgraph::{StyleOption, app_dirs};

/// Produce the full version banner including the config directory.
fn long_version() -> &'static str {
	let config_dir = match app_dirs::get_config_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let mut details = format!("drawgraph {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(details, "config directory: {config_dir}");

	Box::leak(details.into_boxed_str())
}

/// Create the clap styles used for custom colour output.
fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
	let mut matches = cli_command().get_matches();
	CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

fn cli_command() -> Command {
	CliArgs::command()
}

#[derive(Parser, Debug)]
#[command(
	name = "drawgraph",
	version,
	long_version = long_version(),
	about = "Pick a graph display style and open the graph viewer in the default browser",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
/// Command-line arguments accepted by the `drawgraph` binary.
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "DRAWGRAPH_CONFIG",
		action = ArgAction::Append,
		global = true,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		global = true,
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		long,
		value_name = "PATH",
		global = true,
		help = "Graph document to read (default: graph.json)"
	)]
	pub(crate) source: Option<PathBuf>,
	#[arg(
		long,
		value_name = "PATH",
		global = true,
		help = "Viewer input file to write (default: app/input.json)"
	)]
	pub(crate) destination: Option<PathBuf>,
	#[arg(
		long,
		value_name = "PATH",
		global = true,
		help = "Viewer page to open (default: app/index.html)"
	)]
	pub(crate) viewer: Option<PathBuf>,
	#[arg(
		short = 's',
		long,
		value_enum,
		global = true,
		help = "Initially selected style (default: random)"
	)]
	pub(crate) style: Option<StyleArg>,
	#[arg(
		long = "open",
		value_name = "BOOL",
		value_parser = BoolishValueParser::new(),
		global = true,
		help = "Open the viewer after writing the input file (default: enabled)"
	)]
	pub(crate) open: Option<bool>,
	#[arg(
		long = "no-open",
		global = true,
		conflicts_with = "open",
		help = "Only write the input file, never open the viewer"
	)]
	pub(crate) no_open: bool,
	#[arg(
		short = 'p',
		long = "print-config",
		global = true,
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		global = true,
		default_value_t = OutputFormat::Plain,
		help = "Choose how to print results"
	)]
	pub(crate) output: OutputFormat,
	#[arg(
		short = 'v',
		long = "verbose",
		action = ArgAction::Count,
		global = true,
		help = "Increase log verbosity (repeatable)"
	)]
	pub(crate) verbose: u8,
	#[arg(
		short = 'q',
		long = "quiet",
		global = true,
		conflicts_with = "verbose",
		help = "Only log errors"
	)]
	pub(crate) quiet: bool,
	#[command(subcommand)]
	pub(crate) command: Option<CommandArg>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
/// Actions the binary can perform.
pub(crate) enum CommandArg {
	/// Write the viewer input for a style and open the viewer.
	Draw {
		/// Style to draw with (default: the selected style).
		#[arg(value_enum, value_name = "STYLE")]
		choice: Option<StyleArg>,
	},
	/// List the available styles.
	Styles,
	/// Show the style recorded in the source and destination files.
	Status,
	/// Select and draw repeatedly from a prompt.
	Interactive,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Styles accepted on the command line.
pub(crate) enum StyleArg {
	Random,
	Polygon,
	#[value(alias = "topologically_sorted", alias = "topologically sorted")]
	TopologicallySorted,
}

impl From<StyleArg> for StyleOption {
	fn from(arg: StyleArg) -> Self {
		match arg {
			StyleArg::Random => StyleOption::Random,
			StyleArg::Polygon => StyleOption::Polygon,
			StyleArg::TopologicallySorted => StyleOption::TopologicallySorted,
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Output formats supported by the CLI utility.
pub(crate) enum OutputFormat {
	Plain,
	Json,
}
