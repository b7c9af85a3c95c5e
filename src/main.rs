mod cli;
mod settings;

use std::io;

use anyhow::{Context, Result};
use cli::{CliArgs, CommandArg, FileStatus, OutputFormat, parse_cli, print_draw, print_status, print_styles};
use drawgraph::{Session, StyleOption, logging};
use settings::ResolvedConfig;

fn main() -> Result<()> {
	let cli = parse_cli();
	logging::initialize(logging::level_for(cli.verbose, cli.quiet));

	let command = cli.command.clone().unwrap_or(CommandArg::Interactive);

	if command == CommandArg::Styles && !cli.print_config {
		return print_styles(cli.output, settings::listing_style(&cli));
	}

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	match command {
		CommandArg::Styles => print_styles(cli.output, resolved.default_style),
		CommandArg::Draw { choice } => {
			run_draw(&cli, resolved, choice.map(StyleOption::from))
		}
		CommandArg::Status => run_status(cli.output, &resolved),
		CommandArg::Interactive => run_interactive(resolved),
	}
}

/// Patch once with `style` (or the configured default) and open the viewer.
fn run_draw(cli: &CliArgs, settings: ResolvedConfig, style: Option<StyleOption>) -> Result<()> {
	let session = Session::new(settings.draw_target())
		.with_selection(style.unwrap_or(settings.default_style));

	let report = session
		.draw()
		.with_context(|| format!("failed to draw graph as {}", session.selected()))?;
	print_draw(cli.output, &report)
}

fn run_status(format: OutputFormat, settings: &ResolvedConfig) -> Result<()> {
	let source = FileStatus::inspect(&settings.source);
	let destination = FileStatus::inspect(&settings.destination);
	print_status(format, &source, &destination)
}

/// Keep a session open on the terminal until the user quits.
fn run_interactive(settings: ResolvedConfig) -> Result<()> {
	let mut session =
		Session::new(settings.draw_target()).with_selection(settings.default_style);

	session
		.run_interactive(io::stdin().lock(), io::stdout().lock())
		.context("terminal session failed")
}
