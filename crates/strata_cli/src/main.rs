use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use strata_builtins::register_all;
use strata_core::{logging, Dispatcher, ShellContext, ShellSettings};
use strata_ui::{Repl, StdConsole, StrataLineEditor};
use tracing::info;

/// Strata interactive shell.
#[derive(Parser, Debug)]
#[command(author, version, about = "Strata interactive shell", long_about = None)]
struct Cli {}

fn main() -> anyhow::Result<ExitCode> {
    let _cli = Cli::parse();

    let settings = ShellSettings::load().context("failed to load settings")?;
    let _log_guard = logging::init(&settings);
    info!(commands_file = %settings.commands_file.display(), "starting strata");

    let mut ctx = ShellContext::new(settings, Box::new(StdConsole::new()));
    register_all(&mut ctx.commands);
    let report = ctx.load_config();

    let mut repl = Repl::new(Dispatcher::new(ctx));
    let mut stdout = io::stdout();
    repl.greet(&mut stdout, &report)?;

    let mut editor = StrataLineEditor::new().context("failed to initialise line editor")?;
    let status = repl.run(&mut editor, &mut stdout)?;
    Ok(ExitCode::from(u8::try_from(status).unwrap_or(1)))
}
