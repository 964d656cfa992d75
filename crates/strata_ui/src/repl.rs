//! Main read-eval-print loop
//!
//! Reads a line, hands it to the [`Dispatcher`] and prints every non-empty
//! output between blank lines. Ctrl-C keeps the session alive; `exit` and
//! end of input end it with status 0.

use std::io::Write;

use anyhow::Result;
use strata_core::{Dispatcher, LoadReport};
use strata_hal::terminal_width;
use tracing::{debug, info};

use crate::banner;
use crate::line_editor::{LineSource, ReadOutcome};
use crate::prompt;

pub const INTERRUPT_HINT: &str = "Use 'exit' to quit.";

pub struct Repl {
    dispatcher: Dispatcher,
    width: usize,
}

impl Repl {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher, width: terminal_width() }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Banner, hint and the result of loading the commands file.
    pub fn greet<W: Write>(&self, out: &mut W, report: &LoadReport) -> Result<()> {
        let ctx = self.dispatcher.context();
        let palette = ctx.palette();
        let delay = ctx.settings.typewriter_delay();
        for line in banner::welcome(&palette, self.width) {
            banner::typewriter(out, &line, delay)?;
        }
        writeln!(out, "{}", banner::hint(&palette))?;
        let summary = report.summary();
        let summary = if report.issues.is_empty() { palette.green(&summary) } else { palette.yellow(&summary) };
        writeln!(out, "{summary}")?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }

    /// Loop until the session ends; returns the process exit status.
    pub fn run<S: LineSource, W: Write>(&mut self, source: &mut S, out: &mut W) -> Result<i32> {
        loop {
            let cwd = self.dispatcher.context().current_dir().unwrap_or_default();
            let palette = self.dispatcher.context().palette();
            let full = prompt::render(&cwd, &palette);
            let (first, marker) = full.split_once('\n').unwrap_or(("", full.as_str()));
            writeln!(out, "{first}")?;
            out.flush()?;

            match source.read(marker)? {
                ReadOutcome::Line(line) => {
                    let mut failed = None;
                    self.dispatcher.run_line_with(&line, |output| {
                        if failed.is_none() {
                            if let Err(err) = write!(out, "\n{output}\n\n") {
                                failed = Some(err);
                            }
                        }
                    });
                    if let Some(err) = failed {
                        return Err(err.into());
                    }
                    out.flush()?;
                    if self.dispatcher.context().exit_requested() {
                        info!("session ended by exit");
                        return Ok(0);
                    }
                }
                ReadOutcome::Interrupted => {
                    debug!("interrupt at prompt");
                    writeln!(out, "{}", palette.yellow(INTERRUPT_HINT))?;
                }
                ReadOutcome::Eof => {
                    info!("session ended by end of input");
                    writeln!(out, "\n{}", banner::farewell(&palette, self.width))?;
                    out.flush()?;
                    return Ok(0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_editor::ScriptedLines;
    use strata_core::{Builtin, ScriptedConsole, ShellContext, ShellResult, ShellSettings};

    struct Exit;

    impl Builtin for Exit {
        fn name(&self) -> &'static str {
            "exit"
        }
        fn help_text(&self) -> &'static str {
            "Leave"
        }
        fn execute(&self, ctx: &mut ShellContext, _args: &[String]) -> ShellResult<String> {
            ctx.request_exit();
            Ok("bye".into())
        }
    }

    fn repl(dir: &std::path::Path) -> Repl {
        let settings = ShellSettings {
            commands_file: dir.join("commands.cfg"),
            color: false,
            typewriter_delay_ms: 0,
            ..ShellSettings::default()
        };
        let mut ctx = ShellContext::new(settings, Box::new(ScriptedConsole::default()));
        ctx.commands.register(std::sync::Arc::new(Exit));
        Repl::new(Dispatcher::new(ctx)).with_width(40)
    }

    #[test]
    fn exit_ends_with_status_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut repl = repl(dir.path());
        let mut lines = ScriptedLines::new(["exit", "never read"]);
        let mut out = Vec::new();
        assert_eq!(repl.run(&mut lines, &mut out).unwrap(), 0);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\nbye\n\n"));
        assert_eq!(lines.prompts, ["└─▶ "]);
    }

    #[test]
    fn interrupt_continues_and_eof_says_goodbye() {
        let dir = tempfile::tempdir().unwrap();
        let mut repl = repl(dir.path());
        let mut lines = ScriptedLines::default();
        lines.push(ReadOutcome::Interrupted);
        let mut out = Vec::new();
        assert_eq!(repl.run(&mut lines, &mut out).unwrap(), 0);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(INTERRUPT_HINT));
        assert!(text.contains("Goodbye!"));
        assert_eq!(lines.prompts.len(), 2);
    }

    #[test]
    fn greeting_reports_missing_commands_file() {
        let dir = tempfile::tempdir().unwrap();
        let repl = repl(dir.path());
        let report = LoadReport::missing(&dir.path().join("commands.cfg"));
        let mut out = Vec::new();
        repl.greet(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(banner::WELCOME_TITLE));
        assert!(text.contains("Type 'help' for a list of commands."));
        assert!(text.contains("Custom commands will not be loaded."));
    }
}
