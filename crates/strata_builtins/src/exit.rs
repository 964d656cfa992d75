//! `exit` builtin - end the session.
//!
//! Returns the farewell and asks the REPL to stop; the process then exits
//! with status 0.

use strata_core::{Builtin, ShellContext, ShellResult};
use strata_hal::terminal_width;
use strata_ui::banner;

pub struct ExitCommand;

impl Builtin for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn help_text(&self) -> &'static str {
        "Exit the shell"
    }

    fn execute(&self, ctx: &mut ShellContext, _args: &[String]) -> ShellResult<String> {
        ctx.request_exit();
        Ok(banner::farewell(&ctx.palette(), terminal_width()))
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}
