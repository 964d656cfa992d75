//! `clear` / `cls` builtin - Clear the terminal screen

use strata_core::{Builtin, ShellContext, ShellResult};

pub struct ClearCommand;

impl Builtin for ClearCommand {
    fn name(&self) -> &'static str {
        "clear"
    }

    fn help_text(&self) -> &'static str {
        "Clear the screen"
    }

    fn execute(&self, ctx: &mut ShellContext, _args: &[String]) -> ShellResult<String> {
        ctx.console.clear_screen();
        Ok(String::new())
    }
}

impl ClearCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClearCommand {
    fn default() -> Self {
        Self::new()
    }
}
