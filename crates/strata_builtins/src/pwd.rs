//! `pwd` builtin - print current working directory.

use strata_core::{Builtin, ShellContext, ShellResult};

pub struct PwdCommand;

impl Builtin for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn help_text(&self) -> &'static str {
        "Print working directory"
    }

    fn execute(&self, ctx: &mut ShellContext, _args: &[String]) -> ShellResult<String> {
        Ok(ctx.current_dir()?.display().to_string())
    }
}

impl PwdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PwdCommand {
    fn default() -> Self {
        Self::new()
    }
}
