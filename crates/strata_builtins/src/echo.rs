//! `echo` builtin - print the arguments

use strata_core::{Argument, Builtin, ShellContext, ShellResult};

pub struct EchoCommand;

impl Builtin for EchoCommand {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn help_text(&self) -> &'static str {
        "Display a line of text"
    }

    fn arguments(&self) -> Vec<Argument> {
        vec![Argument::optional("text", "")]
    }

    fn execute(&self, _ctx: &mut ShellContext, args: &[String]) -> ShellResult<String> {
        Ok(args.join(" "))
    }
}

impl EchoCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EchoCommand {
    fn default() -> Self {
        Self::new()
    }
}
