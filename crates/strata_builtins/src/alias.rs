//! `alias` and `unalias` builtins
//!
//! Both persist the alias table immediately. A failed write is reported but
//! the in-memory change stays.

use strata_core::{Argument, Builtin, ShellContext, ShellResult};
use tracing::info;

/// The `alias` builtin command implementation
pub struct AliasCommand;

impl Builtin for AliasCommand {
    fn name(&self) -> &'static str {
        "alias"
    }

    fn help_text(&self) -> &'static str {
        "Create an alias for a command"
    }

    fn arguments(&self) -> Vec<Argument> {
        vec![Argument::required("name"), Argument::required("command")]
    }

    fn execute(&self, ctx: &mut ShellContext, args: &[String]) -> ShellResult<String> {
        let name = &args[0];
        let command = args[1..].join(" ");
        ctx.add_alias(name, &command)?;
        info!(alias = %name, expansion = %command, "alias created");
        Ok(format!("Alias created: {name} -> {command}"))
    }
}

impl AliasCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AliasCommand {
    fn default() -> Self {
        Self::new()
    }
}

pub struct UnaliasCommand;

impl Builtin for UnaliasCommand {
    fn name(&self) -> &'static str {
        "unalias"
    }

    fn help_text(&self) -> &'static str {
        "Remove an alias"
    }

    fn arguments(&self) -> Vec<Argument> {
        vec![Argument::required("name")]
    }

    fn execute(&self, ctx: &mut ShellContext, args: &[String]) -> ShellResult<String> {
        let name = &args[0];
        if ctx.remove_alias(name)? {
            Ok(format!("Alias removed: {name}"))
        } else {
            Ok(ctx.palette().yellow(&format!("No alias named '{name}'.")))
        }
    }
}

impl UnaliasCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UnaliasCommand {
    fn default() -> Self {
        Self::new()
    }
}
