//! Custom command lifecycle builtins: `addcmd`, `rmcmd`, `listcmd`,
//! `refresh_commands`.

use strata_core::config::DEFAULT_HELP;
use strata_core::{Argument, Builtin, CustomCommand, ShellContext, ShellError, ShellResult};
use tracing::info;

/// Interactive: asks for name, template, help text and argument names.
pub struct AddCmdCommand;

impl Builtin for AddCmdCommand {
    fn name(&self) -> &'static str {
        "addcmd"
    }

    fn help_text(&self) -> &'static str {
        "Add a custom command"
    }

    fn execute(&self, ctx: &mut ShellContext, _args: &[String]) -> ShellResult<String> {
        let name = ask(ctx, "Enter command name: ")?;
        validate_command_name(&name)?;
        let template = ask(ctx, "Enter command to execute: ")?;
        if template.is_empty() {
            return Err(ShellError::usage("command to execute must not be empty"));
        }
        let help = ask(ctx, "Enter help text: ")?;
        let arg_names = ask(ctx, "Enter argument names (space-separated): ")?
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let help = if help.is_empty() { DEFAULT_HELP.to_string() } else { help };
        ctx.add_custom_command(CustomCommand::new(&name, &template, &help, arg_names))?;
        info!(command = %name, "custom command added");

        let palette = ctx.palette();
        let mut out = palette.green(&format!("Custom command '{name}' added successfully."));
        if ctx.commands.contains(&name) {
            out.push('\n');
            out.push_str(&palette.yellow(&format!("Note: the built-in '{name}' takes precedence over it.")));
        }
        Ok(out)
    }
}

impl AddCmdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AddCmdCommand {
    fn default() -> Self {
        Self::new()
    }
}

fn ask(ctx: &mut ShellContext, prompt: &str) -> ShellResult<String> {
    ctx.console
        .read_line(prompt)
        .map(|line| line.trim().to_string())
        .ok_or_else(|| ShellError::usage("input ended before the command was complete"))
}

/// A name must fit in a config section header.
fn validate_command_name(name: &str) -> ShellResult<()> {
    if name.is_empty() {
        return Err(ShellError::usage("command name must not be empty"));
    }
    if name.chars().any(|c| c.is_whitespace() || c == '[' || c == ']') {
        return Err(ShellError::usage(format!("'{name}' is not a valid command name")));
    }
    Ok(())
}

pub struct RmCmdCommand;

impl Builtin for RmCmdCommand {
    fn name(&self) -> &'static str {
        "rmcmd"
    }

    fn help_text(&self) -> &'static str {
        "Remove a custom command"
    }

    fn arguments(&self) -> Vec<Argument> {
        vec![Argument::required("name")]
    }

    fn execute(&self, ctx: &mut ShellContext, args: &[String]) -> ShellResult<String> {
        let name = &args[0];
        if ctx.remove_custom_command(name)? {
            info!(command = %name, "custom command removed");
            Ok(format!("Custom command '{name}' removed."))
        } else {
            Ok(ctx.palette().yellow(&format!("No custom command named '{name}'.")))
        }
    }
}

impl RmCmdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RmCmdCommand {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ListCmdCommand;

impl Builtin for ListCmdCommand {
    fn name(&self) -> &'static str {
        "listcmd"
    }

    fn help_text(&self) -> &'static str {
        "List all custom commands"
    }

    fn execute(&self, ctx: &mut ShellContext, _args: &[String]) -> ShellResult<String> {
        if ctx.custom.is_empty() {
            return Ok(ctx.palette().yellow("No custom commands defined."));
        }
        Ok(ctx
            .custom
            .iter()
            .map(|cmd| format!("{}: {}", cmd.name, cmd.help_text))
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

impl ListCmdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ListCmdCommand {
    fn default() -> Self {
        Self::new()
    }
}

pub struct RefreshCommandsCommand;

impl Builtin for RefreshCommandsCommand {
    fn name(&self) -> &'static str {
        "refresh_commands"
    }

    fn help_text(&self) -> &'static str {
        "Reload custom commands from the config file"
    }

    fn execute(&self, ctx: &mut ShellContext, _args: &[String]) -> ShellResult<String> {
        let palette = ctx.palette();
        ctx.console.print(&palette.cyan("Refreshing custom commands..."));
        let report = ctx.reload_custom_commands();
        let mut out = format!("Refresh complete. {} commands loaded successfully.", report.loaded);
        if !report.found {
            out.push('\n');
            out.push_str(&palette.yellow(&report.summary()));
        } else if !report.issues.is_empty() {
            out.push('\n');
            out.push_str(&palette.yellow("The following commands failed to load:"));
            for issue in &report.issues {
                out.push('\n');
                out.push_str(&palette.red(&format!("- {issue}")));
            }
        }
        Ok(out)
    }
}

impl RefreshCommandsCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RefreshCommandsCommand {
    fn default() -> Self {
        Self::new()
    }
}
