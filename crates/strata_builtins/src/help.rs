//! `help` builtin
//!
//! Without an argument: a listing of base commands, custom commands and
//! aliases under a header sized to the terminal. With one: the detailed
//! help of that built-in or custom command.

use strata_core::{Argument, Builtin, CustomCommand, Palette, RegisteredCommand, ShellContext, ShellResult};
use strata_hal::terminal_width;

pub struct HelpCommand;

impl Builtin for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn help_text(&self) -> &'static str {
        "Show help for commands"
    }

    fn arguments(&self) -> Vec<Argument> {
        vec![Argument::optional("command", "")]
    }

    fn execute(&self, ctx: &mut ShellContext, args: &[String]) -> ShellResult<String> {
        let palette = ctx.palette();
        let width = terminal_width();
        let topic = args[0].trim();
        if topic.is_empty() {
            return Ok(overview(ctx, &palette, width));
        }
        if let Some(cmd) = ctx.commands.get(topic) {
            return Ok(builtin_detail(cmd, &palette, width));
        }
        if let Some(cmd) = ctx.custom.get(topic) {
            return Ok(custom_detail(cmd, &palette, width));
        }
        if let Some(expansion) = ctx.aliases.get(topic) {
            return Ok(format!("{} is an alias for '{}'", palette.bold(topic), expansion));
        }
        Ok(palette.red(&format!("No help available for '{topic}'.")))
    }
}

impl HelpCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HelpCommand {
    fn default() -> Self {
        Self::new()
    }
}

/// `==== TEXT ====` spanning roughly `width` columns.
pub fn header(text: &str, width: usize, palette: &Palette) -> String {
    let padding = "=".repeat(width.saturating_sub(text.chars().count() + 2) / 2);
    palette.heading(&format!("{padding} {text} {padding}"))
}

fn section<'a, I>(title: &str, rows: I, palette: &Palette) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let rows: Vec<_> = rows.into_iter().collect();
    let widest = rows.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);
    let mut out = format!("{}\n", palette.yellow(&format!("{title}:")));
    for (name, text) in rows {
        out.push_str(&format!("  {} : {}\n", palette.green(&format!("{name:<widest$}")), text));
    }
    out
}

fn overview(ctx: &ShellContext, palette: &Palette, width: usize) -> String {
    let mut out = format!("{}\n\n", header("STRATA SHELL HELP", width, palette));

    let base = ctx
        .commands
        .iter()
        .filter(|c| c.name != "help")
        .map(|c| (c.name.as_str(), c.help_text.as_str()));
    out.push_str(&section("Base Commands", base, palette));

    if !ctx.custom.is_empty() {
        out.push('\n');
        let custom = ctx.custom.iter().map(|c| (c.name.as_str(), c.help_text.as_str()));
        out.push_str(&section("Custom Commands", custom, palette));
    }

    if !ctx.aliases.is_empty() {
        out.push('\n');
        out.push_str(&section("Aliases", ctx.aliases.iter(), palette));
    }

    out.push_str(&format!(
        "\n{} {}\n",
        palette.cyan("For more information on a specific command, type:"),
        palette.bold("help <command>")
    ));
    out.push_str(&"=".repeat(width));
    out
}

fn builtin_detail(cmd: &RegisteredCommand, palette: &Palette, width: usize) -> String {
    let mut out = format!("{}\n\n", header(&format!("HELP: {}", cmd.name.to_uppercase()), width, palette));
    out.push_str(&format!("{} {}\n\n", palette.cyan("Usage:"), cmd.synopsis()));
    out.push_str(&format!("{}\n  {}", palette.yellow("Description:"), cmd.help_text));
    if !cmd.arguments.is_empty() {
        out.push_str(&format!("\n\n{}", palette.magenta("Arguments:")));
        for arg in &cmd.arguments {
            let status = if arg.required { palette.green("Required") } else { palette.blue("Optional") };
            let default = match &arg.default {
                Some(d) if !d.is_empty() => format!(" (Default: {d})"),
                _ => String::new(),
            };
            out.push_str(&format!("\n  {}: {}{}", palette.bold(&arg.name), status, default));
        }
    }
    out
}

fn custom_detail(cmd: &CustomCommand, palette: &Palette, width: usize) -> String {
    let mut out = format!("{}\n\n", header(&format!("HELP: {}", cmd.name.to_uppercase()), width, palette));
    out.push_str(&format!("{} {}\n\n", palette.cyan("Usage:"), cmd.synopsis()));
    out.push_str(&format!("{}\n  {}", palette.yellow("Description:"), cmd.help_text));
    if !cmd.arg_names.is_empty() {
        out.push_str(&format!("\n\n{}", palette.magenta("Arguments:")));
        for (i, name) in cmd.arg_names.iter().enumerate() {
            out.push_str(&format!("\n  {}: ${}", palette.bold(name), i + 1));
        }
    }
    out.push_str(&format!("\n\n{} {}", palette.cyan("Runs:"), cmd.template));
    out
}
