//! `history` and `search` builtins over the session history.

use strata_core::history::numbered;
use strata_core::{Argument, Builtin, Palette, ShellContext, ShellResult};

pub struct HistoryCommand;

impl Builtin for HistoryCommand {
    fn name(&self) -> &'static str {
        "history"
    }

    fn help_text(&self) -> &'static str {
        "Show command history"
    }

    fn execute(&self, ctx: &mut ShellContext, _args: &[String]) -> ShellResult<String> {
        let palette = ctx.palette();
        let entries = ctx.history.entries().iter().map(String::as_str);
        Ok(render(numbered(entries), &palette))
    }
}

impl HistoryCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HistoryCommand {
    fn default() -> Self {
        Self::new()
    }
}

/// Substring search over the history, numbered over the matches.
pub struct SearchCommand;

impl Builtin for SearchCommand {
    fn name(&self) -> &'static str {
        "search"
    }

    fn help_text(&self) -> &'static str {
        "Search command history"
    }

    fn arguments(&self) -> Vec<Argument> {
        vec![Argument::required("query")]
    }

    fn execute(&self, ctx: &mut ShellContext, args: &[String]) -> ShellResult<String> {
        let query = args.join(" ");
        let hits = numbered(ctx.history.search(&query));
        if hits.is_empty() {
            return Ok(ctx.palette().yellow(&format!("No matches for '{query}'.")));
        }
        Ok(render(hits, &ctx.palette()))
    }
}

impl SearchCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SearchCommand {
    fn default() -> Self {
        Self::new()
    }
}

fn render(lines: Vec<(usize, &str)>, palette: &Palette) -> String {
    lines
        .into_iter()
        .map(|(i, cmd)| format!("{}: {}", palette.yellow(&i.to_string()), cmd))
        .collect::<Vec<_>>()
        .join("\n")
}
