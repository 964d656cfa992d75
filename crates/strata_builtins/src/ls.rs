//! `ls` / `dir` builtin - list the current directory
//!
//! Entries are sorted by name; directories are blue with a trailing `/`.

use strata_core::{Builtin, ShellContext, ShellResult};

pub struct LsCommand;

impl Builtin for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn help_text(&self) -> &'static str {
        "List directory contents"
    }

    fn execute(&self, ctx: &mut ShellContext, _args: &[String]) -> ShellResult<String> {
        let cwd = ctx.current_dir()?;
        let mut entries = ctx.fs.read_entries(&cwd)?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        let palette = ctx.palette();
        let lines: Vec<String> = entries
            .iter()
            .map(|entry| {
                if entry.is_dir {
                    palette.blue(&format!("{}/", entry.name))
                } else {
                    palette.green(&entry.name)
                }
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

impl LsCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LsCommand {
    fn default() -> Self {
        Self::new()
    }
}
