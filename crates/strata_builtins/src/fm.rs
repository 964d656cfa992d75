//! `fm` builtin - run the file manager in the current directory.

use strata_core::{Builtin, ShellContext, ShellResult};
use strata_ui::file_manager::FileManager;

pub struct FmCommand;

impl Builtin for FmCommand {
    fn name(&self) -> &'static str {
        "fm"
    }

    fn help_text(&self) -> &'static str {
        "Open the file manager"
    }

    fn execute(&self, ctx: &mut ShellContext, _args: &[String]) -> ShellResult<String> {
        let start = ctx.current_dir()?;
        let mut manager = FileManager::new(start, ctx.fs.clone(), ctx.palette());
        Ok(manager.run(ctx.console.as_mut()))
    }
}

impl FmCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FmCommand {
    fn default() -> Self {
        Self::new()
    }
}
