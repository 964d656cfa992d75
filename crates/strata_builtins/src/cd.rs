//! `cd` builtin command - change directory
//!
//! Supports `~` and `~/path` for the home directory. Relative paths resolve
//! against the process working directory.

use std::env;
use std::path::PathBuf;

use strata_core::{Argument, Builtin, ShellContext, ShellError, ShellResult};
use tracing::debug;

/// The `cd` builtin command implementation
pub struct CdCommand;

impl Builtin for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn help_text(&self) -> &'static str {
        "Change the current directory"
    }

    fn arguments(&self) -> Vec<Argument> {
        vec![Argument::optional("path", ".")]
    }

    fn execute(&self, ctx: &mut ShellContext, args: &[String]) -> ShellResult<String> {
        let target = expand_home(&args[0])?;
        env::set_current_dir(&target)
            .map_err(|e| ShellError::filesystem(format!("{}: {}", target.display(), e)))?;
        let now = ctx.current_dir()?;
        debug!(dir = %now.display(), "working directory changed");
        Ok(format!("Changed directory to {}", now.display()))
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

/// `~` and `~/rest` become paths under the home directory.
pub fn expand_home(path: &str) -> ShellResult<PathBuf> {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return Ok(PathBuf::from(path)),
    };
    let home = dirs::home_dir().ok_or_else(|| ShellError::filesystem("home directory is not known"))?;
    let rest = rest.trim_start_matches(&['/', '\\'][..]);
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expansion() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_home("~").unwrap(), home);
        assert_eq!(expand_home("~/src").unwrap(), home.join("src"));
        assert_eq!(expand_home("~user").unwrap(), PathBuf::from("~user"));
        assert_eq!(expand_home("/tmp").unwrap(), PathBuf::from("/tmp"));
    }
}
