//! Command dispatch
//!
//! Resolution order for the head word of a line: alias (rewrite and
//! recurse), built-in, custom command, then the host shell. Every path ends
//! in text; nothing here fails the session.

use tracing::{debug, warn};

use crate::alias::MAX_ALIAS_DEPTH;
use crate::context::ShellContext;
use crate::error::ShellError;
use crate::style::Palette;

/// Separator for several commands on one input line.
pub const COMMAND_SEPARATOR: &str = "&&";

pub struct Dispatcher {
    ctx: ShellContext,
}

impl Dispatcher {
    pub fn new(ctx: ShellContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &ShellContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut ShellContext {
        &mut self.ctx
    }

    pub fn into_context(self) -> ShellContext {
        self.ctx
    }

    /// Execute one command; an empty string means there is nothing to print.
    pub fn execute(&mut self, line: &str) -> String {
        self.dispatch(line.trim(), 0)
    }

    fn dispatch(&mut self, line: &str, depth: usize) -> String {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return String::new();
        };
        let rest: Vec<&str> = words.collect();

        if let Some(expanded) = self.ctx.aliases.expand(head, &rest) {
            if depth >= MAX_ALIAS_DEPTH {
                let err = ShellError::alias_cycle(head, MAX_ALIAS_DEPTH);
                warn!(alias = head, "{}", err);
                return self.ctx.palette().red(&format!("Error: {err}"));
            }
            debug!(alias = head, expanded = %expanded, depth, "alias expanded");
            return self.dispatch(&expanded, depth + 1);
        }

        let args: Vec<String> = rest.iter().map(|s| s.to_string()).collect();

        if let Some(builtin) = self.ctx.commands.get(head).cloned() {
            debug!(command = head, args = args.len(), "dispatching builtin");
            return builtin.invoke(&mut self.ctx, &args);
        }

        if let Some(custom) = self.ctx.custom.get(head).cloned() {
            debug!(command = head, args = args.len(), "dispatching custom command");
            return custom.execute(&args, self.ctx.host.as_ref(), &self.ctx.settings);
        }

        debug!(command = head, "not a shell command, forwarding to host shell");
        self.fallback(line)
    }

    fn fallback(&self, line: &str) -> String {
        let palette = self.ctx.palette();
        let timeout = self.ctx.settings.fallback_timeout();
        match self.ctx.host.run(line, Some(timeout)) {
            Ok(output) => format_host_output(&output.stdout, &output.stderr, &palette),
            Err(err) if err.is_timeout() => {
                warn!(line, secs = timeout.as_secs(), "host command timed out");
                palette.red(&format!("Command execution timed out after {} seconds.", timeout.as_secs()))
            }
            Err(err) => {
                warn!(line, "host command failed: {}", err);
                palette.red(&format!("Error executing command: {err}"))
            }
        }
    }

    /// Run every `&&` segment of `input` in order, recording each in history
    /// before it runs and handing non-empty output to `emit`. Stops once a
    /// command asks the session to end.
    pub fn run_line_with<F>(&mut self, input: &str, mut emit: F)
    where
        F: FnMut(&str),
    {
        for command in split_commands(input) {
            self.ctx.history.push(command);
            let output = self.execute(command);
            if !output.is_empty() {
                emit(&output);
            }
            if self.ctx.exit_requested() {
                debug!("exit requested, dropping remaining commands");
                break;
            }
        }
    }

    /// Like [`run_line_with`](Self::run_line_with), collecting the outputs.
    pub fn run_line(&mut self, input: &str) -> Vec<String> {
        let mut outputs = Vec::new();
        self.run_line_with(input, |out| outputs.push(out.to_string()));
        outputs
    }
}

/// Trimmed, non-blank `&&` segments.
pub fn split_commands(input: &str) -> Vec<&str> {
    input
        .split(COMMAND_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Labelled stdout/stderr blocks, each only when non-empty, trimmed.
pub fn format_host_output(stdout: &str, stderr: &str, palette: &Palette) -> String {
    let mut out = String::new();
    if !stdout.is_empty() {
        out.push_str(&format!("{}\n{}\n", palette.green("Command Output:"), stdout));
    }
    if !stderr.is_empty() {
        out.push_str(&format!("{}\n{}\n", palette.red("Error Output:"), stderr));
    }
    out.trim().to_string()
}
