//! User-defined custom commands
//!
//! A custom command is a template with `$1`, `$2`, ... placeholders. After
//! substitution the line either runs through the host shell or, when it
//! starts with [`INLINE_MARKER`] and inline evaluation is enabled, through
//! the inline evaluator.

use std::collections::BTreeMap;

use strata_hal::HostShell;
use tracing::{debug, warn};

use crate::error::{ShellError, ShellResult};
use crate::inline;
use crate::settings::ShellSettings;

/// Prefix that selects the inline evaluator.
pub const INLINE_MARKER: &str = "inline -c ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomCommand {
    pub name: String,
    pub template: String,
    pub help_text: String,
    pub arg_names: Vec<String>,
}

/// How a rendered template is executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionMode {
    Inline(String),
    Shell(String),
}

impl ExecutionMode {
    pub fn classify(rendered: &str) -> Self {
        match rendered.strip_prefix(INLINE_MARKER) {
            Some(script) => ExecutionMode::Inline(strip_quotes(script.trim()).to_string()),
            None => ExecutionMode::Shell(rendered.to_string()),
        }
    }
}

/// Drop one matching pair of outer quotes; quotes inside the script are kept.
fn strip_quotes(script: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = script.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            return inner;
        }
    }
    script
}

impl CustomCommand {
    pub fn new(name: &str, template: &str, help_text: &str, arg_names: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            template: template.to_string(),
            help_text: help_text.to_string(),
            arg_names,
        }
    }

    /// Substitute `$k` with the k-th argument (1-based). The whole digit run
    /// is the index, so `$10` is never read as `$1` followed by `0`; indices
    /// with no argument are left as written.
    pub fn render(&self, args: &[String]) -> String {
        let template = self.template.as_str();
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            let digits = after.chars().take_while(char::is_ascii_digit).count();
            let replacement = after[..digits]
                .parse::<usize>()
                .ok()
                .filter(|&k| k >= 1)
                .and_then(|k| args.get(k - 1));
            match replacement {
                Some(arg) => out.push_str(arg),
                None => out.push_str(&rest[pos..pos + 1 + digits]),
            }
            rest = &after[digits..];
        }
        out.push_str(rest);
        out
    }

    /// `name <arg1> <arg2>` followed by the help text.
    pub fn usage(&self) -> String {
        format!("{}\n  {}", self.synopsis(), self.help_text)
    }

    pub fn synopsis(&self) -> String {
        let mut parts = vec![self.name.clone()];
        parts.extend(self.arg_names.iter().map(|a| format!("<{a}>")));
        parts.join(" ")
    }

    /// Render and run. Output is returned verbatim; failures are rendered as
    /// `Error executing {name}: {message}`.
    pub fn execute(&self, args: &[String], host: &dyn HostShell, settings: &ShellSettings) -> String {
        match self.run(args, host, settings) {
            Ok(output) => output,
            Err(err) => {
                warn!(command = %self.name, kind = %err.kind, "custom command failed: {}", err);
                format!("Error executing {}: {}", self.name, err)
            }
        }
    }

    pub fn run(&self, args: &[String], host: &dyn HostShell, settings: &ShellSettings) -> ShellResult<String> {
        let rendered = self.render(args);
        match ExecutionMode::classify(&rendered) {
            ExecutionMode::Inline(script) => {
                if !settings.inline_eval {
                    return Err(ShellError::execution(format!(
                        "inline evaluation is disabled; enable inline_eval only if you trust {}",
                        settings.commands_file.display()
                    )));
                }
                debug!(command = %self.name, "running inline script");
                inline::evaluate(&script)
            }
            ExecutionMode::Shell(line) => {
                debug!(command = %self.name, line = %line, "running through host shell");
                let output = host.run(&line, settings.custom_timeout())?;
                Ok(output.stdout + &output.stderr)
            }
        }
    }
}

/// Custom commands by name, sorted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CustomCommandRegistry {
    commands: BTreeMap<String, CustomCommand>,
}

impl CustomCommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert, replacing any command with the same name.
    pub fn insert(&mut self, command: CustomCommand) -> Option<CustomCommand> {
        self.commands.insert(command.name.clone(), command)
    }

    pub fn remove(&mut self, name: &str) -> Option<CustomCommand> {
        self.commands.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&CustomCommand> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomCommand> {
        self.commands.values()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl FromIterator<CustomCommand> for CustomCommandRegistry {
    fn from_iter<I: IntoIterator<Item = CustomCommand>>(iter: I) -> Self {
        let mut registry = Self::new();
        for command in iter {
            registry.insert(command);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Mutex;
    use std::time::Duration;
    use strata_hal::{HalError, HalResult, HostOutput};

    #[derive(Default)]
    struct RecordingShell {
        lines: Mutex<Vec<(String, Option<Duration>)>>,
    }

    impl HostShell for RecordingShell {
        fn run(&self, line: &str, timeout: Option<Duration>) -> HalResult<HostOutput> {
            self.lines.lock().unwrap().push((line.to_string(), timeout));
            if line.starts_with("slow") {
                return Err(HalError::TimedOut(timeout.unwrap_or_default()));
            }
            Ok(HostOutput { stdout: format!("out:{line}\n"), stderr: "warn\n".into(), status: Some(0) })
        }
    }

    fn cmd(template: &str) -> CustomCommand {
        CustomCommand::new("t", template, "test", vec![])
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn placeholders_are_replaced() {
        assert_eq!(cmd("git log -n $1").render(&args(&["5"])), "git log -n 5");
        assert_eq!(cmd("cp $1 $2 && echo $1").render(&args(&["a", "b"])), "cp a b && echo a");
    }

    #[test]
    fn missing_arguments_stay_literal() {
        assert_eq!(cmd("echo $1 $2").render(&args(&["x"])), "echo x $2");
        assert_eq!(cmd("echo $0 $ $HOME").render(&args(&["x"])), "echo $0 $ $HOME");
    }

    #[test]
    fn ten_does_not_match_one() {
        let many: Vec<String> = (1..=10).map(|i| format!("a{i}")).collect();
        assert_eq!(cmd("$1 $10").render(&many), "a1 a10");
        assert_eq!(cmd("$1 $10").render(&args(&["x"])), "x $10");
    }

    #[test]
    fn shell_mode_returns_stdout_and_stderr_verbatim() {
        let host = RecordingShell::default();
        let settings = ShellSettings::default();
        let out = cmd("ls $1").execute(&args(&["/tmp"]), &host, &settings);
        assert_eq!(out, "out:ls /tmp\nwarn\n");
        assert_eq!(host.lines.lock().unwrap()[0], ("ls /tmp".to_string(), None));
    }

    #[test]
    fn custom_timeout_is_applied_when_configured() {
        let host = RecordingShell::default();
        let settings = ShellSettings { custom_timeout_secs: Some(2), ..ShellSettings::default() };
        let out = cmd("slow").execute(&[], &host, &settings);
        assert_eq!(out, "Error executing t: timed out after 2 seconds");
    }

    #[test]
    fn inline_mode_is_disabled_by_default() {
        let host = RecordingShell::default();
        let out = cmd("inline -c \"result = 1 + 1\"").execute(&[], &host, &ShellSettings::default());
        assert!(out.starts_with("Error executing t: inline evaluation is disabled"));
        assert!(host.lines.lock().unwrap().is_empty());
    }

    #[test]
    fn inline_mode_runs_when_enabled() {
        let host = RecordingShell::default();
        let settings = ShellSettings { inline_eval: true, ..ShellSettings::default() };
        let out = cmd("inline -c \"result = $1 * 2\"").execute(&args(&["21"]), &host, &settings);
        assert_eq!(out, "42");
    }

    #[test]
    fn inner_quotes_survive_outer_quote_removal() {
        let host = RecordingShell::default();
        let settings = ShellSettings { inline_eval: true, ..ShellSettings::default() };
        let out = cmd("inline -c \"result = 'hello'\"").execute(&[], &host, &settings);
        assert_eq!(out, "hello");
        assert_eq!(
            ExecutionMode::classify("inline -c 'greeting = \"hi\"'"),
            ExecutionMode::Inline("greeting = \"hi\"".into())
        );
        assert_eq!(ExecutionMode::classify("inline -c \"x = 1"), ExecutionMode::Inline("\"x = 1".into()));
    }

    #[test]
    fn classification() {
        assert_eq!(ExecutionMode::classify("inline -c 'x = 1'"), ExecutionMode::Inline("x = 1".into()));
        assert_eq!(ExecutionMode::classify("inline x"), ExecutionMode::Shell("inline x".into()));
    }

    #[test]
    fn usage_lists_argument_names() {
        let c = CustomCommand::new("gl", "git log -n $1", "Show last N commits", vec!["count".into()]);
        assert_eq!(c.usage(), "gl <count>\n  Show last N commits");
    }

    #[test]
    fn registry_replaces_in_place() {
        let mut reg = CustomCommandRegistry::new();
        reg.insert(CustomCommand::new("b", "echo 1", "", vec![]));
        reg.insert(CustomCommand::new("a", "echo 2", "", vec![]));
        assert!(reg.insert(CustomCommand::new("b", "echo 3", "", vec![])).is_some());
        let names: Vec<_> = reg.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(reg.get("b").unwrap().template, "echo 3");
    }

    proptest! {
        #[test]
        fn positional_substitution(words in prop::collection::vec("[a-z0-9]{1,8}", 1..12), extra in 1usize..4) {
            let n = words.len();
            let template: Vec<String> = (1..=n + extra).map(|k| format!("${k}")).collect();
            let rendered = cmd(&template.join(" ")).render(&words);
            let mut expected = words.clone();
            expected.extend((n + 1..=n + extra).map(|k| format!("${k}")));
            prop_assert_eq!(rendered, expected.join(" "));
        }
    }
}
