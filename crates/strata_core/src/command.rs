//! Built-in command schema and registry
//!
//! A built-in is a type implementing [`Builtin`]. It is registered once at
//! startup under one or more names; the registry snapshots its argument
//! schema and enforces the invocation contract:
//!
//! 1. fewer arguments than required → the usage text, handler not called;
//! 2. missing optional arguments are filled with their defaults;
//! 3. handler errors become `Error executing {name}: {message}`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::context::ShellContext;
use crate::error::ShellResult;

/// One declared argument of a built-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub required: bool,
    pub default: Option<String>,
}

impl Argument {
    /// A required argument never carries a default.
    pub fn required(name: &str) -> Self {
        Self { name: name.to_string(), required: true, default: None }
    }

    /// An optional argument always resolves to a value, possibly empty.
    pub fn optional(name: &str, default: &str) -> Self {
        Self { name: name.to_string(), required: false, default: Some(default.to_string()) }
    }

    /// `<name>` when required, `[name]` otherwise.
    pub fn placeholder(&self) -> String {
        if self.required {
            format!("<{}>", self.name)
        } else {
            format!("[{}]", self.name)
        }
    }
}

/// Builtin command trait for shell builtins
pub trait Builtin: Send + Sync {
    /// Primary name of the builtin
    fn name(&self) -> &'static str;

    /// One-line description shown in help listings
    fn help_text(&self) -> &'static str;

    /// Declared arguments, required ones first
    fn arguments(&self) -> Vec<Argument> {
        Vec::new()
    }

    /// Run with the resolved argument list (defaults already applied,
    /// surplus arguments passed through).
    fn execute(&self, ctx: &mut ShellContext, args: &[String]) -> ShellResult<String>;
}

/// A builtin bound to the name it was registered under.
#[derive(Clone)]
pub struct RegisteredCommand {
    pub name: String,
    pub help_text: String,
    pub arguments: Vec<Argument>,
    handler: Arc<dyn Builtin>,
}

impl fmt::Debug for RegisteredCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredCommand")
            .field("name", &self.name)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

impl RegisteredCommand {
    fn new(name: &str, handler: Arc<dyn Builtin>) -> Self {
        Self {
            name: name.to_string(),
            help_text: handler.help_text().to_string(),
            arguments: handler.arguments(),
            handler,
        }
    }

    pub fn required_count(&self) -> usize {
        self.arguments.iter().filter(|a| a.required).count()
    }

    /// `name <req> [opt]`
    pub fn synopsis(&self) -> String {
        let mut parts = vec![self.name.clone()];
        parts.extend(self.arguments.iter().map(Argument::placeholder));
        parts.join(" ")
    }

    /// Short usage text returned when required arguments are missing.
    pub fn usage(&self) -> String {
        let mut text = format!("{}\n  {}", self.synopsis(), self.help_text);
        for arg in &self.arguments {
            let status = match (&arg.required, &arg.default) {
                (true, _) => "Required".to_string(),
                (false, default) => format!("Optional, default: {}", default.as_deref().unwrap_or("")),
            };
            text.push_str(&format!("\n  {}: {}", arg.name, status));
        }
        text
    }

    /// Apply defaults, or `None` when required arguments are missing.
    pub fn resolve_args(&self, given: &[String]) -> Option<Vec<String>> {
        if given.len() < self.required_count() {
            return None;
        }
        let mut args = given.to_vec();
        for arg in self.arguments.iter().skip(given.len()) {
            args.push(arg.default.clone().unwrap_or_default());
        }
        Some(args)
    }

    /// Execute under the built-in contract; never fails.
    pub fn invoke(&self, ctx: &mut ShellContext, given: &[String]) -> String {
        let Some(args) = self.resolve_args(given) else {
            debug!(command = %self.name, given = given.len(), "too few arguments, showing usage");
            return self.usage();
        };
        match self.handler.execute(ctx, &args) {
            Ok(output) => output,
            Err(err) => {
                warn!(command = %self.name, kind = %err.kind, "builtin failed: {}", err);
                format!("Error executing {}: {}", self.name, err)
            }
        }
    }
}

/// Name-keyed registry that remembers registration order for help listings.
#[derive(Debug, Default, Clone)]
pub struct CommandRegistry {
    commands: Vec<RegisteredCommand>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register under the builtin's own name.
    pub fn register(&mut self, handler: Arc<dyn Builtin>) {
        let name = handler.name();
        self.register_as(name, handler);
    }

    /// Register under an extra name (e.g. `dir` for `ls`). Re-registering a
    /// name replaces the previous entry in place.
    pub fn register_as(&mut self, name: &str, handler: Arc<dyn Builtin>) {
        let entry = RegisteredCommand::new(name, handler);
        match self.index.get(name) {
            Some(&pos) => self.commands[pos] = entry,
            None => {
                self.index.insert(name.to_string(), self.commands.len());
                self.commands.push(entry);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredCommand> {
        self.index.get(name).map(|&pos| &self.commands[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredCommand> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use crate::error::ShellError;
    use crate::settings::ShellSettings;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Greet {
        calls: AtomicUsize,
    }

    impl Builtin for Greet {
        fn name(&self) -> &'static str {
            "greet"
        }
        fn help_text(&self) -> &'static str {
            "Greet someone"
        }
        fn arguments(&self) -> Vec<Argument> {
            vec![Argument::required("who"), Argument::optional("punct", "!")]
        }
        fn execute(&self, _ctx: &mut ShellContext, args: &[String]) -> ShellResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if args[0] == "nobody" {
                return Err(ShellError::execution("nobody to greet"));
            }
            Ok(format!("hello {}{}", args[0], args[1]))
        }
    }

    fn context() -> ShellContext {
        ShellContext::new(ShellSettings::default(), Box::new(ScriptedConsole::default()))
    }

    fn greet_entry() -> (Arc<Greet>, RegisteredCommand) {
        let greet = Arc::new(Greet { calls: AtomicUsize::new(0) });
        let mut registry = CommandRegistry::new();
        registry.register(greet.clone());
        let entry = registry.get("greet").cloned().unwrap();
        (greet, entry)
    }

    #[test]
    fn too_few_arguments_returns_usage_without_calling_handler() {
        let (greet, entry) = greet_entry();
        let mut ctx = context();
        let out = entry.invoke(&mut ctx, &[]);
        assert_eq!(
            out,
            "greet <who> [punct]\n  Greet someone\n  who: Required\n  punct: Optional, default: !"
        );
        assert_eq!(greet.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn defaults_fill_missing_optionals_and_surplus_passes_through() {
        let (_, entry) = greet_entry();
        assert_eq!(entry.resolve_args(&["bob".into()]).unwrap(), vec!["bob", "!"]);
        assert_eq!(
            entry.resolve_args(&["a".into(), "?".into(), "extra".into()]).unwrap(),
            vec!["a", "?", "extra"]
        );
        let mut ctx = context();
        assert_eq!(entry.invoke(&mut ctx, &["bob".into()]), "hello bob!");
    }

    #[test]
    fn handler_errors_are_rendered() {
        let (_, entry) = greet_entry();
        let mut ctx = context();
        assert_eq!(entry.invoke(&mut ctx, &["nobody".into()]), "Error executing greet: nobody to greet");
    }

    #[test]
    fn extra_names_and_replacement_keep_order() {
        let greet: Arc<dyn Builtin> = Arc::new(Greet { calls: AtomicUsize::new(0) });
        let mut registry = CommandRegistry::new();
        registry.register(greet.clone());
        registry.register_as("hi", greet.clone());
        registry.register(greet);
        let names: Vec<_> = registry.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["greet", "hi"]);
        assert_eq!(registry.get("hi").unwrap().synopsis(), "hi <who> [punct]");
    }
}
