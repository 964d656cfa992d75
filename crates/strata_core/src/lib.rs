//! Strata Core Library
//!
//! Command resolution and execution for the Strata shell: built-in schema
//! and registry, aliases, config-backed custom commands, the config store,
//! session settings and logging, and the [`Dispatcher`] that ties them
//! together. Terminal presentation lives in `strata_ui`.

// Re-export commonly used types and functions
pub use alias::{AliasTable, MAX_ALIAS_DEPTH};
pub use command::{Argument, Builtin, CommandRegistry, RegisteredCommand};
pub use config::{ConfigDocument, ConfigIssue, ConfigStore, LoadReport};
pub use console::{Console, ScriptedConsole};
pub use context::ShellContext;
pub use custom::{CustomCommand, CustomCommandRegistry, ExecutionMode, INLINE_MARKER};
pub use error::{ErrorKind, ShellError, ShellResult};
pub use executor::{split_commands, Dispatcher};
pub use history::History;
pub use settings::{SettingsError, ShellSettings};
pub use style::Palette;

pub mod alias;
pub mod command;
pub mod config;
pub mod console;
pub mod context;
pub mod custom;
pub mod error;
pub mod executor;
pub mod history;
pub mod inline;
pub mod logging;
pub mod settings;
pub mod style;
