//! Strata built-in commands
//!
//! One type per command, each implementing [`strata_core::Builtin`].
//! [`register_all`] installs them in the order the help listing shows them.

use std::sync::Arc;

use strata_core::CommandRegistry;

pub mod alias;
pub mod cd;
pub mod clear;
pub mod custom_commands;
pub mod echo;
pub mod exit;
pub mod fm;
pub mod help;
pub mod history;
pub mod ls;
pub mod pwd;

pub use alias::{AliasCommand, UnaliasCommand};
pub use cd::CdCommand;
pub use clear::ClearCommand;
pub use custom_commands::{AddCmdCommand, ListCmdCommand, RefreshCommandsCommand, RmCmdCommand};
pub use echo::EchoCommand;
pub use exit::ExitCommand;
pub use fm::FmCommand;
pub use help::HelpCommand;
pub use history::{HistoryCommand, SearchCommand};
pub use ls::LsCommand;
pub use pwd::PwdCommand;

/// Register every built-in, including the `dir` and `cls` synonyms.
pub fn register_all(registry: &mut CommandRegistry) {
    let ls = Arc::new(LsCommand::new());
    let clear = Arc::new(ClearCommand::new());

    registry.register(Arc::new(CdCommand::new()));
    registry.register(ls.clone());
    registry.register_as("dir", ls);
    registry.register(Arc::new(EchoCommand::new()));
    registry.register(Arc::new(PwdCommand::new()));
    registry.register(clear.clone());
    registry.register_as("cls", clear);
    registry.register(Arc::new(HistoryCommand::new()));
    registry.register(Arc::new(AliasCommand::new()));
    registry.register(Arc::new(UnaliasCommand::new()));
    registry.register(Arc::new(HelpCommand::new()));
    registry.register(Arc::new(ExitCommand::new()));
    registry.register(Arc::new(FmCommand::new()));
    registry.register(Arc::new(SearchCommand::new()));
    registry.register(Arc::new(AddCmdCommand::new()));
    registry.register(Arc::new(RmCmdCommand::new()));
    registry.register(Arc::new(ListCmdCommand::new()));
    registry.register(Arc::new(RefreshCommandsCommand::new()));
}
