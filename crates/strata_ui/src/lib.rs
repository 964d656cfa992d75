//! Strata UI Library - terminal front end
//!
//! Presentation for the Strata shell: the main REPL over a rustyline
//! editor, the prompt, welcome/farewell banners, a stdin/stdout
//! [`Console`](strata_core::Console) and the embedded file manager.

pub use console::StdConsole;
pub use file_manager::FileManager;
pub use line_editor::{LineSource, ReadOutcome, ScriptedLines, StrataLineEditor};
pub use repl::Repl;

pub mod banner;
pub mod console;
pub mod file_manager;
pub mod line_editor;
pub mod prompt;
pub mod repl;
