//! Strata Host Abstraction Layer (HAL)
//!
//! The core never spawns processes, touches the disk for bulk operations or
//! queries the terminal directly; it goes through the narrow interfaces
//! defined here:
//! - [`HostShell`]: run one command line through the host interpreter
//! - [`FileSystem`]: list/stat/copy/move/remove entries
//! - [`terminal_width`]: terminal metadata

pub mod error;
pub mod fs;
pub mod process;
pub mod terminal;

pub use error::{HalError, HalResult};
pub use fs::{EntryInfo, FileSystem, LocalFileSystem};
pub use process::{HostOutput, HostShell, SystemShell};
pub use terminal::{terminal_height, terminal_width};
