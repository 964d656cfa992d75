//! Error handling for Strata
//!
//! Every failure inside the shell is a [`ShellError`] tagged with an
//! [`ErrorKind`]. None of them is fatal: the dispatcher renders them as text
//! at the command boundary and the session goes on.

use std::fmt;
use std::io;

use strata_hal::HalError;

/// Result type for all Strata operations
pub type ShellResult<T> = Result<T, ShellError>;

/// Main error type for all Strata operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Categories of errors that can occur in Strata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Too few required arguments; answered with help text
    Usage,
    /// The command name matched nothing known to the shell
    Resolution,
    /// A built-in or custom command failed while running
    Execution,
    /// The host shell could not be spawned or waited on
    HostProcess,
    /// The host shell ran past its time budget
    HostTimeout,
    /// A config section could not be parsed
    ConfigLoad,
    /// The config or settings file could not be read or written
    Config,
    /// Invalid directory or failed file operation
    Filesystem,
    /// Alias expansion did not terminate
    AliasCycle,
}

impl ShellError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Usage, message)
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Execution, message)
    }

    pub fn filesystem(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Filesystem, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn alias_cycle(name: &str, depth: usize) -> Self {
        Self::new(
            ErrorKind::AliasCycle,
            format!("alias expansion exceeded {depth} levels (cycle through '{name}'?)"),
        )
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Usage => "usage error",
            ErrorKind::Resolution => "resolution error",
            ErrorKind::Execution => "execution error",
            ErrorKind::HostProcess => "host process error",
            ErrorKind::HostTimeout => "host process timeout",
            ErrorKind::ConfigLoad => "config load error",
            ErrorKind::Config => "config error",
            ErrorKind::Filesystem => "filesystem error",
            ErrorKind::AliasCycle => "alias cycle",
        };
        f.write_str(name)
    }
}

impl std::error::Error for ShellError {}

impl From<io::Error> for ShellError {
    fn from(err: io::Error) -> Self {
        ShellError::filesystem(err.to_string())
    }
}

impl From<HalError> for ShellError {
    fn from(err: HalError) -> Self {
        let kind = match &err {
            HalError::TimedOut(_) => ErrorKind::HostTimeout,
            HalError::Process(_) => ErrorKind::HostProcess,
            HalError::Io(_) => ErrorKind::Filesystem,
            HalError::Invalid(_) => ErrorKind::Execution,
        };
        ShellError::new(kind, err.to_string())
    }
}
