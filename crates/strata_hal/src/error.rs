//! Error handling for the Strata HAL
//!
//! Every host interaction funnels its failures into [`HalError`], so the core
//! can turn them into displayable strings without caring which collaborator
//! produced them.

use std::fmt;
use std::io;
use std::path::Path;
use std::result;
use std::time::Duration;

/// Result type for HAL operations
pub type HalResult<T> = result::Result<T, HalError>;

/// Error types for HAL operations
#[derive(Debug, Clone)]
pub enum HalError {
    /// I/O operation failed
    Io(IoError),
    /// The host shell could not be launched or waited on
    Process(ProcessError),
    /// The child ran past its wall-clock budget and was killed
    TimedOut(Duration),
    /// Invalid operation or argument
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct IoError {
    pub operation: String,
    pub path: Option<String>,
    pub kind: io::ErrorKind,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ProcessError {
    pub operation: String,
    pub command: String,
    pub message: String,
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalError::Io(err) => match &err.path {
                Some(path) => write!(f, "{} '{}': {}", err.operation, path, err.message),
                None => write!(f, "{}: {}", err.operation, err.message),
            },
            HalError::Process(err) => write!(f, "{} '{}': {}", err.operation, err.command, err.message),
            HalError::TimedOut(dur) => write!(f, "timed out after {} seconds", dur.as_secs()),
            HalError::Invalid(msg) => write!(f, "invalid operation: {msg}"),
        }
    }
}

impl std::error::Error for HalError {}

impl HalError {
    /// Wrap an `io::Error` raised by `operation` on `path`.
    pub fn io_error(operation: &str, path: Option<&Path>, err: io::Error) -> Self {
        HalError::Io(IoError {
            operation: operation.to_string(),
            path: path.map(|p| p.display().to_string()),
            kind: err.kind(),
            message: err.to_string(),
        })
    }

    pub fn process_error(operation: &str, command: &str, err: impl fmt::Display) -> Self {
        HalError::Process(ProcessError {
            operation: operation.to_string(),
            command: command.to_string(),
            message: err.to_string(),
        })
    }

    pub fn invalid(message: &str) -> Self {
        HalError::Invalid(message.to_string())
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, HalError::TimedOut(_))
    }

    /// The `io::ErrorKind` behind an I/O failure, if that is what this is.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            HalError::Io(err) => Some(err.kind),
            _ => None,
        }
    }
}

impl From<io::Error> for HalError {
    fn from(err: io::Error) -> Self {
        HalError::io_error("io", None, err)
    }
}
