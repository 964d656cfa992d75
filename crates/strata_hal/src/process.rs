//! Host shell launcher
//!
//! Runs one opaque command line through the platform's command interpreter
//! (`sh -c` on Unix, `cmd /C` on Windows) and captures both output streams.

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};
use wait_timeout::ChildExt;

use crate::error::{HalError, HalResult};

/// Captured result of a host command. The exit status is kept for logging
/// only; callers show output regardless of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: Option<i32>,
}

/// Narrow interface over the host command interpreter.
pub trait HostShell: Send + Sync {
    /// Run `line` and capture its output. With `Some(timeout)` the child is
    /// killed once the budget is spent and [`HalError::TimedOut`] is returned.
    fn run(&self, line: &str, timeout: Option<Duration>) -> HalResult<HostOutput>;
}

/// The real interpreter of the current platform.
#[derive(Debug, Clone)]
pub struct SystemShell {
    program: String,
    flag: String,
}

impl Default for SystemShell {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemShell {
    pub fn new() -> Self {
        #[cfg(windows)]
        {
            Self::with_program("cmd", "/C")
        }
        #[cfg(not(windows))]
        {
            Self::with_program("sh", "-c")
        }
    }

    /// Use a different interpreter, e.g. `bash -c`.
    pub fn with_program(program: impl Into<String>, flag: impl Into<String>) -> Self {
        Self { program: program.into(), flag: flag.into() }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl HostShell for SystemShell {
    fn run(&self, line: &str, timeout: Option<Duration>) -> HalResult<HostOutput> {
        let start = Instant::now();
        let mut child = Command::new(&self.program)
            .arg(&self.flag)
            .arg(line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| HalError::process_error("failed to spawn", line, e))?;

        // Drain both pipes while waiting so a chatty child never blocks on a full pipe.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match timeout {
            Some(budget) => match child
                .wait_timeout(budget)
                .map_err(|e| HalError::process_error("failed to wait on", line, e))?
            {
                Some(status) => status,
                None => {
                    let _ = child.kill();
                    let _ = child.wait();
                    // Grandchildren may still hold the pipes open; the reader threads are left to finish on their own.
                    warn!(command = line, secs = budget.as_secs(), "host command timed out");
                    return Err(HalError::TimedOut(budget));
                }
            },
            None => child
                .wait()
                .map_err(|e| HalError::process_error("failed to wait on", line, e))?,
        };

        let output = HostOutput {
            stdout: collect(stdout),
            stderr: collect(stderr),
            status: status.code(),
        };
        debug!(
            command = line,
            status = ?output.status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "host command finished"
        );
        Ok(output)
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut reader| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = reader.read_to_end(&mut buf);
            buf
        })
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}
