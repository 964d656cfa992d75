//! Terminal-backed [`Console`] for interactive built-ins.

use std::io::{self, BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use strata_core::Console;
use tracing::warn;

/// Reads from stdin and writes to stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        let mut stdout = io::stdout();
        let _ = write!(stdout, "{prompt}");
        let _ = stdout.flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(&['\n', '\r'][..]).to_string()),
            Err(e) => {
                warn!("failed to read from stdin: {}", e);
                None
            }
        }
    }

    fn print(&mut self, text: &str) {
        println!("{text}");
    }

    fn clear_screen(&mut self) {
        if let Err(e) = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0)) {
            warn!("failed to clear screen: {}", e);
        }
    }
}
