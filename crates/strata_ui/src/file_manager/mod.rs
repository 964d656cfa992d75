//! Embedded text-mode file manager
//!
//! A nested read-eval loop with its own prompt. Each turn clears the screen,
//! redraws the listing and reads one command. Messages produced by a command
//! are shown under the listing on the next redraw.

pub mod ops;
pub mod state;
pub mod view;

use std::path::PathBuf;
use std::sync::Arc;

use nu_ansi_term::Color;
use strata_core::{Console, Palette};
use strata_hal::{terminal_width, FileSystem};
use tracing::debug;

pub use ops::{run_bulk, BulkOp, BulkReport};
pub use state::{sort_entries, FileManagerState, SortKey, ViewMode};

pub const PROMPT: &str = "File Manager>";
pub const TARGET_PROMPT: &str = "Enter target directory: ";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete selected items? (y/n): ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// One file manager session.
pub struct FileManager {
    state: FileManagerState,
    fs: Arc<dyn FileSystem>,
    palette: Palette,
    width: usize,
    notices: Vec<String>,
}

impl FileManager {
    pub fn new(start: PathBuf, fs: Arc<dyn FileSystem>, palette: Palette) -> Self {
        Self {
            state: FileManagerState::new(start),
            fs,
            palette,
            width: terminal_width(),
            notices: Vec::new(),
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn state(&self) -> &FileManagerState {
        &self.state
    }

    /// Run until `q` or end of input; returns the closing message.
    pub fn run(&mut self, console: &mut dyn Console) -> String {
        let prompt = format!("{} ", self.palette.paint(Color::LightGreen.bold(), PROMPT));
        loop {
            console.clear_screen();
            for line in self.render() {
                console.print(&line);
            }
            let Some(input) = console.read_line(&prompt) else {
                break;
            };
            if self.handle(&input, console) == Flow::Quit {
                break;
            }
        }
        format!("File manager closed. Current directory: {}", self.state.current_dir.display())
    }

    /// The full screen, draining pending notices.
    pub fn render(&mut self) -> Vec<String> {
        let mut lines = view::header(&self.state, &self.palette, self.width);
        match self.state.entries(self.fs.as_ref()) {
            Ok(items) => lines.extend(view::entries(&self.state, &items, &self.palette, self.width)),
            Err(err) => lines.push(self.palette.red(&format!("Cannot read directory: {err}"))),
        }
        let mut footer = view::footer(&self.palette, self.width);
        lines.push(footer.remove(0));
        lines.append(&mut self.notices);
        lines.extend(footer);
        lines
    }

    fn handle(&mut self, input: &str, console: &mut dyn Console) -> Flow {
        let input = input.trim();
        let (command, arg) = match input.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (input, ""),
        };
        let command = command.to_lowercase();
        debug!(command = %command, arg, "file manager command");
        match (command.as_str(), arg) {
            ("", _) => {}
            ("q", _) => return Flow::Quit,
            ("p", _) => self.state.go_parent(),
            ("v", _) => self.state.toggle_view(),
            ("r", _) => self.state.toggle_reverse(),
            ("cd", "") => self.warn("Usage: cd <dir>"),
            ("cd", dir) => {
                if let Err(err) = self.state.change_dir(self.fs.as_ref(), dir) {
                    self.error(&err.to_string());
                }
            }
            ("s", key) => {
                if let Err(err) = self.state.set_sort(key) {
                    self.error(&err.to_string());
                }
            }
            ("sel", "") => self.warn("Usage: sel <item>"),
            ("sel", item) => {
                if let Err(err) = self.state.toggle_selection(self.fs.as_ref(), item) {
                    self.error(&err.to_string());
                }
            }
            ("copy", _) => self.transfer(BulkOp::Copy, console),
            ("move", _) => self.transfer(BulkOp::Move, console),
            ("delete", _) => self.delete(console),
            ("help", _) => self.show_help(console),
            (other, _) => self.error(&format!("Unknown command: {other}. Type 'help' for commands.")),
        }
        Flow::Continue
    }

    fn transfer(&mut self, op: BulkOp, console: &mut dyn Console) {
        if self.state.selection.is_empty() {
            self.warn("No items selected");
            return;
        }
        let answer = console.read_line(TARGET_PROMPT).unwrap_or_default();
        let answer = answer.trim();
        let target = self.state.current_dir.join(answer);
        if answer.is_empty() || !self.fs.is_dir(&target) {
            self.error(&format!("Invalid target directory: {answer}"));
            return;
        }
        let report = run_bulk(&mut self.state, self.fs.as_ref(), op, Some(&target));
        self.report(&report);
    }

    fn delete(&mut self, console: &mut dyn Console) {
        if self.state.selection.is_empty() {
            self.warn("No items selected");
            return;
        }
        let prompt = self.palette.red(DELETE_PROMPT);
        let answer = console.read_line(&prompt).unwrap_or_default().trim().to_lowercase();
        if answer == "y" || answer == "yes" {
            let report = run_bulk(&mut self.state, self.fs.as_ref(), BulkOp::Delete, None);
            self.report(&report);
        }
    }

    fn show_help(&mut self, console: &mut dyn Console) {
        console.print("");
        for line in view::HELP_LINES {
            console.print(line);
        }
        console.print("");
        let _ = console.read_line("Press Enter to continue...");
    }

    fn report(&mut self, report: &BulkReport) {
        for line in report.lines() {
            if report.is_success() {
                self.notices.push(self.palette.green(&line));
            } else {
                self.notices.push(self.palette.red(&line));
            }
        }
    }

    fn warn(&mut self, message: &str) {
        self.notices.push(self.palette.yellow(message));
    }

    fn error(&mut self, message: &str) {
        self.notices.push(self.palette.red(message));
    }
}
