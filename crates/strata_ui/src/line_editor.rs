//! Line editing for the main prompt
//!
//! Wraps rustyline with the configuration the shell wants and maps its
//! control outcomes onto [`ReadOutcome`].

use anyhow::Result;
use rustyline::{config::Config, error::ReadlineError, history::DefaultHistory, Editor};

/// What one prompt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl-C at the prompt.
    Interrupted,
    /// Ctrl-D or end of piped input.
    Eof,
}

/// Source of prompt lines for the REPL.
pub trait LineSource {
    fn read(&mut self, prompt: &str) -> Result<ReadOutcome>;
}

pub struct StrataLineEditor {
    editor: Editor<(), DefaultHistory>,
}

impl StrataLineEditor {
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .history_ignore_space(true)
            .history_ignore_dups(true)?
            .edit_mode(rustyline::EditMode::Emacs)
            .auto_add_history(false)
            .build();
        let editor = Editor::with_config(config)?;
        Ok(Self { editor })
    }
}

impl LineSource for StrataLineEditor {
    fn read(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(err) => Err(anyhow::anyhow!("Readline error: {}", err)),
        }
    }
}

/// Lines replayed from memory; runs out with [`ReadOutcome::Eof`].
#[derive(Debug, Default)]
pub struct ScriptedLines {
    lines: std::collections::VecDeque<ReadOutcome>,
    pub prompts: Vec<String>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(|l| ReadOutcome::Line(l.into())).collect(),
            prompts: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: ReadOutcome) {
        self.lines.push_back(outcome);
    }
}

impl LineSource for ScriptedLines {
    fn read(&mut self, prompt: &str) -> Result<ReadOutcome> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front().unwrap_or(ReadOutcome::Eof))
    }
}
