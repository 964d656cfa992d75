//! Interactive input/output seam.
//!
//! Built-ins that need to ask the user something (`addcmd`, the file
//! manager) talk to a [`Console`] instead of stdin/stdout, so the same code
//! runs against the terminal and against scripted input in tests.

use std::collections::VecDeque;

pub trait Console {
    /// Show `prompt` and read one line without its trailing newline.
    /// `None` means end of input.
    fn read_line(&mut self, prompt: &str) -> Option<String>;

    fn print(&mut self, text: &str);

    fn clear_screen(&mut self) {}
}

/// Console fed from a queue of lines; records everything printed.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
    pub clears: usize,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn push_input(&mut self, line: impl Into<String>) {
        self.inputs.push_back(line.into());
    }

    /// Everything printed so far, one entry per line.
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        self.inputs.pop_front()
    }

    fn print(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn clear_screen(&mut self) {
        self.clears += 1;
    }
}
