//! Session command history (in memory only)

/// Append-only list of executed commands, 1-indexed for display.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: impl Into<String>) {
        self.entries.push(command.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries containing `query`, in order.
    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries.iter().map(String::as_str).filter(move |e| e.contains(query))
    }
}

/// `{i}: {entry}` lines numbered from 1.
pub fn numbered<'a, I>(entries: I) -> Vec<(usize, &'a str)>
where
    I: IntoIterator<Item = &'a str>,
{
    entries.into_iter().enumerate().map(|(i, e)| (i + 1, e)).collect()
}
