//! Alias table
//!
//! An alias rewrites the head word of a line. Expansion happens in the
//! dispatcher and recurses, so the table refuses entries that would close a
//! cycle; the dispatcher additionally bounds the depth for tables that were
//! edited by hand.

use std::collections::{BTreeMap, HashSet};

use crate::error::{ShellError, ShellResult};

/// Maximum number of alias rewrites applied to a single line.
pub const MAX_ALIAS_DEPTH: usize = 16;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Add or replace an alias after validating the name and checking for cycles.
    pub fn insert(&mut self, name: &str, expansion: &str) -> ShellResult<()> {
        validate_name(name)?;
        let expansion = expansion.trim();
        if expansion.is_empty() {
            return Err(ShellError::usage(format!("alias '{name}' needs a command")));
        }
        if self.would_create_cycle(name, expansion) {
            return Err(ShellError::execution(format!("alias '{name}' would create a cycle")));
        }
        self.entries.insert(name.to_string(), expansion.to_string());
        Ok(())
    }

    /// Insert without checks; used when loading a config file written by hand.
    pub fn insert_unchecked(&mut self, name: &str, expansion: &str) {
        self.entries.insert(name.to_string(), expansion.to_string());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(name)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Aliases sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Follow the head words of the chain starting at `expansion`; true if it
    /// comes back to `name`.
    pub fn would_create_cycle(&self, name: &str, expansion: &str) -> bool {
        let mut visited = HashSet::new();
        let mut current = match expansion.split_whitespace().next() {
            Some(word) => word,
            None => return false,
        };
        loop {
            if current == name {
                return true;
            }
            if !visited.insert(current) {
                // a pre-existing loop that does not involve `name`
                return false;
            }
            match self.get(current).and_then(|v| v.split_whitespace().next()) {
                Some(next) => current = next,
                None => return false,
            }
        }
    }

    /// Rewrite `head rest..` into `expansion rest..`, or `None` if `head` is not an alias.
    pub fn expand(&self, head: &str, rest: &[&str]) -> Option<String> {
        let expansion = self.get(head)?;
        let mut line = expansion.to_string();
        if !rest.is_empty() {
            line.push(' ');
            line.push_str(&rest.join(" "));
        }
        Some(line.trim().to_string())
    }
}

/// Alias names are single words that the config file can hold as `name=value`.
pub fn validate_name(name: &str) -> ShellResult<()> {
    if name.is_empty() {
        return Err(ShellError::usage("alias name must not be empty"));
    }
    let bad = name.chars().any(|ch| {
        ch.is_whitespace()
            || matches!(
                ch,
                '=' | ':' | '|' | '&' | ';' | '(' | ')' | '<' | '>' | '"' | '\'' | '\\' | '$' | '`' | '#' | '['
                    | ']'
            )
    });
    if bad {
        return Err(ShellError::usage(format!("'{name}': invalid alias name")));
    }
    Ok(())
}
