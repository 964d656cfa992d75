//! Alias and custom-command file
//!
//! ```text
//! # comments start with '#' or ';'
//! g=echo hello
//! ll=ls -la
//!
//! [gl]
//! command = git log -n $1
//! help = Show last N commits
//! args = count
//! ```
//!
//! Aliases are flat `name=expansion` lines before the first section. Each
//! section is one custom command; keys accept `=` or `:` and indented lines
//! continue the previous value. A broken section is reported and skipped
//! while the rest of the file still loads.
//!
//! Writes only touch the half of the file they own: saving aliases keeps the
//! section text as found on disk, saving commands keeps the alias prelude.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::alias::{self, AliasTable};
use crate::custom::{CustomCommand, CustomCommandRegistry};
use crate::error::{ShellError, ShellResult};

/// Help text for sections without a `help` key.
pub const DEFAULT_HELP: &str = "No help available";

/// Section name used in reports for problems in the alias prelude.
pub const ALIAS_SECTION: &str = "aliases";

/// A config entry that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub section: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(section: &str, message: impl Into<String>) -> Self {
        Self { section: section.to_string(), message: message.into() }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.section, self.message)
    }
}

/// Everything parsed out of one config file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    pub aliases: Vec<(String, String)>,
    pub commands: Vec<CustomCommand>,
    pub issues: Vec<ConfigIssue>,
}

/// Outcome of loading custom commands, shown at startup and by `refresh_commands`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub path: PathBuf,
    pub found: bool,
    pub loaded: usize,
    pub issues: Vec<ConfigIssue>,
}

impl LoadReport {
    pub fn missing(path: &Path) -> Self {
        Self { path: path.to_path_buf(), found: false, loaded: 0, issues: Vec::new() }
    }

    pub fn summary(&self) -> String {
        if !self.found {
            return format!(
                "No {} file found. Custom commands will not be loaded.",
                self.path.display()
            );
        }
        let mut text = format!("Successfully loaded {} custom command(s).", self.loaded);
        if !self.issues.is_empty() {
            text.push_str("\nThe following commands failed to load:");
            for issue in &self.issues {
                text.push_str(&format!("\n- {issue}"));
            }
            text.push_str(&format!(
                "\nPlease check your {} file and correct these issues.",
                self.path.display()
            ));
        }
        text
    }
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the file; `Ok(None)` when it does not exist.
    pub fn load(&self) -> ShellResult<Option<ConfigDocument>> {
        let Some(text) = self.read_raw()? else {
            debug!(path = %self.path.display(), "no config file");
            return Ok(None);
        };
        let doc = parse(&text);
        info!(
            path = %self.path.display(),
            aliases = doc.aliases.len(),
            commands = doc.commands.len(),
            issues = doc.issues.len(),
            "config loaded"
        );
        for issue in &doc.issues {
            warn!(section = %issue.section, "config issue: {}", issue.message);
        }
        Ok(Some(doc))
    }

    /// Rewrite the alias prelude, keeping the section text as it is on disk.
    pub fn save_aliases(&self, aliases: &AliasTable) -> ShellResult<()> {
        let existing = self.read_raw()?.unwrap_or_default();
        let (_, sections) = split_raw(&existing);
        self.write(&assemble(&render_aliases(aliases), sections))
    }

    /// Rewrite all sections, keeping the alias prelude as it is on disk.
    pub fn save_commands(&self, commands: &CustomCommandRegistry) -> ShellResult<()> {
        let existing = self.read_raw()?.unwrap_or_default();
        let (prelude, _) = split_raw(&existing);
        self.write(&assemble(prelude, &render_sections(commands)))
    }

    /// Write both halves from memory.
    pub fn save_all(&self, aliases: &AliasTable, commands: &CustomCommandRegistry) -> ShellResult<()> {
        self.write(&render(aliases, commands))
    }

    fn read_raw(&self) -> ShellResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ShellError::config(format!("failed to read {}: {}", self.path.display(), e))),
        }
    }

    fn write(&self, text: &str) -> ShellResult<()> {
        fs::write(&self.path, text)
            .map_err(|e| ShellError::config(format!("failed to write {}: {}", self.path.display(), e)))?;
        debug!(path = %self.path.display(), bytes = text.len(), "config saved");
        Ok(())
    }
}

/// Serialize aliases (sorted) then sections (sorted), separated by a blank line.
pub fn render(aliases: &AliasTable, commands: &CustomCommandRegistry) -> String {
    assemble(&render_aliases(aliases), &render_sections(commands))
}

fn render_aliases(aliases: &AliasTable) -> String {
    aliases.iter().map(|(name, expansion)| format!("{name}={expansion}\n")).collect()
}

fn render_sections(commands: &CustomCommandRegistry) -> String {
    commands
        .iter()
        .map(|cmd| {
            let mut section = format!("[{}]\n", cmd.name);
            section.push_str(&render_value("command", &cmd.template));
            section.push_str(&render_value("help", &cmd.help_text));
            section.push_str(&render_value("args", &cmd.arg_names.join(" ")));
            section
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `key = first line`, further lines as indented continuations.
fn render_value(key: &str, value: &str) -> String {
    let mut lines = value.lines();
    let first = lines.next().unwrap_or("").trim_end();
    let mut out = if first.is_empty() { format!("{key} =\n") } else { format!("{key} = {first}\n") };
    for line in lines {
        out.push_str("    ");
        out.push_str(line.trim());
        out.push('\n');
    }
    out
}

fn assemble(prelude: &str, sections: &str) -> String {
    let prelude = prelude.trim_end();
    let sections = sections.trim_start().trim_end_matches(&['\n', '\r'][..]);
    match (prelude.is_empty(), sections.is_empty()) {
        (true, true) => String::new(),
        (false, true) => format!("{prelude}\n"),
        (true, false) => format!("{sections}\n"),
        (false, false) => format!("{prelude}\n\n{sections}\n"),
    }
}

/// Split raw text at the first section header line.
fn split_raw(text: &str) -> (&str, &str) {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim_start().starts_with('[') {
            return (&text[..offset], &text[offset..]);
        }
        offset += line.len();
    }
    (text, "")
}

struct Section {
    name: String,
    line: usize,
    values: Vec<(String, String)>,
    error: Option<String>,
}

impl Section {
    fn value(&self, key: &str) -> Option<&str> {
        self.values.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    fn finish(self, doc: &mut ConfigDocument) {
        if let Some(message) = self.error {
            doc.issues.push(ConfigIssue::new(&self.name, message));
            return;
        }
        let template = match self.value("command") {
            Some(cmd) if !cmd.trim().is_empty() => cmd.trim().to_string(),
            Some(_) => {
                let message = format!("line {}: 'command' is empty", self.line);
                doc.issues.push(ConfigIssue::new(&self.name, message));
                return;
            }
            None => {
                let message = format!("line {}: missing 'command' key", self.line);
                doc.issues.push(ConfigIssue::new(&self.name, message));
                return;
            }
        };
        let help = self.value("help").unwrap_or(DEFAULT_HELP).trim().to_string();
        let args = self.value("args").unwrap_or("").split_whitespace().map(str::to_string).collect();
        doc.commands.push(CustomCommand { name: self.name, template, help_text: help, arg_names: args });
    }
}

enum Block {
    Prelude,
    Section(Section),
    /// Body of a header that was rejected; lines are ignored until the next header.
    Skipped,
}

/// Parse config text. Never fails: problems are collected as issues.
pub fn parse(text: &str) -> ConfigDocument {
    let mut doc = ConfigDocument::default();
    let mut block = Block::Prelude;
    let mut seen: Vec<(String, usize)> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let lineno = idx + 1;
        let line = raw.trim_end();
        let trimmed = line.trim_start();

        // Indented lines continue the previous value, even when they look
        // like a comment, a header or nothing at all.
        if let Block::Section(section) = &mut block {
            if section.error.is_none() && raw.starts_with(&[' ', '\t'][..]) {
                if let Some((_, value)) = section.values.last_mut() {
                    value.push('\n');
                    value.push_str(trimmed);
                    continue;
                }
            }
        }

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if trimmed.starts_with('[') {
            if let Block::Section(section) = std::mem::replace(&mut block, Block::Skipped) {
                section.finish(&mut doc);
            }
            let Some(inner) = trimmed.strip_prefix('[').and_then(|t| t.strip_suffix(']')) else {
                let name = trimmed.trim_start_matches('[').trim();
                doc.issues.push(ConfigIssue::new(name, format!("line {lineno}: unterminated section header")));
                continue;
            };
            let name = inner.trim();
            if name.is_empty() {
                doc.issues.push(ConfigIssue::new("[]", format!("line {lineno}: empty section header")));
                continue;
            }
            if let Some((_, first)) = seen.iter().find(|(n, _)| n == name) {
                let message = format!("line {lineno}: duplicate section (first defined on line {first})");
                doc.issues.push(ConfigIssue::new(name, message));
                continue;
            }
            seen.push((name.to_string(), lineno));
            block = Block::Section(Section { name: name.to_string(), line: lineno, values: Vec::new(), error: None });
            continue;
        }

        match &mut block {
            Block::Skipped => {}
            Block::Prelude => match trimmed.split_once('=') {
                Some((name, expansion)) => {
                    let name = name.trim();
                    match alias::validate_name(name) {
                        Ok(()) => doc.aliases.push((name.to_string(), expansion.trim().to_string())),
                        Err(e) => doc.issues.push(ConfigIssue::new(ALIAS_SECTION, format!("line {lineno}: {e}"))),
                    }
                }
                None => doc.issues.push(ConfigIssue::new(
                    ALIAS_SECTION,
                    format!("line {lineno}: expected 'name=command', found '{trimmed}'"),
                )),
            },
            Block::Section(section) => {
                if section.error.is_some() {
                    continue;
                }
                match split_key_value(trimmed) {
                    Some((key, value)) => section.values.push((key.to_ascii_lowercase(), value.to_string())),
                    None => {
                        section.error = Some(format!("line {lineno}: expected 'key = value', found '{trimmed}'"));
                    }
                }
            }
        }
    }
    if let Block::Section(section) = block {
        section.finish(&mut doc);
    }
    doc
}

/// Split on the first `=` or `:`, whichever comes first.
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let pos = line.find(&['=', ':'][..])?;
    let key = line[..pos].trim();
    if key.is_empty() {
        return None;
    }
    Some((key, line[pos + 1..].trim()))
}
