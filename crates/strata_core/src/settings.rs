//! Shell settings
//!
//! Settings come from an optional TOML file
//! (`$XDG_CONFIG_HOME/strata/settings.toml`, or the path in
//! `STRATA_SETTINGS`) and are then overridden by environment variables.
//! Every field has a default, so an empty or missing file is valid.
//!
//! ```toml
//! commands_file = "commands.cfg"
//! fallback_timeout_secs = 30
//! custom_timeout_secs = 120
//! inline_eval = false
//! color = true
//! typewriter_delay_ms = 2
//! log_dir = "/tmp/strata-logs"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const SETTINGS_ENV: &str = "STRATA_SETTINGS";
pub const COMMANDS_FILE_ENV: &str = "STRATA_COMMANDS_FILE";
pub const FALLBACK_TIMEOUT_ENV: &str = "STRATA_FALLBACK_TIMEOUT";
pub const INLINE_EVAL_ENV: &str = "STRATA_INLINE_EVAL";

/// Default name of the alias/custom-command file, looked up in the working directory.
pub const DEFAULT_COMMANDS_FILE: &str = "commands.cfg";
pub const DEFAULT_FALLBACK_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellSettings {
    /// File holding aliases and custom commands.
    pub commands_file: PathBuf,
    /// Budget for commands forwarded to the host shell from the prompt.
    pub fallback_timeout_secs: u64,
    /// Budget for custom commands run through the host shell; unbounded when unset.
    pub custom_timeout_secs: Option<u64>,
    /// Allow `inline -c` custom commands. The commands file becomes executable code.
    pub inline_eval: bool,
    pub color: bool,
    pub typewriter_delay_ms: u64,
    /// Write logs to daily files in this directory instead of stderr.
    pub log_dir: Option<PathBuf>,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            commands_file: PathBuf::from(DEFAULT_COMMANDS_FILE),
            fallback_timeout_secs: DEFAULT_FALLBACK_TIMEOUT_SECS,
            custom_timeout_secs: None,
            inline_eval: false,
            color: true,
            typewriter_delay_ms: 2,
            log_dir: None,
        }
    }
}

impl ShellSettings {
    /// Load from the settings file (if any) and the process environment.
    pub fn load() -> Result<Self, SettingsError> {
        let mut settings = match Self::settings_path() {
            Some(path) if path.is_file() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// `STRATA_SETTINGS`, else `<config dir>/strata/settings.toml`.
    pub fn settings_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(SETTINGS_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("strata").join("settings.toml"))
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides through `lookup` (injectable for tests).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(COMMANDS_FILE_ENV) {
            self.commands_file = PathBuf::from(path);
        }
        if let Some(value) = lookup(FALLBACK_TIMEOUT_ENV) {
            self.fallback_timeout_secs = value
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidEnv { var: FALLBACK_TIMEOUT_ENV, value })?;
        }
        if let Some(value) = lookup(INLINE_EVAL_ENV) {
            self.inline_eval = parse_flag(&value)
                .ok_or(SettingsError::InvalidEnv { var: INLINE_EVAL_ENV, value })?;
        }
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            self.color = false;
        }
        Ok(())
    }

    /// Never zero: a zero budget would time out every command.
    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_secs(self.fallback_timeout_secs.max(1))
    }

    pub fn custom_timeout(&self) -> Option<Duration> {
        self.custom_timeout_secs.map(|secs| Duration::from_secs(secs.max(1)))
    }

    pub fn typewriter_delay(&self) -> Duration {
        Duration::from_millis(self.typewriter_delay_ms)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
