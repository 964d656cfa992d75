//! Shell context
//!
//! One `ShellContext` holds all session state: settings, history, the alias
//! table, both command registries, the config store and the host
//! collaborators. Built-ins receive it mutably.

use std::path::PathBuf;
use std::sync::Arc;

use strata_hal::{FileSystem, HostShell, LocalFileSystem, SystemShell};
use tracing::{info, warn};

use crate::alias::AliasTable;
use crate::command::CommandRegistry;
use crate::config::{ConfigIssue, ConfigStore, LoadReport};
use crate::console::Console;
use crate::custom::{CustomCommand, CustomCommandRegistry};
use crate::error::{ShellError, ShellResult};
use crate::history::History;
use crate::settings::ShellSettings;
use crate::style::Palette;

pub struct ShellContext {
    pub settings: ShellSettings,
    pub history: History,
    pub aliases: AliasTable,
    pub custom: CustomCommandRegistry,
    pub commands: CommandRegistry,
    pub store: ConfigStore,
    pub host: Arc<dyn HostShell>,
    pub fs: Arc<dyn FileSystem>,
    pub console: Box<dyn Console>,
    exit_requested: bool,
}

impl ShellContext {
    /// Context backed by the real host shell and local filesystem.
    pub fn new(settings: ShellSettings, console: Box<dyn Console>) -> Self {
        let store = ConfigStore::new(settings.commands_file.clone());
        Self {
            settings,
            history: History::new(),
            aliases: AliasTable::new(),
            custom: CustomCommandRegistry::new(),
            commands: CommandRegistry::new(),
            store,
            host: Arc::new(SystemShell::new()),
            fs: Arc::new(LocalFileSystem::new()),
            console,
            exit_requested: false,
        }
    }

    pub fn with_host(mut self, host: Arc<dyn HostShell>) -> Self {
        self.host = host;
        self
    }

    pub fn with_fs(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.settings.color)
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn current_dir(&self) -> ShellResult<PathBuf> {
        std::env::current_dir().map_err(|e| ShellError::filesystem(format!("cannot read current directory: {e}")))
    }

    /// Load aliases and custom commands from the config file, replacing what
    /// is in memory.
    pub fn load_config(&mut self) -> LoadReport {
        self.read_config(true)
    }

    /// Clear and reload custom commands only; aliases are left alone.
    pub fn reload_custom_commands(&mut self) -> LoadReport {
        self.read_config(false)
    }

    fn read_config(&mut self, with_aliases: bool) -> LoadReport {
        self.custom.clear();
        let path = self.store.path().to_path_buf();
        match self.store.load() {
            Ok(None) => LoadReport::missing(&path),
            Ok(Some(doc)) => {
                if with_aliases {
                    self.aliases.clear();
                    for (name, expansion) in &doc.aliases {
                        self.aliases.insert_unchecked(name, expansion);
                    }
                }
                let loaded = doc.commands.len();
                for command in doc.commands {
                    self.custom.insert(command);
                }
                info!(loaded, failed = doc.issues.len(), "custom commands loaded");
                LoadReport { path, found: true, loaded, issues: doc.issues }
            }
            Err(err) => {
                warn!("config unreadable: {}", err);
                let issue = ConfigIssue::new(&path.display().to_string(), err.message);
                LoadReport { path, found: true, loaded: 0, issues: vec![issue] }
            }
        }
    }

    /// Add or replace an alias and persist. A failed write keeps the alias in memory.
    pub fn add_alias(&mut self, name: &str, expansion: &str) -> ShellResult<()> {
        self.aliases.insert(name, expansion)?;
        self.store.save_aliases(&self.aliases)
    }

    pub fn remove_alias(&mut self, name: &str) -> ShellResult<bool> {
        if self.aliases.remove(name).is_none() {
            return Ok(false);
        }
        self.store.save_aliases(&self.aliases)?;
        Ok(true)
    }

    pub fn add_custom_command(&mut self, command: CustomCommand) -> ShellResult<()> {
        self.custom.insert(command);
        self.store.save_commands(&self.custom)
    }

    pub fn remove_custom_command(&mut self, name: &str) -> ShellResult<bool> {
        if self.custom.remove(name).is_none() {
            return Ok(false);
        }
        self.store.save_commands(&self.custom)?;
        Ok(true)
    }
}
