//! File manager state: where we are, what is selected, how entries are shown.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use strata_core::{ShellError, ShellResult};
use strata_hal::{EntryInfo, FileSystem};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::List => ViewMode::Grid,
            ViewMode::Grid => ViewMode::List,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewMode::List => "List",
            ViewMode::Grid => "Grid",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Size,
    Date,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Some(SortKey::Name),
            "size" => Some(SortKey::Size),
            "date" => Some(SortKey::Date),
            _ => None,
        }
    }

    fn compare(self, a: &EntryInfo, b: &EntryInfo) -> Ordering {
        let primary = match self {
            SortKey::Name => Ordering::Equal,
            SortKey::Size => a.size.cmp(&b.size),
            SortKey::Date => a.modified.cmp(&b.modified),
        };
        primary.then_with(|| compare_names(&a.name, &b.name))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::Name => "Name",
            SortKey::Size => "Size",
            SortKey::Date => "Date",
        })
    }
}

/// Case-insensitive, with the exact name as the final tie-break so the
/// order is total.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Stable sort by `key`; `descending` reverses the comparator, so the
/// descending order is exactly the ascending one backwards.
pub fn sort_entries(entries: &mut [EntryInfo], key: SortKey, descending: bool) {
    entries.sort_by(|a, b| {
        let ord = key.compare(a, b);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileManagerState {
    pub current_dir: PathBuf,
    pub selection: BTreeSet<String>,
    pub view_mode: ViewMode,
    pub sort_key: SortKey,
    pub sort_descending: bool,
}

impl FileManagerState {
    pub fn new(current_dir: impl Into<PathBuf>) -> Self {
        Self {
            current_dir: current_dir.into(),
            selection: BTreeSet::new(),
            view_mode: ViewMode::default(),
            sort_key: SortKey::default(),
            sort_descending: false,
        }
    }

    /// Sorted entries of the current directory.
    pub fn entries(&self, fs: &dyn FileSystem) -> ShellResult<Vec<EntryInfo>> {
        let mut entries = fs.read_entries(&self.current_dir)?;
        sort_entries(&mut entries, self.sort_key, self.sort_descending);
        Ok(entries)
    }

    /// Move to the parent directory. At the root nothing changes.
    pub fn go_parent(&mut self) {
        if let Some(parent) = self.current_dir.parent() {
            self.current_dir = parent.to_path_buf();
            self.selection.clear();
        }
    }

    /// Enter `target`, resolved against the current directory.
    pub fn change_dir(&mut self, fs: &dyn FileSystem, target: &str) -> ShellResult<()> {
        let candidate = normalize(&self.current_dir.join(target));
        if target.is_empty() || !fs.is_dir(&candidate) {
            return Err(ShellError::filesystem(format!("Invalid directory: {target}")));
        }
        debug!(dir = %candidate.display(), "file manager changed directory");
        self.current_dir = candidate;
        self.selection.clear();
        Ok(())
    }

    pub fn toggle_view(&mut self) {
        self.view_mode = self.view_mode.toggled();
    }

    pub fn set_sort(&mut self, key: &str) -> ShellResult<()> {
        match SortKey::parse(key) {
            Some(key) => {
                self.sort_key = key;
                Ok(())
            }
            None => Err(ShellError::usage("Invalid sort option. Use 'name', 'size', or 'date'.")),
        }
    }

    pub fn toggle_reverse(&mut self) {
        self.sort_descending = !self.sort_descending;
    }

    /// Deselect `item` if selected, otherwise select it when it is an entry
    /// of the current directory. Returns whether it is selected afterwards.
    pub fn toggle_selection(&mut self, fs: &dyn FileSystem, item: &str) -> ShellResult<bool> {
        if self.selection.remove(item) {
            return Ok(false);
        }
        let names = fs.list_dir(&self.current_dir)?;
        if names.iter().any(|name| name == item) {
            self.selection.insert(item.to_string());
            Ok(true)
        } else {
            Err(ShellError::filesystem(format!("Item not found: {item}")))
        }
    }

    pub fn sort_label(&self) -> String {
        format!(
            "View: {} | Sort: {} ({})",
            self.view_mode,
            self.sort_key,
            if self.sort_descending { "Desc" } else { "Asc" }
        )
    }
}

/// Lexically resolve `.` and `..`.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
