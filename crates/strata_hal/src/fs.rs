//! File system abstraction layer
//!
//! The shell and the file manager only ever touch the disk through
//! [`FileSystem`], which keeps the bulk operations testable and the error
//! messages uniform.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use filetime::FileTime;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{HalError, HalResult};

/// Metadata for one directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub is_dir: bool,
    /// Size in bytes; meaningful for files only.
    pub size: u64,
    pub modified: Option<SystemTime>,
}

/// Narrow filesystem interface used by the core and the file manager.
pub trait FileSystem: Send + Sync {
    /// Names of the entries of `dir`, in no particular order.
    fn list_dir(&self, dir: &Path) -> HalResult<Vec<String>>;

    fn stat(&self, path: &Path) -> HalResult<EntryInfo>;

    /// Copy a file (overwriting) or a whole directory tree (which must not exist yet).
    fn copy_entry(&self, from: &Path, to: &Path) -> HalResult<u64>;

    fn move_entry(&self, from: &Path, to: &Path) -> HalResult<()>;

    /// Remove a file, or a directory recursively.
    fn remove_entry(&self, path: &Path) -> HalResult<()>;

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// `list_dir` + `stat` for every entry. Entries that vanish between the
    /// two calls are skipped.
    fn read_entries(&self, dir: &Path) -> HalResult<Vec<EntryInfo>> {
        let names = self.list_dir(dir)?;
        Ok(names
            .into_iter()
            .filter_map(|name| self.stat(&dir.join(&name)).ok())
            .collect())
    }
}

/// The local disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }

    fn copy_file(from: &Path, to: &Path) -> HalResult<u64> {
        let bytes = fs::copy(from, to).map_err(|e| HalError::io_error("copy", Some(from), e))?;
        // Keep timestamps like a `cp -p`; failing to do so is not worth failing the copy.
        if let Ok(meta) = fs::metadata(from) {
            let mtime = FileTime::from_last_modification_time(&meta);
            let atime = FileTime::from_last_access_time(&meta);
            let _ = filetime::set_file_times(to, atime, mtime);
        }
        Ok(bytes)
    }

    fn copy_tree(from: &Path, to: &Path) -> HalResult<u64> {
        check_destination("copy", from, to)?;
        if to.exists() {
            return Err(HalError::io_error(
                "copy",
                Some(to),
                std::io::Error::new(std::io::ErrorKind::AlreadyExists, "destination already exists"),
            ));
        }
        let mut total = 0;
        for entry in WalkDir::new(from).follow_links(false) {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf);
                HalError::io_error("walk", path.as_deref(), e.into())
            })?;
            let relative = entry
                .path()
                .strip_prefix(from)
                .map_err(|_| HalError::invalid("walked outside the copy root"))?;
            let target = to.join(relative);
            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).map_err(|e| HalError::io_error("create_dir", Some(&target), e))?;
            } else {
                total += Self::copy_file(entry.path(), &target)?;
            }
        }
        Ok(total)
    }
}

impl FileSystem for LocalFileSystem {
    fn list_dir(&self, dir: &Path) -> HalResult<Vec<String>> {
        let reader = fs::read_dir(dir).map_err(|e| HalError::io_error("read_dir", Some(dir), e))?;
        let mut names = Vec::new();
        for entry in reader {
            let entry = entry.map_err(|e| HalError::io_error("read_dir", Some(dir), e))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn stat(&self, path: &Path) -> HalResult<EntryInfo> {
        // Follow symlinks, but still report dangling ones.
        let meta = fs::metadata(path)
            .or_else(|_| fs::symlink_metadata(path))
            .map_err(|e| HalError::io_error("stat", Some(path), e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(EntryInfo {
            name,
            is_dir: meta.is_dir(),
            size: if meta.is_dir() { 0 } else { meta.len() },
            modified: meta.modified().ok(),
        })
    }

    fn copy_entry(&self, from: &Path, to: &Path) -> HalResult<u64> {
        debug!(from = %from.display(), to = %to.display(), "copy entry");
        check_destination("copy", from, to)?;
        if from.is_dir() {
            Self::copy_tree(from, to)
        } else {
            Self::copy_file(from, to)
        }
    }

    fn move_entry(&self, from: &Path, to: &Path) -> HalResult<()> {
        debug!(from = %from.display(), to = %to.display(), "move entry");
        check_destination("move", from, to)?;
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err) if is_cross_device(&err) => {
                self.copy_entry(from, to)?;
                self.remove_entry(from)
            }
            Err(err) => Err(HalError::io_error("move", Some(from), err)),
        }
    }

    fn remove_entry(&self, path: &Path) -> HalResult<()> {
        debug!(path = %path.display(), "remove entry");
        let meta = fs::symlink_metadata(path).map_err(|e| HalError::io_error("remove", Some(path), e))?;
        if meta.is_dir() {
            fs::remove_dir_all(path).map_err(|e| HalError::io_error("remove_dir_all", Some(path), e))
        } else {
            fs::remove_file(path).map_err(|e| HalError::io_error("remove_file", Some(path), e))
        }
    }
}

/// Canonical form of `path`; for a path that does not exist yet, the
/// canonical parent joined with the file name.
fn resolve(path: &Path) -> Option<PathBuf> {
    if let Ok(canonical) = fs::canonicalize(path) {
        return Some(canonical);
    }
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::canonicalize(parent).ok().map(|p| p.join(name))
}

#[cfg(unix)]
fn same_inode(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_inode(_a: &Path, _b: &Path) -> bool {
    false
}

/// Refuse a destination that is the source itself, or lies inside a source
/// directory. Copying a file onto itself would truncate it.
fn check_destination(op: &str, from: &Path, to: &Path) -> HalResult<()> {
    let (Some(src), Some(dst)) = (resolve(from), resolve(to)) else {
        return Ok(());
    };
    if src == dst || same_inode(from, to) {
        return Err(HalError::invalid(&format!(
            "'{}' and '{}' are the same file",
            from.display(),
            to.display()
        )));
    }
    if from.is_dir() && dst.starts_with(&src) {
        return Err(HalError::invalid(&format!(
            "cannot {op} directory '{}' into itself",
            from.display()
        )));
    }
    Ok(())
}

fn is_cross_device(err: &io::Error) -> bool {
    #[cfg(unix)]
    {
        err.raw_os_error() == Some(libc::EXDEV)
    }
    #[cfg(windows)]
    {
        // ERROR_NOT_SAME_DEVICE
        err.raw_os_error() == Some(17)
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = err;
        false
    }
}
