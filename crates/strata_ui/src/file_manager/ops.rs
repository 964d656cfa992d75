//! Bulk operations on the selection.
//!
//! Every selected entry is attempted. Entries that succeed leave the
//! selection; failures are reported one per line and stay selected.

use std::path::Path;

use strata_hal::{FileSystem, HalError, HalResult};
use tracing::{info, warn};

use super::state::FileManagerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOp {
    Copy,
    Move,
    Delete,
}

impl BulkOp {
    pub fn verb(self) -> &'static str {
        match self {
            BulkOp::Copy => "copy",
            BulkOp::Move => "move",
            BulkOp::Delete => "delete",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            BulkOp::Copy => "copied",
            BulkOp::Move => "moved",
            BulkOp::Delete => "deleted",
        }
    }

    fn apply(self, fs: &dyn FileSystem, source: &Path, target: Option<&Path>) -> HalResult<()> {
        let dest = |dir: &Path| dir.join(source.file_name().unwrap_or_default());
        match (self, target) {
            (BulkOp::Copy, Some(dir)) => fs.copy_entry(source, &dest(dir)).map(|_| ()),
            (BulkOp::Move, Some(dir)) => fs.move_entry(source, &dest(dir)),
            (BulkOp::Delete, _) => fs.remove_entry(source),
            (_, None) => Err(HalError::invalid("no target directory")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkReport {
    pub op: BulkOp,
    pub succeeded: Vec<String>,
    pub failures: Vec<(String, String)>,
}

impl BulkReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn lines(&self) -> Vec<String> {
        if self.is_success() {
            return vec![format!("Items {} successfully", self.op.past_tense())];
        }
        self.failures
            .iter()
            .map(|(entry, err)| format!("Failed to {} {}: {}", self.op.verb(), entry, err))
            .collect()
    }
}

/// Run `op` over the selection. `target` is required for copy and move.
pub fn run_bulk(state: &mut FileManagerState, fs: &dyn FileSystem, op: BulkOp, target: Option<&Path>) -> BulkReport {
    let mut report = BulkReport { op, succeeded: Vec::new(), failures: Vec::new() };
    let selected: Vec<String> = state.selection.iter().cloned().collect();
    for name in selected {
        let source = state.current_dir.join(&name);
        match op.apply(fs, &source, target) {
            Ok(()) => {
                state.selection.remove(&name);
                report.succeeded.push(name);
            }
            Err(err) => {
                warn!(entry = %name, error = %err, "failed to {}", op.verb());
                report.failures.push((name, err.to_string()));
            }
        }
    }
    info!(op = op.verb(), ok = report.succeeded.len(), failed = report.failures.len(), "bulk operation finished");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use strata_hal::LocalFileSystem;

    #[test]
    fn copy_keeps_sources_and_clears_selection() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::write(src.path().join("a.txt"), "a").unwrap();
        fs::create_dir(src.path().join("dir")).unwrap();
        fs::write(src.path().join("dir").join("inner"), "i").unwrap();

        let mut state = FileManagerState::new(src.path());
        state.selection.extend(["a.txt".to_string(), "dir".to_string()]);
        let report = run_bulk(&mut state, &LocalFileSystem::new(), BulkOp::Copy, Some(dst.path()));

        assert_eq!(report.lines(), ["Items copied successfully"]);
        assert!(state.selection.is_empty());
        assert!(src.path().join("a.txt").exists());
        assert_eq!(fs::read_to_string(dst.path().join("dir").join("inner")).unwrap(), "i");
    }

    #[test]
    fn partial_failure_keeps_failed_entries_selected() {
        let src = tempfile::tempdir().unwrap();
        fs::write(src.path().join("real"), "r").unwrap();

        let mut state = FileManagerState::new(src.path());
        state.selection.extend(["real".to_string(), "ghost".to_string()]);
        let report = run_bulk(&mut state, &LocalFileSystem::new(), BulkOp::Delete, None);

        assert!(!report.is_success());
        assert_eq!(report.succeeded, ["real"]);
        assert_eq!(state.selection.iter().collect::<Vec<_>>(), ["ghost"]);
        let lines = report.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Failed to delete ghost: "), "{}", lines[0]);
        assert!(!src.path().join("real").exists());
    }
}
