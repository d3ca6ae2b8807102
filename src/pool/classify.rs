//! Pool membership derived from git state
//!
//! There is no pool table: a worktree is available iff its branch carries
//! the `tmp-` prefix, and everything else (other than the repository root
//! and bare entries) is claimed. Recomputed on every call.

use serde::Serialize;
use std::path::Path;

use crate::error::Result;
use crate::git::branch::is_tmp_branch;
use crate::git::worktree::{list_worktrees, same_path, worktree_name, WorktreeInfo};

/// A worktree seen as a pool slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolSlot {
    pub worktree: WorktreeInfo,
    /// Directory name with the `<repo>-` prefix stripped
    pub name: String,
    pub is_available: bool,
}

/// Classification of every worktree of a repository.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PoolSnapshot {
    /// The repository root's own worktree, never pooled
    pub base: Option<WorktreeInfo>,
    pub available: Vec<PoolSlot>,
    pub claimed: Vec<PoolSlot>,
}

impl PoolSnapshot {
    pub fn slots(&self) -> impl Iterator<Item = &PoolSlot> {
        self.available.iter().chain(self.claimed.iter())
    }

    /// First available slot in git's listing order.
    pub fn first_available(&self) -> Option<&PoolSlot> {
        self.available.first()
    }

    /// Slot whose directory is at `path`.
    pub fn find(&self, path: &Path) -> Option<&PoolSlot> {
        self.slots().find(|s| same_path(&s.worktree.path, path))
    }
}

/// Whether `worktree` is parked in the pool.
pub fn is_available(worktree: &WorktreeInfo) -> bool {
    worktree.branch.as_deref().is_some_and(is_tmp_branch)
}

/// Whether `worktree` is the repository root.
pub fn is_base_worktree(worktree_path: &Path, repo_root: &Path) -> bool {
    same_path(worktree_path, repo_root)
}

/// Split a worktree listing into base, available and claimed.
///
/// Listing order is kept within each group.
pub fn classify(worktrees: Vec<WorktreeInfo>, repo_root: &Path) -> PoolSnapshot {
    let mut snapshot = PoolSnapshot::default();

    for worktree in worktrees {
        if is_base_worktree(&worktree.path, repo_root) {
            snapshot.base = Some(worktree);
            continue;
        }
        if worktree.is_bare {
            continue;
        }

        let name = worktree_name(&worktree.path, repo_root)
            .unwrap_or_else(|| worktree.path.display().to_string());
        let slot = PoolSlot {
            is_available: is_available(&worktree),
            worktree,
            name,
        };
        if slot.is_available {
            snapshot.available.push(slot);
        } else {
            snapshot.claimed.push(slot);
        }
    }

    snapshot
}

/// List and classify the worktrees of the repository at `repo_root`.
pub fn pool_snapshot(repo_root: &Path) -> Result<PoolSnapshot> {
    Ok(classify(list_worktrees(repo_root)?, repo_root))
}
