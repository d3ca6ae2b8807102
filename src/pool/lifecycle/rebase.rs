//! Rebase a worktree's branch

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{PoolError, Result};
use crate::git::branch::{branch_exists, checkout, get_branch_head};
use crate::git::merge::rebase_onto;
use crate::pool::lock::WorktreeLock;

#[derive(Debug, Clone, Serialize)]
pub struct RebasedWorktree {
    pub path: PathBuf,
    pub branch: String,
    pub onto: String,
    /// Tip of `branch` after the rebase
    pub head: String,
}

/// Check out `from` in `worktree_path` and rebase it onto `onto`.
///
/// Conflicts are not resolved: the rebase stays in progress and the
/// conflicted files are returned in [`PoolError::Conflict`].
pub fn rebase_worktree(worktree_path: &Path, from: &str, onto: &str) -> Result<RebasedWorktree> {
    if !worktree_path.is_dir() {
        return Err(PoolError::WorktreeNotFound(worktree_path.to_path_buf()));
    }
    if !branch_exists(from, worktree_path) {
        return Err(PoolError::BranchNotFound(from.to_string()));
    }
    get_branch_head(onto, worktree_path)?;

    let _lock = WorktreeLock::acquire(worktree_path, worktree_path)?;
    checkout(from, worktree_path)?;
    rebase_onto(worktree_path, onto)?;

    let head = get_branch_head(from, worktree_path)?;
    info!(path = %worktree_path.display(), branch = from, onto, "rebased worktree");
    Ok(RebasedWorktree {
        path: worktree_path.to_path_buf(),
        branch: from.to_string(),
        onto: onto.to_string(),
        head,
    })
}
