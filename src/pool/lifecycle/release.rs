//! Release a slot back to the pool

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::RepoConfig;
use crate::error::{PoolError, Result};
use crate::git::branch::{
    branch_exists, checkout, checkout_reset_branch, current_branch, fetch_best_effort,
    release_target, reset_hard, resolve_default_branch, tmp_branch_for,
};
use crate::git::worktree::worktree_name;
use crate::pool::dirty::{ensure_clean, DirtyResolution};
use crate::pool::lock::WorktreeLock;

use super::require_pool_worktree;

#[derive(Debug, Clone, Serialize)]
pub struct ReleasedWorktree {
    pub path: PathBuf,
    pub tmp_branch: String,
    /// Branch the slot was on before, `None` if it was detached
    pub previous_branch: Option<String>,
    /// Ref the slot was reset to, e.g. `origin/main`
    pub target: String,
}

/// Park the worktree on its `tmp-<name>` branch at the default branch's tip.
///
/// Releasing always yields a fresh slot: an existing parking branch is
/// checked out and hard-reset, a missing one is created at the target.
/// Running it twice leaves the same branch at the same commit.
pub fn release_worktree(
    repo_root: &Path,
    worktree_path: &Path,
    config: &RepoConfig,
    on_dirty: Option<&DirtyResolution>,
) -> Result<ReleasedWorktree> {
    let worktree = require_pool_worktree(repo_root, worktree_path)?;
    let _lock = WorktreeLock::acquire(repo_root, &worktree.path)?;
    let path = worktree.path;

    let name = worktree_name(&path, repo_root).ok_or_else(|| {
        PoolError::InvalidInput(format!("Cannot derive a slot name from {}", path.display()))
    })?;
    let tmp_branch = tmp_branch_for(&name);

    ensure_clean(&path, on_dirty)?;
    let previous_branch = current_branch(&path)?;

    let default_branch = resolve_default_branch(repo_root, config.main_branch_override())?;
    fetch_best_effort(&default_branch, &path);
    let target = release_target(&default_branch, &path)?;

    if branch_exists(&tmp_branch, repo_root) {
        checkout(&tmp_branch, &path)?;
        reset_hard(&target, &path)?;
    } else {
        checkout_reset_branch(&tmp_branch, &target, &path)?;
    }

    info!(
        path = %path.display(),
        tmp_branch = %tmp_branch,
        previous = previous_branch.as_deref().unwrap_or("(detached)"),
        target = %target,
        "released worktree"
    );
    Ok(ReleasedWorktree {
        path,
        tmp_branch,
        previous_branch,
        target,
    })
}
