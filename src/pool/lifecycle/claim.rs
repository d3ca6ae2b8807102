//! Claim a slot for a branch

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::RepoConfig;
use crate::error::{PoolError, Result};
use crate::git::branch::{
    branch_exists, checkout, checkout_new_branch, current_branch, fetch_best_effort, is_tmp_branch,
    release_target, resolve_default_branch, validate_branch_name, TMP_BRANCH_PREFIX,
};
use crate::pool::dirty::{ensure_clean, DirtyResolution};
use crate::pool::lock::WorktreeLock;

use super::require_pool_worktree;

#[derive(Debug, Clone, Serialize)]
pub struct ClaimedWorktree {
    pub path: PathBuf,
    pub branch: String,
    pub previous_branch: Option<String>,
    /// False when `branch` already existed and was only checked out
    pub created_branch: bool,
}

/// Put the worktree at `worktree_path` on `branch`.
///
/// An existing branch is checked out as-is. A new branch starts at the
/// default branch's tip, preferring `origin/<default>` after a best-effort
/// fetch. Uncommitted changes are handled by `on_dirty` first.
///
/// Branch names with the reserved `tmp-` prefix are refused, since the slot
/// would still look available afterwards.
pub fn claim_worktree(
    repo_root: &Path,
    worktree_path: &Path,
    branch: &str,
    config: &RepoConfig,
    on_dirty: Option<&DirtyResolution>,
) -> Result<ClaimedWorktree> {
    validate_branch_name(branch, repo_root)?;
    if is_tmp_branch(branch) {
        return Err(PoolError::InvalidInput(format!(
            "Branch '{branch}' uses the reserved '{TMP_BRANCH_PREFIX}' prefix"
        )));
    }

    let worktree = require_pool_worktree(repo_root, worktree_path)?;
    let _lock = WorktreeLock::acquire(repo_root, &worktree.path)?;
    let path = worktree.path;

    ensure_clean(&path, on_dirty)?;
    let previous_branch = current_branch(&path)?;

    let created_branch = if branch_exists(branch, repo_root) {
        checkout(branch, &path)?;
        false
    } else {
        let default_branch = resolve_default_branch(repo_root, config.main_branch_override())?;
        fetch_best_effort(&default_branch, &path);
        let start_point = release_target(&default_branch, &path)?;
        checkout_new_branch(branch, &start_point, &path)?;
        true
    };

    info!(path = %path.display(), branch, created_branch, "claimed worktree");
    Ok(ClaimedWorktree {
        path,
        branch: branch.to_string(),
        previous_branch,
        created_branch,
    })
}
