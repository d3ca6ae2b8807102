//! Archive a slot permanently

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::RepoConfig;
use crate::error::{PoolError, Result};
use crate::git::branch::{is_fully_merged, resolve_default_branch};
use crate::git::worktree::find_worktree;
use crate::pool::classify::is_base_worktree;
use crate::pool::lock::WorktreeLock;
use crate::pool::removal::{remove_worktree_with_recovery, RemovalOutcome};

#[derive(Debug, Clone, Serialize)]
pub struct ArchivedWorktree {
    pub path: PathBuf,
    /// Branch the slot was on; the ref itself is kept
    pub branch: Option<String>,
    pub removal: RemovalOutcome,
}

/// Remove the worktree at `worktree_path` for good.
///
/// Unless `force` is set, the slot's branch must be fully merged into the
/// default branch. An unmerged branch fails with
/// [`PoolError::UnmergedBranch`]; a check that cannot be answered (unrelated
/// histories, detached HEAD) fails with [`PoolError::MergeCheckFailed`].
/// Both are meant to be confirmed by the caller and retried with `force`.
///
/// The directory may already be missing; the registration is still removed.
pub fn archive_worktree(
    repo_root: &Path,
    worktree_path: &Path,
    force: bool,
    config: &RepoConfig,
) -> Result<ArchivedWorktree> {
    let worktree = find_worktree(repo_root, worktree_path)?;
    if is_base_worktree(&worktree.path, repo_root) {
        return Err(PoolError::BaseWorktree(worktree.path));
    }
    let lock = WorktreeLock::acquire(repo_root, &worktree.path)?;

    if !force {
        let target = resolve_default_branch(repo_root, config.main_branch_override())?;
        let Some(branch) = worktree.branch.as_deref() else {
            return Err(PoolError::MergeCheckFailed {
                branch: worktree.head.clone(),
                target,
                reason: "HEAD is detached".to_string(),
            });
        };
        if !is_fully_merged(repo_root, branch, &target)? {
            return Err(PoolError::UnmergedBranch {
                branch: branch.to_string(),
                target,
            });
        }
    }

    let removal = remove_worktree_with_recovery(repo_root, &worktree.path)?;
    if let Err(e) = lock.discard() {
        debug!(path = %worktree.path.display(), error = %e, "failed to delete lock file");
    }
    info!(
        path = %worktree.path.display(),
        branch = worktree.branch.as_deref().unwrap_or("(detached)"),
        force,
        "archived worktree"
    );
    Ok(ArchivedWorktree {
        path: worktree.path,
        branch: worktree.branch,
        removal,
    })
}
