//! Merge a branch in the primary working copy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{PoolError, Result};
use crate::git::branch::{branch_exists, checkout, get_status};
use crate::git::merge::{commit_staged, merge_branch, squash_message};
use crate::git::worktree::list_worktrees;
use crate::pool::classify::is_base_worktree;
use crate::pool::lock::WorktreeLock;
use crate::pool::removal::{remove_worktree_with_recovery, RemovalOutcome};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MergeOptions {
    pub squash: bool,
    pub no_ff: bool,
    /// Commit message; for squash merges defaults to `Merge <from> (squashed)`
    pub message: Option<String>,
    /// Remove the worktree that has `from` checked out after merging
    pub delete_worktree: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MergeOutcome {
    pub from: String,
    pub to: String,
    /// False for a squash that had nothing to commit
    pub committed: bool,
    pub removed_worktree: Option<PathBuf>,
    pub removal: Option<RemovalOutcome>,
}

/// Merge `from` into `to` inside the repository root's working copy.
///
/// A conflicted merge fails with [`PoolError::Conflict`] and leaves the
/// working copy mid-merge. The optional worktree removal only happens
/// after the merge (and squash commit) succeeded, and waits for the
/// slot's lock.
pub fn merge_worktree(repo_root: &Path, from: &str, to: &str, options: &MergeOptions) -> Result<MergeOutcome> {
    if options.squash && options.no_ff {
        return Err(PoolError::InvalidInput(
            "--squash and --no-ff cannot be combined".to_string(),
        ));
    }
    for branch in [from, to] {
        if !branch_exists(branch, repo_root) {
            return Err(PoolError::BranchNotFound(branch.to_string()));
        }
    }

    checkout(to, repo_root)?;
    merge_branch(
        repo_root,
        from,
        options.squash,
        options.no_ff,
        options.message.as_deref(),
    )?;

    let committed = if options.squash {
        if get_status(repo_root)?.has_staged() {
            let message = options
                .message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| squash_message(from));
            commit_staged(repo_root, &message)?;
            true
        } else {
            false
        }
    } else {
        true
    };
    info!(from, to, squash = options.squash, "merged branch");

    let (removed_worktree, removal) = if options.delete_worktree {
        remove_source_worktree(repo_root, from)?
    } else {
        (None, None)
    };

    Ok(MergeOutcome {
        from: from.to_string(),
        to: to.to_string(),
        committed,
        removed_worktree,
        removal,
    })
}

fn remove_source_worktree(
    repo_root: &Path,
    from: &str,
) -> Result<(Option<PathBuf>, Option<RemovalOutcome>)> {
    let source = list_worktrees(repo_root)?
        .into_iter()
        .find(|wt| wt.branch.as_deref() == Some(from) && !is_base_worktree(&wt.path, repo_root));

    match source {
        Some(worktree) => {
            let lock = WorktreeLock::acquire(repo_root, &worktree.path)?;
            let outcome = remove_worktree_with_recovery(repo_root, &worktree.path)?;
            if let Err(e) = lock.discard() {
                debug!(path = %worktree.path.display(), error = %e, "failed to delete lock file");
            }
            Ok((Some(worktree.path), Some(outcome)))
        }
        None => {
            warn!(branch = from, "no worktree has the merged branch checked out");
            Ok((None, None))
        }
    }
}
