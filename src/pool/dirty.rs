//! Resolution of uncommitted changes before a worktree changes hands
//!
//! The caller chooses one [`DirtyResolution`]; this module only validates and
//! applies it. Choosing is a UI concern, informed by [`get_status`].

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::{PoolError, Result};
use crate::git::branch::{current_branch, get_status, has_head_commit, GitStatus};
use crate::git::runner::run_git_checked;

/// What to do with uncommitted changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "action")]
pub enum DirtyResolution {
    /// Push tracked and untracked changes onto the stash
    Stash,
    /// Stage everything and commit with the given message
    Commit { message: String },
    /// Stage everything and amend HEAD, keeping its message
    Amend,
    /// Discard all changes and untracked files. Irreversible.
    Clean,
    /// Leave the worktree alone and abort the enclosing operation
    Cancel,
}

impl DirtyResolution {
    /// Check preconditions that need no git access.
    pub fn validate(&self) -> Result<()> {
        if let DirtyResolution::Commit { message } = self {
            if message.trim().is_empty() {
                return Err(PoolError::InvalidInput(
                    "Commit message must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn label(&self) -> &'static str {
        match self {
            DirtyResolution::Stash => "stash",
            DirtyResolution::Commit { .. } => "commit",
            DirtyResolution::Amend => "amend",
            DirtyResolution::Clean => "clean",
            DirtyResolution::Cancel => "cancel",
        }
    }
}

/// Stash every change, including untracked files, under a generated message.
pub fn stash_changes(worktree_path: &Path) -> Result<String> {
    let branch = current_branch(worktree_path)?.unwrap_or_else(|| "detached".to_string());
    let message = format!(
        "wtpool: {branch} at {}",
        Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    );
    run_git_checked(
        &["stash", "push", "--include-untracked", "-m", &message],
        worktree_path,
    )?;
    Ok(message)
}

/// Stage everything and create a new commit.
pub fn commit_changes(worktree_path: &Path, message: &str) -> Result<()> {
    if message.trim().is_empty() {
        return Err(PoolError::InvalidInput(
            "Commit message must not be empty".to_string(),
        ));
    }
    run_git_checked(&["add", "-A"], worktree_path)?;
    run_git_checked(&["commit", "-m", message], worktree_path)?;
    Ok(())
}

/// Stage everything and fold it into HEAD without editing the message.
pub fn amend_changes(worktree_path: &Path) -> Result<()> {
    if !has_head_commit(worktree_path) {
        return Err(PoolError::RepositoryState(format!(
            "Nothing to amend: {} has no commits",
            worktree_path.display()
        )));
    }
    run_git_checked(&["add", "-A"], worktree_path)?;
    run_git_checked(&["commit", "--amend", "--no-edit"], worktree_path)?;
    Ok(())
}

/// Reset tracked files to HEAD and delete untracked files and directories.
pub fn clean_changes(worktree_path: &Path) -> Result<()> {
    run_git_checked(&["reset", "--hard", "HEAD"], worktree_path)?;
    run_git_checked(&["clean", "-fd"], worktree_path)?;
    Ok(())
}

/// Apply `resolution` to the worktree.
///
/// `Cancel` performs no mutation and returns [`PoolError::Aborted`].
pub fn resolve_dirty(worktree_path: &Path, resolution: &DirtyResolution) -> Result<()> {
    resolution.validate()?;
    match resolution {
        DirtyResolution::Stash => {
            stash_changes(worktree_path)?;
        }
        DirtyResolution::Commit { message } => commit_changes(worktree_path, message)?,
        DirtyResolution::Amend => amend_changes(worktree_path)?,
        DirtyResolution::Clean => clean_changes(worktree_path)?,
        DirtyResolution::Cancel => {
            return Err(PoolError::Aborted(worktree_path.to_path_buf()));
        }
    }
    info!(
        worktree = %worktree_path.display(),
        action = resolution.label(),
        "resolved uncommitted changes"
    );
    Ok(())
}

/// Make the worktree safe to switch, or fail without touching it.
///
/// Validates `on_dirty` first, so a bad choice is rejected even on a clean
/// tree. A dirty tree with no choice is [`PoolError::DirtyWorktree`].
pub fn ensure_clean(worktree_path: &Path, on_dirty: Option<&DirtyResolution>) -> Result<GitStatus> {
    if let Some(resolution) = on_dirty {
        resolution.validate()?;
    }

    let status = get_status(worktree_path)?;
    if !status.has_changes() {
        return Ok(status);
    }

    match on_dirty {
        Some(resolution) => resolve_dirty(worktree_path, resolution)?,
        None => {
            return Err(PoolError::DirtyWorktree {
                path: worktree_path.to_path_buf(),
                changes: status.change_count(),
            })
        }
    }
    Ok(status)
}
