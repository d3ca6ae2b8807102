//! Error types for pool operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`PoolError`].
pub type Result<T> = std::result::Result<T, PoolError>;

/// Errors raised by the worktree pool core.
#[derive(Debug, Error)]
pub enum PoolError {
    /// git ran but exited non-zero
    #[error("git {command} failed (exit {}): {stderr}", .code.map_or_else(|| "signal".to_string(), |c| c.to_string()))]
    ToolCommand {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// git could not be started at all
    #[error("Failed to execute: git {command}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The repository is not in a state the operation can work with
    #[error("Repository state error: {0}")]
    RepositoryState(String),

    /// The branch has commits that are not in the target branch
    #[error("Branch '{branch}' is not fully merged into '{target}'")]
    UnmergedBranch { branch: String, target: String },

    /// Ancestry could not be determined, so the branch is treated as unsafe to drop
    #[error("Could not determine whether '{branch}' is merged into '{target}': {reason}")]
    MergeCheckFailed {
        branch: String,
        target: String,
        reason: String,
    },

    #[error("Worktree not found: {}", .0.display())]
    WorktreeNotFound(PathBuf),

    #[error("Branch not found: {0}")]
    BranchNotFound(String),

    /// The repository root is never part of the pool
    #[error("{} is the base worktree and cannot be claimed, released or archived", .0.display())]
    BaseWorktree(PathBuf),

    #[error("Worktree path already exists: {}", .0.display())]
    WorktreeExists(PathBuf),

    /// Uncommitted changes and no resolution was chosen
    #[error("Worktree {} has {changes} uncommitted change(s); choose stash, commit, amend, clean or cancel", .path.display())]
    DirtyWorktree { path: PathBuf, changes: usize },

    /// The caller picked cancel while resolving uncommitted changes
    #[error("Operation cancelled for {}", .0.display())]
    Aborted(PathBuf),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A merge or rebase stopped on conflicts; the working tree is left conflicted
    #[error("{operation} stopped with conflicts in: {}", .files.join(", "))]
    Conflict {
        operation: &'static str,
        files: Vec<String>,
    },

    #[error("Failed to lock worktree {}: {source}", .path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every removal strategy failed
    #[error("Failed to remove worktree {}: {}", .path.display(), .attempts.join("; "))]
    RemovalFailed {
        path: PathBuf,
        attempts: Vec<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PoolError {
    /// True for the merge-safety signals that a caller may override with `force`.
    pub fn requires_confirmation(&self) -> bool {
        matches!(
            self,
            PoolError::UnmergedBranch { .. } | PoolError::MergeCheckFailed { .. }
        )
    }
}
