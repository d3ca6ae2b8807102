//! Lifecycle operations over a pool slot
//!
//! A slot moves `Nonexistent -> Available -> Claimed -> Available -> ...`
//! and ends at `Archived`. Everything except merge holds the slot's
//! [`WorktreeLock`](crate::pool::lock::WorktreeLock) while it runs.

mod archive;
mod claim;
mod create;
mod merge;
mod rebase;
mod release;

pub use archive::{archive_worktree, ArchivedWorktree};
pub use claim::{claim_worktree, ClaimedWorktree};
pub use create::{create_worktree, CreatedWorktree};
pub use merge::{merge_worktree, MergeOptions, MergeOutcome};
pub use rebase::{rebase_worktree, RebasedWorktree};
pub use release::{release_worktree, ReleasedWorktree};

use std::path::Path;

use crate::error::{PoolError, Result};
use crate::git::worktree::{find_worktree, WorktreeInfo};
use crate::pool::classify::is_base_worktree;

/// Look up a registered, non-base worktree whose directory still exists.
pub(super) fn require_pool_worktree(repo_root: &Path, worktree_path: &Path) -> Result<WorktreeInfo> {
    let worktree = find_worktree(repo_root, worktree_path)?;
    if is_base_worktree(&worktree.path, repo_root) {
        return Err(PoolError::BaseWorktree(worktree.path));
    }
    if !worktree.path.is_dir() {
        return Err(PoolError::WorktreeNotFound(worktree.path));
    }
    Ok(worktree)
}
