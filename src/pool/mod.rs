//! The worktree pool
//!
//! - `classify`: available / claimed / base split of the worktree listing
//! - `dirty`: resolving uncommitted changes before a slot changes branch
//! - `init_hook`: post-create command
//! - `lifecycle`: create, claim, release, archive, merge, rebase
//! - `lock`: per-worktree advisory locks
//! - `removal`: ordered removal strategies

pub mod classify;
pub mod dirty;
pub mod init_hook;
pub mod lifecycle;
pub mod lock;
pub mod removal;

pub use classify::{classify, is_available, is_base_worktree, pool_snapshot, PoolSlot, PoolSnapshot};
pub use dirty::{
    amend_changes, clean_changes, commit_changes, ensure_clean, resolve_dirty, stash_changes,
    DirtyResolution,
};
pub use init_hook::{run_init_command, InitOutcome};
pub use lifecycle::{
    archive_worktree, claim_worktree, create_worktree, merge_worktree, rebase_worktree,
    release_worktree, ArchivedWorktree, ClaimedWorktree, CreatedWorktree, MergeOptions,
    MergeOutcome, RebasedWorktree, ReleasedWorktree,
};
pub use lock::WorktreeLock;
pub use removal::{
    remove_worktree_with_recovery, run_removal_chain, GitRemovalBackend, RemovalBackend,
    RemovalOutcome, RemovalStrategy, REMOVAL_CHAIN,
};
