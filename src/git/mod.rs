//! Git plumbing for the worktree pool
//!
//! This module provides:
//! - A runner that turns every git invocation into a typed result
//! - Worktree listing, creation and removal
//! - Branch resolution, checkout and ancestry checks
//! - Working tree status

pub mod branch;
pub mod merge;
pub mod runner;
pub mod worktree;

pub use branch::{
    get_status, is_fully_merged, is_tmp_branch, resolve_default_branch, tmp_branch_for, GitStatus,
};
pub use worktree::{
    check_git_available, find_worktree, list_worktrees, main_worktree_root, prune_worktrees,
    repo_toplevel, worktree_name, WorktreeInfo,
};
