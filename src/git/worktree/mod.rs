//! Git worktree plumbing for the pool
//!
//! ## Module structure
//!
//! - `checks`: git availability and repository discovery
//! - `operations`: add, remove, list, prune
//! - `parser`: `git worktree list --porcelain` parsing
//! - `paths`: slot path and slot name derivation

mod checks;
mod operations;
mod parser;
mod paths;

pub use checks::{check_git_available, git_common_dir, main_worktree_root, repo_toplevel};
pub use operations::{
    add_worktree_detached, add_worktree_with_new_branch, find_worktree, list_worktrees,
    prune_worktrees, remove_worktree,
};
pub use parser::{parse_worktree_list, WorktreeInfo};
pub use paths::{
    normalize_path, repo_base_name, same_path, validate_worktree_name, worktree_name,
    worktree_parent_dir, worktree_path_for,
};
