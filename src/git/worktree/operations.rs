//! Worktree operations
//!
//! Thin wrappers over `git worktree` subcommands: add, remove, list, prune.

use std::path::Path;

use crate::error::{PoolError, Result};
use crate::git::runner::run_git_checked;

use super::parser::{parse_worktree_list, WorktreeInfo};
use super::paths::same_path;

/// List all worktrees registered with the repository, in git's order.
pub fn list_worktrees(repo_root: &Path) -> Result<Vec<WorktreeInfo>> {
    let stdout = run_git_checked(&["worktree", "list", "--porcelain"], repo_root)?;
    Ok(parse_worktree_list(&stdout))
}

/// Find the registered worktree at `worktree_path`.
pub fn find_worktree(repo_root: &Path, worktree_path: &Path) -> Result<WorktreeInfo> {
    list_worktrees(repo_root)?
        .into_iter()
        .find(|wt| same_path(&wt.path, worktree_path))
        .ok_or_else(|| PoolError::WorktreeNotFound(worktree_path.to_path_buf()))
}

/// Create a worktree on a new branch started at `start_point`.
///
/// Runs: git worktree add -b {branch} {path} {start_point}
pub fn add_worktree_with_new_branch(
    repo_root: &Path,
    worktree_path: &Path,
    branch: &str,
    start_point: &str,
) -> Result<()> {
    let path = worktree_path.to_string_lossy();
    run_git_checked(
        &["worktree", "add", "-b", branch, &path, start_point],
        repo_root,
    )?;
    Ok(())
}

/// Create a worktree with a detached HEAD at `commitish`.
///
/// Runs: git worktree add --detach {path} {commitish}
pub fn add_worktree_detached(repo_root: &Path, worktree_path: &Path, commitish: &str) -> Result<()> {
    let path = worktree_path.to_string_lossy();
    run_git_checked(&["worktree", "add", "--detach", &path, commitish], repo_root)?;
    Ok(())
}

/// Force-remove a worktree and its registration.
///
/// Runs: git worktree remove --force {path}
pub fn remove_worktree(repo_root: &Path, worktree_path: &Path) -> Result<()> {
    let path = worktree_path.to_string_lossy();
    run_git_checked(&["worktree", "remove", "--force", &path], repo_root)?;
    Ok(())
}

/// Drop registrations of worktrees whose directories are gone.
pub fn prune_worktrees(repo_root: &Path) -> Result<()> {
    run_git_checked(&["worktree", "prune"], repo_root)?;
    Ok(())
}
