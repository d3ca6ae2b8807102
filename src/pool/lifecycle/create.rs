//! Create a new pool slot

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::RepoConfig;
use crate::error::{PoolError, Result};
use crate::git::branch::{branch_exists, checkout_reset_branch, resolve_default_branch, tmp_branch_for};
use crate::git::worktree::{
    add_worktree_detached, add_worktree_with_new_branch, validate_worktree_name, worktree_path_for,
};
use crate::pool::init_hook::{run_init_command, InitOutcome};
use crate::pool::lock::WorktreeLock;

/// A freshly created, available slot.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedWorktree {
    pub path: PathBuf,
    pub branch: String,
    /// Present when an init command is configured
    pub init: Option<InitOutcome>,
}

/// Create the slot `name` at `<parent>/<repo>-<name>` on branch `tmp-<name>`.
///
/// A surviving `tmp-<name>` branch (left behind by an archived slot) is
/// reused: the worktree is added detached at it and the branch is then
/// checked out inside, so the slot ends up on the branch rather than a
/// detached HEAD. Otherwise the branch is created from the default branch.
///
/// The configured init command runs afterwards; its failure is reported in
/// [`CreatedWorktree::init`] and does not remove the worktree.
pub fn create_worktree(repo_root: &Path, name: &str, config: &RepoConfig) -> Result<CreatedWorktree> {
    validate_worktree_name(name)?;
    let path = worktree_path_for(repo_root, name, config)?;
    let branch = tmp_branch_for(name);

    let _lock = WorktreeLock::acquire(repo_root, &path)?;

    if path.exists() {
        return Err(PoolError::WorktreeExists(path));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if branch_exists(&branch, repo_root) {
        add_worktree_detached(repo_root, &path, &branch)?;
        checkout_reset_branch(&branch, &branch, &path)?;
    } else {
        let default_branch = resolve_default_branch(repo_root, config.main_branch_override())?;
        add_worktree_with_new_branch(repo_root, &path, &branch, &default_branch)?;
    }
    info!(path = %path.display(), branch = %branch, "created worktree");

    let init = config
        .init_command
        .as_deref()
        .map(str::trim)
        .filter(|cmd| !cmd.is_empty())
        .map(|cmd| run_init_command(cmd, &path));

    Ok(CreatedWorktree { path, branch, init })
}
