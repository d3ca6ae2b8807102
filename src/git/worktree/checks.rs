//! Prerequisite checks
//!
//! Provides functions for checking git availability and that a path is a
//! usable repository root.

use std::path::{Path, PathBuf};

use crate::error::{PoolError, Result};
use crate::git::runner::{run_git_bool, run_git_checked};

use super::operations::list_worktrees;

/// Check that a git executable is on PATH and runs.
pub fn check_git_available() -> Result<PathBuf> {
    let git = which::which("git").map_err(|e| {
        PoolError::RepositoryState(format!("Git is not installed or not in PATH: {e}"))
    })?;

    if !run_git_bool(&["--version"], Path::new(".")) {
        return Err(PoolError::RepositoryState(
            "Git is not working properly".to_string(),
        ));
    }

    Ok(git)
}

/// Top-level directory of the working tree containing `dir`.
pub fn repo_toplevel(dir: &Path) -> Result<PathBuf> {
    run_git_checked(&["rev-parse", "--show-toplevel"], dir)
        .map(PathBuf::from)
        .map_err(|_| {
            PoolError::RepositoryState(format!("Not a git repository: {}", dir.display()))
        })
}

/// Working tree of the main checkout, even when `dir` is inside a linked worktree.
///
/// git always lists the main worktree first.
pub fn main_worktree_root(dir: &Path) -> Result<PathBuf> {
    let toplevel = repo_toplevel(dir)?;
    let main = list_worktrees(&toplevel)?.into_iter().next().ok_or_else(|| {
        PoolError::RepositoryState(format!("No worktrees listed for {}", toplevel.display()))
    })?;
    if main.is_bare {
        return Err(PoolError::RepositoryState(format!(
            "Bare repository at {} has no primary working copy",
            main.path.display()
        )));
    }
    Ok(main.path)
}

/// The shared `.git` directory, common to every worktree of the repository.
pub fn git_common_dir(dir: &Path) -> Result<PathBuf> {
    let raw = run_git_checked(&["rev-parse", "--git-common-dir"], dir).map_err(|_| {
        PoolError::RepositoryState(format!("Not a git repository: {}", dir.display()))
    })?;
    let path = PathBuf::from(raw);
    // Relative to `dir` when run from the main working tree
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(dir.join(path))
    }
}
