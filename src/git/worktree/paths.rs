//! Path resolution for pool worktrees
//!
//! A pool slot for repository `/src/app` named `a` lives at `/src/app-a`
//! (or `<worktree_directory>/app-a` when configured).

use std::path::{Path, PathBuf};

use crate::config::RepoConfig;
use crate::error::{PoolError, Result};

/// Absolute form of `path`, canonical when it exists.
///
/// Relative roots such as `.` have no file name of their own, so every
/// name derived from the repository root goes through this first.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Base name of the repository root directory.
pub fn repo_base_name(repo_root: &Path) -> Result<String> {
    normalize_path(repo_root)
        .file_name()
        .and_then(|s| s.to_str())
        .map(String::from)
        .ok_or_else(|| {
            PoolError::RepositoryState(format!(
                "Repository path has no usable directory name: {}",
                repo_root.display()
            ))
        })
}

/// Directory under which sibling worktrees are created.
pub fn worktree_parent_dir(repo_root: &Path, config: &RepoConfig) -> Result<PathBuf> {
    if let Some(dir) = &config.worktree_directory {
        return Ok(dir.clone());
    }
    normalize_path(repo_root).parent().map(Path::to_path_buf).ok_or_else(|| {
        PoolError::RepositoryState(format!(
            "Repository at {} has no parent directory for worktrees",
            repo_root.display()
        ))
    })
}

/// Full path of the slot called `name`.
pub fn worktree_path_for(repo_root: &Path, name: &str, config: &RepoConfig) -> Result<PathBuf> {
    let base = repo_base_name(repo_root)?;
    Ok(worktree_parent_dir(repo_root, config)?.join(format!("{base}-{name}")))
}

/// Slot name of a worktree directory.
///
/// Strips the `"<repoBaseName>-"` prefix from the directory name. Directories
/// that do not follow the naming scheme keep their whole base name.
pub fn worktree_name(worktree_path: &Path, repo_root: &Path) -> Option<String> {
    let dir_name = worktree_path.file_name()?.to_str()?;
    let prefix = normalize_path(repo_root)
        .file_name()
        .and_then(|s| s.to_str())
        .map(|base| format!("{base}-"));

    match prefix {
        Some(prefix) => match dir_name.strip_prefix(&prefix) {
            Some(rest) if !rest.is_empty() => Some(rest.to_string()),
            _ => Some(dir_name.to_string()),
        },
        None => Some(dir_name.to_string()),
    }
}

/// Compare two paths, canonicalizing when both exist.
///
/// Falls back to a literal comparison so that paths of deleted directories
/// still match what git has registered.
pub fn same_path(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Reject names that would escape the worktree directory.
pub fn validate_worktree_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(PoolError::InvalidInput(
            "Worktree name must not be empty".to_string(),
        ));
    }
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(PoolError::InvalidInput(format!(
            "Worktree name '{name}' must not contain path separators"
        )));
    }
    Ok(())
}
