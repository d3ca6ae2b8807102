//! Default branch resolution

use std::path::Path;

use tracing::debug;

use crate::error::{PoolError, Result};
use crate::git::runner::run_git;

use super::operations::{current_branch, list_branches, REMOTE};

/// Local branch names tried, in order, when the remote has no default.
const FALLBACK_BRANCHES: [&str; 3] = ["main", "master", "develop"];

/// Determine the branch new slots start from and released slots reset to.
///
/// Resolution order:
/// 1. A non-empty `main_branch_override`, returned without touching git
/// 2. The remote's symbolic HEAD (`refs/remotes/origin/HEAD`)
/// 3. The first of `main`, `master`, `develop` that exists locally
/// 4. The currently checked-out branch
///
/// A repository with no local branches, or one where every step fails
/// and HEAD is detached, is a [`PoolError::RepositoryState`].
pub fn resolve_default_branch(repo_root: &Path, main_branch_override: Option<&str>) -> Result<String> {
    if let Some(branch) = main_branch_override.filter(|b| !b.trim().is_empty()) {
        return Ok(branch.to_string());
    }

    if let Some(branch) = remote_default_branch(repo_root) {
        debug!(branch = %branch, "default branch from remote HEAD");
        return Ok(branch);
    }

    let branches = list_branches(repo_root)?;
    if branches.is_empty() {
        return Err(PoolError::RepositoryState(format!(
            "Repository at {} has no branches",
            repo_root.display()
        )));
    }

    if let Some(branch) = FALLBACK_BRANCHES
        .iter()
        .find(|candidate| branches.iter().any(|b| b == *candidate))
    {
        return Ok((*branch).to_string());
    }

    current_branch(repo_root)?.ok_or_else(|| {
        PoolError::RepositoryState(format!(
            "Could not determine default branch: HEAD is detached in {}",
            repo_root.display()
        ))
    })
}

fn remote_default_branch(repo_root: &Path) -> Option<String> {
    let head_ref = format!("refs/remotes/{REMOTE}/HEAD");
    let output = run_git(&["symbolic-ref", &head_ref], repo_root).ok()?;
    if !output.status.success() {
        return None;
    }
    let prefix = format!("refs/remotes/{REMOTE}/");
    String::from_utf8_lossy(&output.stdout)
        .trim()
        .strip_prefix(&prefix)
        .filter(|b| !b.is_empty())
        .map(String::from)
}
