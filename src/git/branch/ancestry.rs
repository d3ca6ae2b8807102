//! Branch ancestry and merge status checking

use std::path::Path;

use crate::error::{PoolError, Result};
use crate::git::runner::{command_error, run_git, run_git_checked};

/// Get the commit SHA a branch (or any commit-ish) points at
///
/// # Returns
/// * `Ok(sha)` - The full commit SHA
/// * `Err(BranchNotFound)` if the name does not resolve to a commit
pub fn get_branch_head(branch: &str, repo_root: &Path) -> Result<String> {
    let spec = format!("{branch}^{{commit}}");
    run_git_checked(&["rev-parse", "--verify", "--quiet", &spec], repo_root)
        .map_err(|_| PoolError::BranchNotFound(branch.to_string()))
}

/// Nearest common ancestor of two commit-ishes
pub fn merge_base(a: &str, b: &str, repo_root: &Path) -> Result<String> {
    let args = ["merge-base", a, b];
    let output = run_git(&args, repo_root)?;
    if !output.status.success() {
        return Err(command_error(&args, &output));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Check if `branch` is fully merged into `main_branch`
///
/// The branch is merged iff the merge-base of the two equals the branch's
/// own tip, i.e. every commit on `branch` is reachable from `main_branch`.
///
/// # Returns
/// * `Ok(true)` if the branch has been merged
/// * `Ok(false)` if the branch has commits not in `main_branch`
/// * `Err(MergeCheckFailed)` if ancestry could not be computed
pub fn is_fully_merged(repo_root: &Path, branch: &str, main_branch: &str) -> Result<bool> {
    let check_failed = |reason: String| PoolError::MergeCheckFailed {
        branch: branch.to_string(),
        target: main_branch.to_string(),
        reason,
    };

    let tip = get_branch_head(branch, repo_root).map_err(|e| check_failed(e.to_string()))?;
    let base = merge_base(branch, main_branch, repo_root).map_err(|e| match e {
        // merge-base exits 1 with no output when histories are unrelated
        PoolError::ToolCommand { stderr, .. } if stderr.is_empty() => {
            check_failed("no common ancestor".to_string())
        }
        other => check_failed(other.to_string()),
    })?;

    Ok(base == tip)
}
