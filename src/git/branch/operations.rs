//! Core branch operations: existence, checkout, reset, fetch

use std::path::Path;

use tracing::debug;

use crate::error::{PoolError, Result};
use crate::git::runner::{run_git_bool, run_git_checked};

/// Remote consulted for default branch detection and fetches.
pub const REMOTE: &str = "origin";

/// Check if a local branch exists
pub fn branch_exists(name: &str, dir: &Path) -> bool {
    let ref_path = format!("refs/heads/{name}");
    run_git_bool(&["rev-parse", "--verify", "--quiet", &ref_path], dir)
}

/// Check if a remote-tracking branch exists, e.g. `origin/main`
pub fn remote_branch_exists(name: &str, dir: &Path) -> bool {
    let ref_path = format!("refs/remotes/{REMOTE}/{name}");
    run_git_bool(&["rev-parse", "--verify", "--quiet", &ref_path], dir)
}

/// Get the current branch name, `None` when HEAD is detached
pub fn current_branch(dir: &Path) -> Result<Option<String>> {
    let name = run_git_checked(&["rev-parse", "--abbrev-ref", "HEAD"], dir)?;
    if name == "HEAD" {
        Ok(None)
    } else {
        Ok(Some(name))
    }
}

/// List local branch names
pub fn list_branches(dir: &Path) -> Result<Vec<String>> {
    let stdout = run_git_checked(
        &["for-each-ref", "--format=%(refname:short)", "refs/heads/"],
        dir,
    )?;
    Ok(stdout
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect())
}

/// Whether HEAD points at a commit
pub fn has_head_commit(dir: &Path) -> bool {
    run_git_bool(&["rev-parse", "--verify", "--quiet", "HEAD"], dir)
}

/// Check that `name` is a valid branch name
pub fn validate_branch_name(name: &str, dir: &Path) -> Result<()> {
    if name.trim().is_empty() || !run_git_bool(&["check-ref-format", "--branch", name], dir) {
        return Err(PoolError::InvalidInput(format!(
            "'{name}' is not a valid branch name"
        )));
    }
    Ok(())
}

/// Checkout an existing branch
pub fn checkout(branch: &str, dir: &Path) -> Result<()> {
    run_git_checked(&["checkout", branch], dir)?;
    Ok(())
}

/// Create `branch` at `start_point` and check it out
///
/// The new branch never tracks the start point, even when that is a
/// remote-tracking ref.
pub fn checkout_new_branch(branch: &str, start_point: &str, dir: &Path) -> Result<()> {
    run_git_checked(&["checkout", "--no-track", "-b", branch, start_point], dir)?;
    Ok(())
}

/// Create or reset `branch` to `start_point` and check it out
pub fn checkout_reset_branch(branch: &str, start_point: &str, dir: &Path) -> Result<()> {
    run_git_checked(&["checkout", "--no-track", "-B", branch, start_point], dir)?;
    Ok(())
}

/// Hard-reset the checked-out branch to `target`
pub fn reset_hard(target: &str, dir: &Path) -> Result<()> {
    run_git_checked(&["reset", "--hard", target], dir)?;
    Ok(())
}

/// Fetch `branch` from the remote, ignoring failures.
///
/// Offline use must keep working, so a failed fetch only logs.
/// Returns whether the fetch succeeded.
pub fn fetch_best_effort(branch: &str, dir: &Path) -> bool {
    match run_git_checked(&["fetch", REMOTE, branch], dir) {
        Ok(_) => true,
        Err(e) => {
            debug!(branch, error = %e, "fetch failed, continuing with local refs");
            false
        }
    }
}

/// Commit to reset a released slot to: `origin/<default>` when it exists,
/// else the local default branch.
pub fn release_target(default_branch: &str, dir: &Path) -> Result<String> {
    if remote_branch_exists(default_branch, dir) {
        return Ok(format!("{REMOTE}/{default_branch}"));
    }
    if branch_exists(default_branch, dir) {
        return Ok(default_branch.to_string());
    }
    Err(PoolError::BranchNotFound(default_branch.to_string()))
}
