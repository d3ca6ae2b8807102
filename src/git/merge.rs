//! Git merge and rebase primitives
//!
//! Conflicts are reported as [`PoolError::Conflict`] and the working tree is
//! left as git left it, mid-merge or mid-rebase, for manual resolution.

use std::path::Path;

use crate::error::{PoolError, Result};
use crate::git::runner::{command_error, run_git, run_git_checked};

/// Merge `from` into the branch checked out in `dir`.
///
/// With `squash` the changes are staged but not committed.
pub fn merge_branch(
    dir: &Path,
    from: &str,
    squash: bool,
    no_ff: bool,
    message: Option<&str>,
) -> Result<()> {
    let mut args = vec!["merge"];
    if squash {
        args.push("--squash");
    }
    if no_ff {
        args.push("--no-ff");
    }
    if let Some(msg) = message.filter(|_| !squash) {
        args.extend(["-m", msg]);
    }
    args.push(from);

    let output = run_git(&args, dir)?;
    if output.status.success() {
        return Ok(());
    }

    let conflicts = get_conflicting_files(dir)?;
    if !conflicts.is_empty() {
        return Err(PoolError::Conflict {
            operation: "merge",
            files: conflicts,
        });
    }
    Err(command_error(&args, &output))
}

/// Commit whatever is staged with `message`.
pub fn commit_staged(dir: &Path, message: &str) -> Result<()> {
    run_git_checked(&["commit", "-m", message], dir)?;
    Ok(())
}

/// Rebase the branch checked out in `dir` onto `onto`.
pub fn rebase_onto(dir: &Path, onto: &str) -> Result<()> {
    let args = ["rebase", onto];
    let output = run_git(&args, dir)?;
    if output.status.success() {
        return Ok(());
    }

    let conflicts = get_conflicting_files(dir)?;
    if !conflicts.is_empty() {
        return Err(PoolError::Conflict {
            operation: "rebase",
            files: conflicts,
        });
    }
    Err(command_error(&args, &output))
}

/// Get list of files with unresolved conflicts
pub fn get_conflicting_files(dir: &Path) -> Result<Vec<String>> {
    let stdout = run_git_checked(&["diff", "--name-only", "--diff-filter=U"], dir)?;
    Ok(stdout
        .lines()
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect())
}

/// Default commit message for a squash merge
pub fn squash_message(from: &str) -> String {
    format!("Merge {from} (squashed)")
}
