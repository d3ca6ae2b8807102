//! Git command runner abstraction
//!
//! Every git invocation in the crate goes through these functions so that
//! failures carry the subcommand, exit code and stderr.

use std::path::Path;
use std::process::{Command, Output};

use tracing::debug;

use crate::error::{PoolError, Result};

/// Run a git command and return the raw Output.
///
/// Only spawn failures are errors here; a non-zero exit is returned as-is so
/// callers can inspect stdout and stderr themselves.
///
/// # Arguments
/// * `args` - Git command arguments (e.g., `&["branch", "-v"]`)
/// * `dir` - Working directory for the git command
pub fn run_git(args: &[&str], dir: &Path) -> Result<Output> {
    debug!(dir = %dir.display(), "git {}", args.join(" "));
    Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|source| PoolError::Spawn {
            command: args.join(" "),
            source,
        })
}

/// Run a git command, check for success, and return stdout as a trimmed String.
///
/// On failure, returns [`PoolError::ToolCommand`] with the stderr content.
pub fn run_git_checked(args: &[&str], dir: &Path) -> Result<String> {
    let output = run_git(args, dir)?;
    if !output.status.success() {
        return Err(command_error(args, &output));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Run a git command and return true if exit code is 0.
///
/// Silently swallows errors (both spawn failures and non-zero exits).
/// Use this for status checks like `rev-parse --verify`.
pub fn run_git_bool(args: &[&str], dir: &Path) -> bool {
    run_git(args, dir)
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Build a [`PoolError::ToolCommand`] from a failed invocation.
pub(crate) fn command_error(args: &[&str], output: &Output) -> PoolError {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    PoolError::ToolCommand {
        command: args.first().copied().unwrap_or("").to_string(),
        code: output.status.code(),
        stderr,
    }
}
