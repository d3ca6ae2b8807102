//! Post-create init command
//!
//! Runs the configured `init_command` inside a freshly created worktree.
//! The outcome is reported to the caller; a failing hook never undoes the
//! worktree.

use serde::Serialize;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{info, warn};

/// Result of running the init command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitOutcome {
    pub command: String,
    pub success: bool,
    pub exit_code: Option<i32>,
    /// stderr on failure, or the spawn error
    pub message: Option<String>,
}

/// Run `command` through the platform shell with `worktree_path` as cwd.
///
/// Uses `sh -c` on Unix and `cmd /C` on Windows; the command string is a
/// single argument so no splitting happens on our side.
pub fn run_init_command(command: &str, worktree_path: &Path) -> InitOutcome {
    let mut cmd = if cfg!(target_family = "unix") {
        let mut c = Command::new("sh");
        c.arg("-c").arg(command);
        c
    } else {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(command);
        c
    };

    let result = cmd
        .current_dir(worktree_path)
        .stdin(Stdio::null())
        .output();

    let outcome = match result {
        Ok(output) if output.status.success() => InitOutcome {
            command: command.to_string(),
            success: true,
            exit_code: output.status.code(),
            message: None,
        },
        Ok(output) => InitOutcome {
            command: command.to_string(),
            success: false,
            exit_code: output.status.code(),
            message: Some(String::from_utf8_lossy(&output.stderr).trim().to_string()),
        },
        Err(e) => InitOutcome {
            command: command.to_string(),
            success: false,
            exit_code: None,
            message: Some(format!("Failed to spawn command: {e}")),
        },
    };

    if outcome.success {
        info!(worktree = %worktree_path.display(), command, "init command finished");
    } else {
        warn!(
            worktree = %worktree_path.display(),
            command,
            exit_code = ?outcome.exit_code,
            "init command failed"
        );
    }
    outcome
}
