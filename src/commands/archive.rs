//! `wtpool archive <path> [--force]`

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::error::PoolError;
use crate::pool::lifecycle::archive_worktree;

use super::CommandContext;

pub fn execute(ctx: &CommandContext, path: &Path, force: bool) -> Result<()> {
    let path = ctx.worktree_path(path)?;
    let archived = archive_worktree(&ctx.repo_root, &path, force, &ctx.config)
        .map_err(|e| archive_error(e, &path))?;

    println!("{} Archived {}", "✓".green().bold(), archived.path.display());
    if let Some(branch) = &archived.branch {
        println!("  branch {} kept", branch.cyan());
    }
    if !archived.removal.was_clean() {
        println!(
            "  removed via {:?} after {} failed attempt(s)",
            archived.removal.strategy,
            archived.removal.failures.len()
        );
    }
    Ok(())
}

/// Wrap an archive failure; unmerged branches get a `--force` hint.
fn archive_error(err: PoolError, path: &Path) -> anyhow::Error {
    if err.requires_confirmation() {
        anyhow::Error::new(err)
            .context("Archive needs confirmation; re-run with --force to remove anyway")
    } else {
        anyhow::Error::new(err).context(format!("Failed to archive {}", path.display()))
    }
}
