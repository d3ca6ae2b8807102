//! `wtpool claim <path> <branch>`

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::pool::dirty::DirtyResolution;
use crate::pool::lifecycle::claim_worktree;

use super::CommandContext;

pub fn execute(
    ctx: &CommandContext,
    path: &Path,
    branch: &str,
    on_dirty: Option<DirtyResolution>,
) -> Result<()> {
    let path = ctx.worktree_path(path)?;
    let claimed = claim_worktree(&ctx.repo_root, &path, branch, &ctx.config, on_dirty.as_ref())
        .with_context(|| format!("Failed to claim {} for '{branch}'", path.display()))?;

    let verb = if claimed.created_branch {
        "new branch"
    } else {
        "existing branch"
    };
    println!(
        "{} Claimed {} on {} ({verb})",
        "✓".green().bold(),
        claimed.path.display(),
        claimed.branch.cyan()
    );
    if let Some(previous) = &claimed.previous_branch {
        println!("  was on {}", previous.dimmed());
    }
    Ok(())
}
