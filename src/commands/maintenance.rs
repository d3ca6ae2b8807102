//! `wtpool default-branch` and `wtpool prune`

use anyhow::{Context, Result};
use colored::Colorize;

use crate::git::branch::resolve_default_branch;
use crate::git::worktree::prune_worktrees;

use super::CommandContext;

/// Print the branch slots are created from and released to.
pub fn default_branch(ctx: &CommandContext) -> Result<()> {
    let branch = resolve_default_branch(&ctx.repo_root, ctx.config.main_branch_override())
        .context("Failed to resolve default branch")?;
    println!("{branch}");
    Ok(())
}

/// Drop registrations of worktrees whose directories are gone.
pub fn prune(ctx: &CommandContext) -> Result<()> {
    prune_worktrees(&ctx.repo_root).context("Failed to prune worktrees")?;
    println!("{} Pruned stale worktree references", "✓".green().bold());
    Ok(())
}
