//! `wtpool rebase <path> <from> <onto>`

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::pool::lifecycle::rebase_worktree;

use super::CommandContext;

pub fn execute(ctx: &CommandContext, path: &Path, from: &str, onto: &str) -> Result<()> {
    let path = ctx.worktree_path(path)?;
    let rebased = rebase_worktree(&path, from, onto)
        .with_context(|| format!("Failed to rebase '{from}' onto '{onto}' in {}", path.display()))?;

    let head: String = rebased.head.chars().take(8).collect();
    println!(
        "{} Rebased {} onto {} ({})",
        "✓".green().bold(),
        rebased.branch.cyan(),
        rebased.onto.cyan(),
        head.dimmed()
    );
    Ok(())
}
