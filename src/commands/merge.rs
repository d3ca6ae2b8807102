//! `wtpool merge <from> <to>`

use anyhow::{Context, Result};
use colored::Colorize;

use crate::pool::lifecycle::{merge_worktree, MergeOptions};

use super::CommandContext;

pub fn execute(ctx: &CommandContext, from: &str, to: &str, options: MergeOptions) -> Result<()> {
    let outcome = merge_worktree(&ctx.repo_root, from, to, &options)
        .with_context(|| format!("Failed to merge '{from}' into '{to}'"))?;

    if outcome.committed {
        println!(
            "{} Merged {} into {}",
            "✓".green().bold(),
            outcome.from.cyan(),
            outcome.to.cyan()
        );
    } else {
        println!("{} Nothing to merge from {}", "✓".green().bold(), outcome.from.cyan());
    }
    if let Some(path) = &outcome.removed_worktree {
        println!("  removed worktree {}", path.display());
    }
    Ok(())
}
