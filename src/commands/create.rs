//! `wtpool create <name>`

use anyhow::{Context, Result};
use colored::Colorize;

use crate::pool::lifecycle::create_worktree;

use super::CommandContext;

pub fn execute(ctx: &CommandContext, name: &str) -> Result<()> {
    let created = create_worktree(&ctx.repo_root, name, &ctx.config)
        .with_context(|| format!("Failed to create worktree '{name}'"))?;

    println!(
        "{} Created {} on {}",
        "✓".green().bold(),
        created.path.display(),
        created.branch.cyan()
    );

    if let Some(init) = &created.init {
        if init.success {
            println!("  init command succeeded: {}", init.command.dimmed());
        } else {
            println!(
                "  {} init command failed: {}",
                "!".yellow().bold(),
                init.command.dimmed()
            );
            if let Some(message) = &init.message {
                println!("    {message}");
            }
        }
    }
    Ok(())
}
