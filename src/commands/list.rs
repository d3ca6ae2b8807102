//! `wtpool list`

use anyhow::{Context, Result};
use colored::Colorize;

use crate::git::worktree::WorktreeInfo;
use crate::pool::classify::{pool_snapshot, PoolSlot};

use super::CommandContext;

/// Print the base worktree and every pool slot, available first.
pub fn execute(ctx: &CommandContext, json: bool) -> Result<()> {
    let snapshot = pool_snapshot(&ctx.repo_root).context("Failed to list worktrees")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    if let Some(base) = &snapshot.base {
        println!("{} {}", "base".bold(), describe(base));
    }
    println!("{}", "─".repeat(50).dimmed());

    if snapshot.available.is_empty() && snapshot.claimed.is_empty() {
        println!("(no pool worktrees)");
        return Ok(());
    }
    for slot in &snapshot.available {
        print_slot(slot, "available".green());
    }
    for slot in &snapshot.claimed {
        print_slot(slot, "claimed".yellow());
    }
    println!(
        "\n{} available, {} claimed",
        snapshot.available.len(),
        snapshot.claimed.len()
    );
    Ok(())
}

fn print_slot(slot: &PoolSlot, state: colored::ColoredString) {
    println!("  {:<10} {:<16} {}", state, slot.name.cyan(), describe(&slot.worktree));
}

fn describe(worktree: &WorktreeInfo) -> String {
    let branch = worktree
        .branch
        .clone()
        .unwrap_or_else(|| "(detached)".to_string());
    let head: String = worktree.head.chars().take(8).collect();
    let mut line = format!("{branch} {} {}", head.dimmed(), worktree.path.display());
    if worktree.is_locked {
        line.push_str(&format!(" {}", "[locked]".red()));
    }
    if worktree.is_prunable {
        line.push_str(&format!(" {}", "[prunable]".red()));
    }
    line
}
