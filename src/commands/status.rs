//! `wtpool status <path>`

use anyhow::{Context, Result};
use colored::Colorize;
use std::collections::BTreeSet;
use std::path::Path;

use crate::git::branch::{current_branch, get_status};

use super::CommandContext;

/// Print the uncommitted changes of a worktree, bucketed by kind.
pub fn execute(ctx: &CommandContext, path: &Path, json: bool) -> Result<()> {
    let path = ctx.worktree_path(path)?;
    let status = get_status(&path)
        .with_context(|| format!("Failed to read status of {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let branch = current_branch(&path)?.unwrap_or_else(|| "(detached)".to_string());
    println!("{} on {}", path.display(), branch.cyan());
    if !status.has_changes() {
        println!("{} clean", "✓".green().bold());
        return Ok(());
    }

    println!("{}", status.summary().yellow());
    print_bucket("modified", &status.modified);
    print_bucket("staged", &status.staged);
    print_bucket("untracked", &status.not_added);
    print_bucket("deleted", &status.deleted);
    print_bucket("renamed", &status.renamed);
    print_bucket("conflicted", &status.conflicted);
    Ok(())
}

fn print_bucket(label: &str, files: &BTreeSet<String>) {
    if files.is_empty() {
        return;
    }
    println!("  {}:", label.bold());
    for file in files {
        println!("    {file}");
    }
}
