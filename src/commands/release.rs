//! `wtpool release <path>`

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::pool::dirty::DirtyResolution;
use crate::pool::lifecycle::release_worktree;

use super::CommandContext;

pub fn execute(ctx: &CommandContext, path: &Path, on_dirty: Option<DirtyResolution>) -> Result<()> {
    let path = ctx.worktree_path(path)?;
    let released = release_worktree(&ctx.repo_root, &path, &ctx.config, on_dirty.as_ref())
        .with_context(|| format!("Failed to release {}", path.display()))?;

    println!(
        "{} Released {} to {} at {}",
        "✓".green().bold(),
        released.path.display(),
        released.tmp_branch.cyan(),
        released.target.dimmed()
    );
    if let Some(previous) = &released.previous_branch {
        println!("  was on {}", previous.dimmed());
    }
    Ok(())
}
