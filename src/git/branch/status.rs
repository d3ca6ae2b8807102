//! Working tree status
//!
//! Buckets `git status --porcelain -z` entries so callers can decide how to
//! resolve uncommitted changes before a worktree changes hands.

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::Result;
use crate::git::runner::{command_error, run_git};

/// Files in a working tree, grouped by kind of change.
///
/// Paths are relative to the worktree root. A file can appear in more than
/// one bucket, e.g. a staged modification is in both `modified` and `staged`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GitStatus {
    pub modified: BTreeSet<String>,
    pub staged: BTreeSet<String>,
    /// Untracked files
    pub not_added: BTreeSet<String>,
    pub deleted: BTreeSet<String>,
    /// Files newly added to the index
    pub created: BTreeSet<String>,
    pub renamed: BTreeSet<String>,
    pub conflicted: BTreeSet<String>,
}

impl GitStatus {
    /// True when anything would be lost or carried over by a checkout.
    pub fn has_changes(&self) -> bool {
        !(self.modified.is_empty()
            && self.staged.is_empty()
            && self.not_added.is_empty()
            && self.deleted.is_empty()
            && self.conflicted.is_empty())
    }

    pub fn has_staged(&self) -> bool {
        !self.staged.is_empty()
    }

    /// Number of distinct paths with any change.
    pub fn change_count(&self) -> usize {
        self.modified
            .iter()
            .chain(&self.staged)
            .chain(&self.not_added)
            .chain(&self.deleted)
            .chain(&self.created)
            .chain(&self.renamed)
            .chain(&self.conflicted)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// One-line description such as `2 modified, 1 untracked`.
    pub fn summary(&self) -> String {
        let buckets = [
            (self.modified.len(), "modified"),
            (self.staged.len(), "staged"),
            (self.not_added.len(), "untracked"),
            (self.deleted.len(), "deleted"),
            (self.created.len(), "created"),
            (self.renamed.len(), "renamed"),
            (self.conflicted.len(), "conflicted"),
        ];
        let parts: Vec<String> = buckets
            .iter()
            .filter(|(n, _)| *n > 0)
            .map(|(n, label)| format!("{n} {label}"))
            .collect();
        if parts.is_empty() {
            "clean".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Read the status of the working tree at `worktree_path`.
pub fn get_status(worktree_path: &Path) -> Result<GitStatus> {
    // Leading spaces are significant, so stdout is not trimmed
    let args = ["status", "--porcelain=v1", "-z", "--untracked-files=all"];
    let output = run_git(&args, worktree_path)?;
    if !output.status.success() {
        return Err(command_error(&args, &output));
    }
    Ok(parse_status(&String::from_utf8_lossy(&output.stdout)))
}

fn is_conflict(x: char, y: char) -> bool {
    matches!(
        (x, y),
        ('U', _) | (_, 'U') | ('A', 'A') | ('D', 'D')
    )
}

/// Parse NUL-separated porcelain v1 output.
pub(crate) fn parse_status(output: &str) -> GitStatus {
    let mut status = GitStatus::default();
    let mut entries = output.split('\0').filter(|e| !e.is_empty());

    while let Some(entry) = entries.next() {
        let mut chars = entry.chars();
        let (Some(x), Some(y)) = (chars.next(), chars.next()) else {
            continue;
        };
        let Some(path) = entry.get(3..).map(String::from) else {
            continue;
        };

        // Renames and copies carry the original path as the next entry
        if x == 'R' || x == 'C' {
            entries.next();
        }

        if x == '?' && y == '?' {
            status.not_added.insert(path);
            continue;
        }
        if x == '!' {
            continue;
        }
        if is_conflict(x, y) {
            status.conflicted.insert(path);
            continue;
        }

        if x != ' ' {
            status.staged.insert(path.clone());
        }
        match x {
            'A' => {
                status.created.insert(path.clone());
            }
            'R' => {
                status.renamed.insert(path.clone());
            }
            'M' => {
                status.modified.insert(path.clone());
            }
            'D' => {
                status.deleted.insert(path.clone());
            }
            _ => {}
        }
        match y {
            'M' => {
                status.modified.insert(path);
            }
            'D' => {
                status.deleted.insert(path);
            }
            _ => {}
        }
    }

    status
}
