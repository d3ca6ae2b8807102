//! Worktree output parsing
//!
//! Parses `git worktree list --porcelain` output into structured data.

use serde::Serialize;
use std::path::PathBuf;

/// Parsed worktree information from git worktree list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorktreeInfo {
    pub path: PathBuf,
    /// HEAD commit SHA
    pub head: String,
    /// Short branch name, `None` when detached
    pub branch: Option<String>,
    pub is_bare: bool,
    pub is_locked: bool,
    pub is_prunable: bool,
}

impl WorktreeInfo {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            head: String::new(),
            branch: None,
            is_bare: false,
            is_locked: false,
            is_prunable: false,
        }
    }
}

/// Parse git worktree list --porcelain output
///
/// Example input:
/// ```text
/// worktree /home/user/repo
/// HEAD abc123def456
/// branch refs/heads/main
///
/// worktree /home/user/repo-a
/// HEAD def789abc012
/// branch refs/heads/tmp-a
/// ```
///
/// Field lines that appear before any `worktree` header are dropped.
pub fn parse_worktree_list(output: &str) -> Vec<WorktreeInfo> {
    let mut worktrees = Vec::new();
    let mut current: Option<WorktreeInfo> = None;

    for line in output.lines() {
        if let Some(path) = line.strip_prefix("worktree ") {
            if let Some(wt) = current.take() {
                worktrees.push(wt);
            }
            current = Some(WorktreeInfo::new(PathBuf::from(path)));
            continue;
        }

        let Some(wt) = current.as_mut() else {
            continue;
        };

        if let Some(head) = line.strip_prefix("HEAD ") {
            wt.head = head.to_string();
        } else if let Some(branch_line) = line.strip_prefix("branch ") {
            let branch_name = branch_line
                .strip_prefix("refs/heads/")
                .unwrap_or(branch_line);
            wt.branch = Some(branch_name.to_string());
        } else if line == "bare" {
            wt.is_bare = true;
        } else if line == "detached" {
            wt.branch = None;
        } else if line == "locked" || line.starts_with("locked ") {
            wt.is_locked = true;
        } else if line == "prunable" || line.starts_with("prunable ") {
            wt.is_prunable = true;
        }
    }

    if let Some(wt) = current {
        worktrees.push(wt);
    }

    worktrees
}
