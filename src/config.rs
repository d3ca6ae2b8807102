//! Per-repository pool configuration.
//!
//! The core never loads or stores this; callers pass a value into every
//! operation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RepoConfig {
    /// Branch slots start from and reset to. `None` resolves it from git.
    pub main_branch: Option<String>,
    /// Shell command run inside every newly created worktree.
    pub init_command: Option<String>,
    /// Where `<repo>-<name>` directories are created. Defaults to the
    /// repository's parent directory.
    pub worktree_directory: Option<PathBuf>,
}

impl RepoConfig {
    /// The main branch override, treating an empty string as unset.
    pub fn main_branch_override(&self) -> Option<&str> {
        self.main_branch
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merged_with(self, other: RepoConfig) -> RepoConfig {
        RepoConfig {
            main_branch: other.main_branch.or(self.main_branch),
            init_command: other.init_command.or(self.init_command),
            worktree_directory: other.worktree_directory.or(self.worktree_directory),
        }
    }
}
