//! Worktree removal with recovery
//!
//! `git worktree remove` fails for reasons unrelated to intent: locked
//! files, a directory already deleted by hand, a stale registration. The
//! goal is only that the slot stops existing, so removal walks an ordered
//! list of strategies and stops at the first that succeeds:
//!
//! 1. `ForceRemove` - `git worktree remove --force`
//! 2. `DeleteThenRemove` - delete the directory, then remove the registration
//! 3. `PruneAndDelete` - `git worktree prune`, then a best-effort delete
//!
//! The policy is separate from the git plumbing via [`RemovalBackend`].

use serde::Serialize;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{PoolError, Result};
use crate::git::worktree::{prune_worktrees, remove_worktree};

/// Primitive actions the removal strategies are built from.
pub trait RemovalBackend {
    /// Remove the worktree and its registration through git.
    fn git_remove(&self, worktree_path: &Path) -> Result<()>;
    /// Delete the directory tree; a missing directory is success.
    fn delete_dir(&self, worktree_path: &Path) -> Result<()>;
    /// Drop registrations whose directories no longer exist.
    fn prune(&self) -> Result<()>;
}

/// Backend that talks to git and the local filesystem.
#[derive(Debug, Clone, Copy)]
pub struct GitRemovalBackend<'a> {
    repo_root: &'a Path,
}

impl<'a> GitRemovalBackend<'a> {
    pub fn new(repo_root: &'a Path) -> Self {
        Self { repo_root }
    }
}

impl RemovalBackend for GitRemovalBackend<'_> {
    fn git_remove(&self, worktree_path: &Path) -> Result<()> {
        remove_worktree(self.repo_root, worktree_path)
    }

    fn delete_dir(&self, worktree_path: &Path) -> Result<()> {
        match std::fs::remove_dir_all(worktree_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn prune(&self) -> Result<()> {
        prune_worktrees(self.repo_root)
    }
}

/// One way of getting rid of a worktree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemovalStrategy {
    ForceRemove,
    DeleteThenRemove,
    PruneAndDelete,
}

/// Strategies in the order they are tried.
pub const REMOVAL_CHAIN: [RemovalStrategy; 3] = [
    RemovalStrategy::ForceRemove,
    RemovalStrategy::DeleteThenRemove,
    RemovalStrategy::PruneAndDelete,
];

impl RemovalStrategy {
    fn attempt<B: RemovalBackend + ?Sized>(self, backend: &B, worktree_path: &Path) -> Result<()> {
        match self {
            RemovalStrategy::ForceRemove => backend.git_remove(worktree_path),
            RemovalStrategy::DeleteThenRemove => {
                backend.delete_dir(worktree_path)?;
                backend.git_remove(worktree_path)
            }
            RemovalStrategy::PruneAndDelete => {
                backend.prune()?;
                // The directory may already be gone
                if let Err(e) = backend.delete_dir(worktree_path) {
                    warn!(path = %worktree_path.display(), error = %e, "ignoring delete failure after prune");
                }
                Ok(())
            }
        }
    }
}

/// Which strategy removed the worktree, and what failed before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalOutcome {
    pub strategy: RemovalStrategy,
    pub failures: Vec<(RemovalStrategy, String)>,
}

impl RemovalOutcome {
    /// True when the first strategy worked.
    pub fn was_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Try `chain` in order until one strategy succeeds.
pub fn run_removal_chain<B: RemovalBackend + ?Sized>(
    backend: &B,
    worktree_path: &Path,
    chain: &[RemovalStrategy],
) -> Result<RemovalOutcome> {
    let mut failures = Vec::new();

    for &strategy in chain {
        match strategy.attempt(backend, worktree_path) {
            Ok(()) => {
                info!(path = %worktree_path.display(), ?strategy, "worktree removed");
                return Ok(RemovalOutcome { strategy, failures });
            }
            Err(e) => {
                warn!(path = %worktree_path.display(), ?strategy, error = %e, "removal strategy failed");
                failures.push((strategy, e.to_string()));
            }
        }
    }

    Err(PoolError::RemovalFailed {
        path: worktree_path.to_path_buf(),
        attempts: failures
            .into_iter()
            .map(|(strategy, err)| format!("{strategy:?}: {err}"))
            .collect(),
    })
}

/// Remove a worktree through the full recovery chain.
pub fn remove_worktree_with_recovery(repo_root: &Path, worktree_path: &Path) -> Result<RemovalOutcome> {
    run_removal_chain(&GitRemovalBackend::new(repo_root), worktree_path, &REMOVAL_CHAIN)
}
