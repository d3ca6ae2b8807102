//! Per-worktree advisory locks
//!
//! Claim, release and archive hold an exclusive `fs2` lock for their whole
//! run so two processes cannot interleave git commands on the same slot.
//! Lock files live under the shared git directory, keyed by a hash of the
//! worktree path, so every worktree of a repository sees the same file.
//! Removing a worktree discards its lock file.
//!
//! Advisory locks are cooperative - only callers going through this module
//! are serialized.

use fs2::FileExt;
use sha2::{Digest, Sha256};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{PoolError, Result};
use crate::git::worktree::git_common_dir;

const LOCK_DIR: &str = "wtpool-locks";

/// Held lock on one worktree path. Released on drop.
#[derive(Debug)]
pub struct WorktreeLock {
    file: File,
    lock_path: PathBuf,
}

impl WorktreeLock {
    /// Block until the lock for `worktree_path` is acquired.
    pub fn acquire(repo_root: &Path, worktree_path: &Path) -> Result<Self> {
        let (file, lock_path) = open_lock_file(repo_root, worktree_path)?;
        file.lock_exclusive().map_err(|source| PoolError::Lock {
            path: worktree_path.to_path_buf(),
            source,
        })?;
        debug!(lock = %lock_path.display(), "acquired worktree lock");
        Ok(Self { file, lock_path })
    }

    /// Acquire without waiting; contention is a [`PoolError::Lock`].
    pub fn try_acquire(repo_root: &Path, worktree_path: &Path) -> Result<Self> {
        let (file, lock_path) = open_lock_file(repo_root, worktree_path)?;
        file.try_lock_exclusive().map_err(|source| PoolError::Lock {
            path: worktree_path.to_path_buf(),
            source,
        })?;
        Ok(Self { file, lock_path })
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    /// Delete the lock file, then release the lock.
    ///
    /// Used once the worktree itself is gone. A later operation on the same
    /// path creates a fresh lock file.
    pub fn discard(self) -> Result<()> {
        match std::fs::remove_file(&self.lock_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for WorktreeLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            debug!(lock = %self.lock_path.display(), error = %e, "failed to unlock");
        }
    }
}

/// Lock file name for a worktree path.
pub(crate) fn lock_file_name(worktree_path: &Path) -> String {
    let key = worktree_path
        .canonicalize()
        .or_else(|_| std::path::absolute(worktree_path))
        .unwrap_or_else(|_| worktree_path.to_path_buf());
    let digest = Sha256::digest(key.to_string_lossy().as_bytes());
    format!("{}.lock", hex::encode(&digest[..8]))
}

fn open_lock_file(repo_root: &Path, worktree_path: &Path) -> Result<(File, PathBuf)> {
    let dir = git_common_dir(repo_root)?.join(LOCK_DIR);
    std::fs::create_dir_all(&dir)?;
    let lock_path = dir.join(lock_file_name(worktree_path));

    #[allow(clippy::suspicious_open_options)]
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(&lock_path)?;
    Ok((file, lock_path))
}
