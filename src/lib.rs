//! Pool of reusable git worktrees
//!
//! Worktrees parked on a `tmp-<name>` branch are available; any other branch
//! means the slot is claimed. Pool state is read from git on every call.

pub mod commands;
pub mod completions;
pub mod config;
pub mod error;
pub mod git;
pub mod logging;
pub mod pool;

pub use config::RepoConfig;
pub use error::{PoolError, Result};
pub use git::{
    get_status, is_fully_merged, list_worktrees, resolve_default_branch, GitStatus, WorktreeInfo,
};
pub use pool::*;
