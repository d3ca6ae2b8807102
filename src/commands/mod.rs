//! Command handlers for the `wtpool` binary
//!
//! Each handler resolves the repository and configuration through
//! [`context::CommandContext`], calls into [`crate::pool`] and prints the
//! result. Errors are `anyhow` with context for display.

pub mod archive;
pub mod claim;
pub mod context;
pub mod create;
pub mod list;
pub mod maintenance;
pub mod merge;
pub mod rebase;
pub mod release;
pub mod status;

pub use context::{CommandContext, ConfigOverrides};
