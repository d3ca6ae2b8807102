//! Git branch operations used by the pool
//!
//! - `ancestry`: merge-base and merge-safety checks
//! - `default`: default branch resolution chain
//! - `naming`: `tmp-` parking branch conventions
//! - `operations`: existence, checkout, reset, fetch
//! - `status`: working tree status buckets

mod ancestry;
mod default;
mod naming;
mod operations;
mod status;

pub use ancestry::{get_branch_head, is_fully_merged, merge_base};
pub use default::resolve_default_branch;
pub use naming::{is_tmp_branch, short_branch_name, tmp_branch_for, TMP_BRANCH_PREFIX};
pub use operations::{
    branch_exists, checkout, checkout_new_branch, checkout_reset_branch, current_branch,
    fetch_best_effort, has_head_commit, list_branches, release_target, remote_branch_exists,
    reset_hard, validate_branch_name, REMOTE,
};
pub use status::{get_status, GitStatus};
