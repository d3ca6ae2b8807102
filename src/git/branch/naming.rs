//! Branch naming conventions for pool slots

/// Prefix reserved for branches that park an available slot.
pub const TMP_BRANCH_PREFIX: &str = "tmp-";

/// Generate the parking branch name for a slot
pub fn tmp_branch_for(worktree_name: &str) -> String {
    format!("{TMP_BRANCH_PREFIX}{worktree_name}")
}

/// Strip a `refs/heads/` prefix if present
pub fn short_branch_name(branch: &str) -> &str {
    branch.strip_prefix("refs/heads/").unwrap_or(branch)
}

/// Whether a branch marks its worktree as available
pub fn is_tmp_branch(branch: &str) -> bool {
    short_branch_name(branch).starts_with(TMP_BRANCH_PREFIX)
}
