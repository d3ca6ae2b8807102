//! Create, claim and release

use std::fs;

use wtpool::git::worktree::worktree_name;
use wtpool::pool::{
    claim_worktree, create_worktree, pool_snapshot, release_worktree, DirtyResolution,
};
use wtpool::{PoolError, RepoConfig};

use super::helpers::*;

#[test]
fn test_create_claim_modify_release_cycle() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    let c0 = rev_parse("main", &repo.root);

    let created = create_worktree(&repo.root, "a", &config).expect("create");
    assert_eq!(created.path, repo.slot_path("a"));
    assert_eq!(created.branch, "tmp-a");
    assert!(created.init.is_none());
    assert_eq!(current_branch(&created.path), "tmp-a");
    assert_eq!(rev_parse("HEAD", &created.path), c0);

    let claimed = claim_worktree(&repo.root, &created.path, "feature/x", &config, None)
        .expect("claim");
    assert!(claimed.created_branch);
    assert_eq!(claimed.previous_branch.as_deref(), Some("tmp-a"));
    assert_eq!(current_branch(&created.path), "feature/x");
    assert_eq!(rev_parse("HEAD", &created.path), c0);

    fs::write(created.path.join("README.md"), "changed\n").unwrap();
    fs::write(created.path.join("scratch.txt"), "untracked\n").unwrap();

    let released = release_worktree(
        &repo.root,
        &created.path,
        &config,
        Some(&DirtyResolution::Clean),
    )
    .expect("release");
    assert_eq!(released.tmp_branch, "tmp-a");
    assert_eq!(released.previous_branch.as_deref(), Some("feature/x"));
    assert_eq!(released.target, "main");
    assert_eq!(current_branch(&created.path), "tmp-a");
    assert_eq!(rev_parse("HEAD", &created.path), c0);
    assert_eq!(
        fs::read_to_string(created.path.join("README.md")).unwrap(),
        "# Test Repository\n"
    );
    assert!(!created.path.join("scratch.txt").exists());

    let again = release_worktree(&repo.root, &created.path, &config, None).expect("release again");
    assert_eq!(again.tmp_branch, "tmp-a");
    assert_eq!(again.previous_branch.as_deref(), Some("tmp-a"));
    assert_eq!(rev_parse("HEAD", &created.path), c0);
}

#[test]
fn test_release_moves_slot_to_new_default_tip() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    let created = create_worktree(&repo.root, "a", &config).unwrap();
    claim_worktree(&repo.root, &created.path, "feature/x", &config, None).unwrap();

    let c1 = commit_file(&repo.root, "later.txt", "later\n", "Later commit");
    release_worktree(&repo.root, &created.path, &config, None).unwrap();

    assert_eq!(current_branch(&created.path), "tmp-a");
    assert_eq!(rev_parse("HEAD", &created.path), c1);
}

#[test]
fn test_worktree_name_round_trips() {
    let repo = init_test_repo();
    let config = RepoConfig::default();

    for name in ["a", "feature-1", "slot_2"] {
        let created = create_worktree(&repo.root, name, &config).unwrap();
        assert_eq!(worktree_name(&created.path, &repo.root).as_deref(), Some(name));
        assert_eq!(created.branch, format!("tmp-{name}"));
    }
}

#[test]
fn test_create_reuses_surviving_tmp_branch() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    git(&["branch", "tmp-a", "main"], &repo.root);
    let parked = commit_file(&repo.root, "extra.txt", "x\n", "Move main ahead");
    git(&["branch", "-f", "tmp-a", &parked], &repo.root);
    git(&["reset", "--hard", "HEAD~1"], &repo.root);

    let created = create_worktree(&repo.root, "a", &config).unwrap();
    assert_eq!(current_branch(&created.path), "tmp-a");
    assert_eq!(rev_parse("HEAD", &created.path), parked);
}

#[test]
fn test_create_existing_path_fails() {
    let repo = init_test_repo();
    fs::create_dir(repo.slot_path("a")).unwrap();

    let err = create_worktree(&repo.root, "a", &RepoConfig::default()).unwrap_err();
    assert!(matches!(err, PoolError::WorktreeExists(_)));
}

#[test]
fn test_create_honours_worktree_directory() {
    let repo = init_test_repo();
    let slots = repo.parent().join("slots");
    let config = RepoConfig {
        worktree_directory: Some(slots.clone()),
        ..RepoConfig::default()
    };

    let created = create_worktree(&repo.root, "a", &config).unwrap();
    assert_eq!(created.path, slots.join("repo-a"));
    assert!(created.path.join("README.md").exists());
}

#[test]
fn test_claim_existing_branch_checks_it_out() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    git(&["branch", "feature/existing"], &repo.root);
    let tip = rev_parse("feature/existing", &repo.root);
    commit_file(&repo.root, "ahead.txt", "ahead\n", "Main moves on");

    let created = create_worktree(&repo.root, "a", &config).unwrap();
    let claimed =
        claim_worktree(&repo.root, &created.path, "feature/existing", &config, None).unwrap();

    assert!(!claimed.created_branch);
    assert_eq!(rev_parse("HEAD", &created.path), tip);
}

#[test]
fn test_claim_dirty_without_resolution_fails() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    let created = create_worktree(&repo.root, "a", &config).unwrap();
    fs::write(created.path.join("README.md"), "dirty\n").unwrap();

    let err = claim_worktree(&repo.root, &created.path, "feature/x", &config, None).unwrap_err();
    assert!(matches!(err, PoolError::DirtyWorktree { changes: 1, .. }));
    assert_eq!(current_branch(&created.path), "tmp-a");
}

#[test]
fn test_empty_commit_message_rejected_before_mutation() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    let created = create_worktree(&repo.root, "a", &config).unwrap();
    fs::write(created.path.join("README.md"), "dirty\n").unwrap();

    let resolution = DirtyResolution::Commit {
        message: "  ".to_string(),
    };
    let err = claim_worktree(&repo.root, &created.path, "feature/x", &config, Some(&resolution))
        .unwrap_err();

    assert!(matches!(err, PoolError::InvalidInput(_)));
    assert_eq!(current_branch(&created.path), "tmp-a");
    assert_eq!(
        fs::read_to_string(created.path.join("README.md")).unwrap(),
        "dirty\n"
    );
}

#[test]
fn test_claim_with_commit_carries_changes_on_old_branch() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    let created = create_worktree(&repo.root, "a", &config).unwrap();
    fs::write(created.path.join("notes.txt"), "keep me\n").unwrap();

    let resolution = DirtyResolution::Commit {
        message: "Save notes".to_string(),
    };
    claim_worktree(&repo.root, &created.path, "feature/x", &config, Some(&resolution)).unwrap();

    assert_eq!(git(&["log", "-1", "--format=%s", "tmp-a"], &repo.root), "Save notes");
    assert!(!created.path.join("notes.txt").exists());
}

#[test]
fn test_release_with_stash_keeps_changes() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    let created = create_worktree(&repo.root, "a", &config).unwrap();
    claim_worktree(&repo.root, &created.path, "feature/x", &config, None).unwrap();
    fs::write(created.path.join("wip.txt"), "wip\n").unwrap();

    release_worktree(&repo.root, &created.path, &config, Some(&DirtyResolution::Stash)).unwrap();

    let stashes = git(&["stash", "list"], &created.path);
    assert_eq!(stashes.lines().count(), 1);
    assert!(stashes.contains("wtpool: feature/x"));
    assert!(!created.path.join("wip.txt").exists());
}

#[test]
fn test_cancel_aborts_release() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    let created = create_worktree(&repo.root, "a", &config).unwrap();
    claim_worktree(&repo.root, &created.path, "feature/x", &config, None).unwrap();
    fs::write(created.path.join("wip.txt"), "wip\n").unwrap();

    let err = release_worktree(&repo.root, &created.path, &config, Some(&DirtyResolution::Cancel))
        .unwrap_err();

    assert!(matches!(err, PoolError::Aborted(_)));
    assert_eq!(current_branch(&created.path), "feature/x");
    assert!(created.path.join("wip.txt").exists());
}

#[test]
fn test_claim_rejects_reserved_prefix() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    let created = create_worktree(&repo.root, "a", &config).unwrap();

    let err = claim_worktree(&repo.root, &created.path, "tmp-b", &config, None).unwrap_err();
    assert!(matches!(err, PoolError::InvalidInput(_)));
    assert_eq!(pool_snapshot(&repo.root).unwrap().available.len(), 1);
}

#[test]
fn test_base_worktree_is_refused() {
    let repo = init_test_repo();
    let config = RepoConfig::default();

    let err = claim_worktree(&repo.root, &repo.root, "feature/x", &config, None).unwrap_err();
    assert!(matches!(err, PoolError::BaseWorktree(_)));

    let err = release_worktree(&repo.root, &repo.root, &config, None).unwrap_err();
    assert!(matches!(err, PoolError::BaseWorktree(_)));
    assert_eq!(current_branch(&repo.root), "main");
}

#[test]
fn test_unknown_worktree_is_not_found() {
    let repo = init_test_repo();
    let err = release_worktree(
        &repo.root,
        &repo.slot_path("missing"),
        &RepoConfig::default(),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, PoolError::WorktreeNotFound(_)));
}

#[cfg(unix)]
#[test]
fn test_init_command_runs_in_new_worktree() {
    let repo = init_test_repo();
    let config = RepoConfig {
        init_command: Some("echo ready > initialized.txt".to_string()),
        ..RepoConfig::default()
    };

    let created = create_worktree(&repo.root, "a", &config).unwrap();
    let init = created.init.expect("init outcome");
    assert!(init.success);
    assert!(created.path.join("initialized.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_failing_init_command_keeps_worktree() {
    let repo = init_test_repo();
    let config = RepoConfig {
        init_command: Some("exit 3".to_string()),
        ..RepoConfig::default()
    };

    let created = create_worktree(&repo.root, "a", &config).unwrap();
    let init = created.init.expect("init outcome");
    assert!(!init.success);
    assert_eq!(init.exit_code, Some(3));
    assert!(created.path.is_dir());
    assert_eq!(pool_snapshot(&repo.root).unwrap().available.len(), 1);
}

#[test]
fn test_relative_repo_root_parks_on_slot_branch() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    let created = create_worktree(&repo.root, "a", &config).unwrap();
    claim_worktree(&repo.root, &created.path, "feature/x", &config, None).unwrap();

    fs::create_dir(repo.root.join("sub")).unwrap();
    let relative_root = repo.root.join("sub").join("..");

    let released = release_worktree(&relative_root, &created.path, &config, None).unwrap();
    assert_eq!(released.tmp_branch, "tmp-a");
    assert_eq!(current_branch(&created.path), "tmp-a");
    assert!(!branch_exists("tmp-repo-a", &repo.root));
}

#[test]
fn test_release_and_claim_start_from_upstream_tip() {
    let origin = init_test_repo();
    let repo = clone_repo(&origin);
    let config = RepoConfig::default();
    let created = create_worktree(&repo.root, "a", &config).unwrap();
    assert_eq!(created.path, repo.slot_path("a"));
    claim_worktree(&repo.root, &created.path, "feature/x", &config, None).unwrap();

    let upstream = commit_file(&origin.root, "upstream.txt", "new\n", "Upstream moves");
    let local_main = rev_parse("main", &repo.root);
    assert_ne!(local_main, upstream);

    let released = release_worktree(&repo.root, &created.path, &config, None).unwrap();
    assert_eq!(released.target, "origin/main");
    assert_eq!(rev_parse("HEAD", &created.path), upstream);

    let upstream = commit_file(&origin.root, "second.txt", "again\n", "Upstream moves again");
    claim_worktree(&repo.root, &created.path, "feature/y", &config, None).unwrap();
    assert_eq!(rev_parse("HEAD", &created.path), upstream);
    assert_eq!(rev_parse("main", &repo.root), local_main);
}
