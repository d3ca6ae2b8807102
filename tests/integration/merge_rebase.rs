//! Merge and rebase

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use wtpool::pool::{
    claim_worktree, create_worktree, merge_worktree, rebase_worktree, MergeOptions, WorktreeLock,
};
use wtpool::{PoolError, RepoConfig};

use super::helpers::*;

#[test]
fn test_squash_merge_commits_with_default_message() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    let created = create_worktree(&repo.root, "d", &config).unwrap();
    claim_worktree(&repo.root, &created.path, "feature/z", &config, None).unwrap();
    commit_file(&created.path, "z.txt", "z\n", "Add z");

    let options = MergeOptions {
        squash: true,
        delete_worktree: true,
        ..MergeOptions::default()
    };
    let outcome = merge_worktree(&repo.root, "feature/z", "main", &options).unwrap();

    assert!(outcome.committed);
    assert_eq!(
        git(&["log", "-1", "--format=%s", "main"], &repo.root),
        "Merge feature/z (squashed)"
    );
    assert!(repo.root.join("z.txt").exists());
    assert_eq!(outcome.removed_worktree.as_deref(), Some(created.path.as_path()));
    assert!(!created.path.exists());
}

#[test]
fn test_no_ff_merge_uses_message() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    let created = create_worktree(&repo.root, "d", &config).unwrap();
    claim_worktree(&repo.root, &created.path, "feature/m", &config, None).unwrap();
    commit_file(&created.path, "m.txt", "m\n", "Add m");

    let options = MergeOptions {
        no_ff: true,
        message: Some("Bring in m".to_string()),
        ..MergeOptions::default()
    };
    let outcome = merge_worktree(&repo.root, "feature/m", "main", &options).unwrap();

    assert!(outcome.committed);
    assert!(outcome.removed_worktree.is_none());
    assert_eq!(git(&["log", "-1", "--format=%s", "main"], &repo.root), "Bring in m");
    let parents = git(&["rev-list", "--parents", "-n", "1", "main"], &repo.root);
    assert_eq!(parents.split(' ').count(), 3);
    assert!(created.path.is_dir());
}

#[test]
fn test_squash_with_no_ff_is_invalid() {
    let repo = init_test_repo();
    let options = MergeOptions {
        squash: true,
        no_ff: true,
        ..MergeOptions::default()
    };
    let err = merge_worktree(&repo.root, "main", "main", &options).unwrap_err();
    assert!(matches!(err, PoolError::InvalidInput(_)));
}

#[test]
fn test_merge_unknown_branch() {
    let repo = init_test_repo();
    let err = merge_worktree(&repo.root, "nope", "main", &MergeOptions::default()).unwrap_err();
    assert!(matches!(err, PoolError::BranchNotFound(ref b) if b == "nope"));
}

#[test]
fn test_merge_conflict_leaves_working_copy_conflicted() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    let created = create_worktree(&repo.root, "d", &config).unwrap();
    claim_worktree(&repo.root, &created.path, "feature/c", &config, None).unwrap();
    commit_file(&created.path, "README.md", "from feature\n", "Feature edit");
    commit_file(&repo.root, "README.md", "from main\n", "Main edit");

    let err = merge_worktree(&repo.root, "feature/c", "main", &MergeOptions::default()).unwrap_err();
    match err {
        PoolError::Conflict { operation, files } => {
            assert_eq!(operation, "merge");
            assert_eq!(files, vec!["README.md".to_string()]);
        }
        other => panic!("expected Conflict, got {other:?}"),
    }
    assert!(repo.root.join(".git").join("MERGE_HEAD").exists());
}

#[test]
fn test_rebase_onto_advanced_main() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    let created = create_worktree(&repo.root, "e", &config).unwrap();
    claim_worktree(&repo.root, &created.path, "feature/r", &config, None).unwrap();
    commit_file(&created.path, "r.txt", "r\n", "Add r");
    let main_tip = commit_file(&repo.root, "main.txt", "main\n", "Main moves");

    let rebased = rebase_worktree(&created.path, "feature/r", "main").unwrap();

    assert_eq!(rebased.head, rev_parse("HEAD", &created.path));
    assert_eq!(rev_parse("HEAD~1", &created.path), main_tip);
    assert!(created.path.join("main.txt").exists());
}

#[test]
fn test_rebase_conflict_is_left_in_progress() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    let created = create_worktree(&repo.root, "e", &config).unwrap();
    claim_worktree(&repo.root, &created.path, "feature/rc", &config, None).unwrap();
    commit_file(&created.path, "README.md", "feature side\n", "Feature edit");
    commit_file(&repo.root, "README.md", "main side\n", "Main edit");

    let err = rebase_worktree(&created.path, "feature/rc", "main").unwrap_err();
    match err {
        PoolError::Conflict { operation, files } => {
            assert_eq!(operation, "rebase");
            assert!(files.contains(&"README.md".to_string()));
        }
        other => panic!("expected Conflict, got {other:?}"),
    }
    let status = git(&["status"], &created.path);
    assert!(status.contains("rebase"));
}

#[test]
fn test_rebase_unknown_branch() {
    let repo = init_test_repo();
    let created = create_worktree(&repo.root, "e", &RepoConfig::default()).unwrap();

    let err = rebase_worktree(&created.path, "missing", "main").unwrap_err();
    assert!(matches!(err, PoolError::BranchNotFound(_)));
}

#[test]
fn test_delete_worktree_waits_for_slot_lock() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    let created = create_worktree(&repo.root, "d", &config).unwrap();
    claim_worktree(&repo.root, &created.path, "feature/l", &config, None).unwrap();
    commit_file(&created.path, "l.txt", "l\n", "Add l");

    let held = WorktreeLock::acquire(&repo.root, &created.path).unwrap();
    let (tx, rx) = mpsc::channel();
    let root = repo.root.clone();
    let handle = thread::spawn(move || {
        let options = MergeOptions {
            squash: true,
            delete_worktree: true,
            ..MergeOptions::default()
        };
        let result = merge_worktree(&root, "feature/l", "main", &options);
        tx.send(()).unwrap();
        result
    });

    assert!(rx.recv_timeout(Duration::from_millis(500)).is_err());
    assert!(created.path.is_dir());

    drop(held);
    rx.recv_timeout(Duration::from_secs(10)).unwrap();
    let outcome = handle.join().unwrap().unwrap();
    assert!(outcome.removed_worktree.is_some());
    assert!(!created.path.exists());
}

