//! Pool classification against a real repository

use wtpool::git::{list_worktrees, worktree::same_path};
use wtpool::pool::{claim_worktree, create_worktree, pool_snapshot};
use wtpool::RepoConfig;

use super::helpers::*;

#[test]
fn test_snapshot_splits_available_and_claimed() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    let a = create_worktree(&repo.root, "a", &config).unwrap();
    let b = create_worktree(&repo.root, "b", &config).unwrap();
    claim_worktree(&repo.root, &b.path, "feature/b", &config, None).unwrap();

    let snapshot = pool_snapshot(&repo.root).unwrap();

    let base = snapshot.base.as_ref().expect("base worktree");
    assert!(same_path(&base.path, &repo.root));
    assert_eq!(snapshot.available.len(), 1);
    assert_eq!(snapshot.available[0].name, "a");
    assert!(same_path(&snapshot.available[0].worktree.path, &a.path));
    assert_eq!(snapshot.claimed.len(), 1);
    assert_eq!(snapshot.claimed[0].name, "b");
    assert_eq!(snapshot.claimed[0].worktree.branch.as_deref(), Some("feature/b"));
    assert_eq!(snapshot.first_available().map(|s| s.name.as_str()), Some("a"));
}

#[test]
fn test_availability_matches_branch_prefix() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    for name in ["a", "b", "c"] {
        create_worktree(&repo.root, name, &config).unwrap();
    }
    claim_worktree(&repo.root, &repo.slot_path("c"), "work/c", &config, None).unwrap();

    let snapshot = pool_snapshot(&repo.root).unwrap();
    for slot in snapshot.slots() {
        let parked = slot
            .worktree
            .branch
            .as_deref()
            .is_some_and(|b| b.starts_with("tmp-"));
        assert_eq!(slot.is_available, parked);
        assert!(!same_path(&slot.worktree.path, &repo.root));
    }
    assert_eq!(snapshot.slots().count(), list_worktrees(&repo.root).unwrap().len() - 1);
}

#[test]
fn test_snapshot_from_linked_worktree_sees_same_pool() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    create_worktree(&repo.root, "a", &config).unwrap();

    let root = wtpool::git::main_worktree_root(&repo.slot_path("a")).unwrap();
    let snapshot = pool_snapshot(&root).unwrap();
    assert_eq!(snapshot.available.len(), 1);
    assert!(snapshot.base.is_some());
}

#[test]
fn test_snapshot_names_slots_from_relative_root() {
    let repo = init_test_repo();
    let config = RepoConfig::default();
    create_worktree(&repo.root, "a", &config).unwrap();
    std::fs::create_dir(repo.root.join("sub")).unwrap();

    let snapshot = pool_snapshot(&repo.root.join("sub").join("..")).unwrap();
    let names: Vec<&str> = snapshot.slots().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["a"]);
    assert!(snapshot.base.is_some());
}

