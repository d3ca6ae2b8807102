//! Shared helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Scratch repository at `<tempdir>/repo` with one commit on `main`.
pub struct TestRepo {
    _temp: TempDir,
    pub root: PathBuf,
}

impl TestRepo {
    /// Parent directory sibling worktrees land in.
    pub fn parent(&self) -> &Path {
        self.root.parent().expect("repo has a parent")
    }

    /// Expected path of the slot `name`.
    pub fn slot_path(&self, name: &str) -> PathBuf {
        let base = self.root.file_name().expect("repo has a name").to_string_lossy();
        self.parent().join(format!("{base}-{name}"))
    }

    /// Lock files currently present under the shared git directory.
    pub fn lock_files(&self) -> usize {
        fs::read_dir(self.root.join(".git").join("wtpool-locks"))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

/// Create a repository with a README committed on `main`.
pub fn init_test_repo() -> TestRepo {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let root = temp.path().join("repo");
    fs::create_dir(&root).expect("Failed to create repo directory");

    git(&["init", "-b", "main"], &root);
    git(&["config", "user.email", "test@test.com"], &root);
    git(&["config", "user.name", "Test User"], &root);
    commit_file(&root, "README.md", "# Test Repository\n", "Initial commit");

    TestRepo { _temp: temp, root }
}

/// Clone `origin` into `<new tempdir>/clone`; `origin/HEAD` points at `main`.
pub fn clone_repo(origin: &TestRepo) -> TestRepo {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let root = temp.path().join("clone");
    git(
        &[
            "clone",
            &origin.root.to_string_lossy(),
            &root.to_string_lossy(),
        ],
        temp.path(),
    );
    git(&["config", "user.email", "test@test.com"], &root);
    git(&["config", "user.name", "Test User"], &root);

    TestRepo { _temp: temp, root }
}

/// Run git in `dir`, panicking with stderr on failure. Returns trimmed stdout.
pub fn git(args: &[&str], dir: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Write `filename` and commit it on the branch checked out in `dir`.
pub fn commit_file(dir: &Path, filename: &str, content: &str, message: &str) -> String {
    fs::write(dir.join(filename), content).expect("Failed to write file");
    git(&["add", filename], dir);
    git(&["commit", "-m", message], dir);
    rev_parse("HEAD", dir)
}

pub fn rev_parse(rev: &str, dir: &Path) -> String {
    git(&["rev-parse", rev], dir)
}

pub fn current_branch(dir: &Path) -> String {
    git(&["rev-parse", "--abbrev-ref", "HEAD"], dir)
}

pub fn branch_exists(name: &str, dir: &Path) -> bool {
    Command::new("git")
        .args(["rev-parse", "--verify", "--quiet", &format!("refs/heads/{name}")])
        .current_dir(dir)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
