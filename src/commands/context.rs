//! Repository discovery and configuration loading
//!
//! Configuration layers, later wins:
//! 1. `<config dir>/wtpool/config.toml`
//! 2. `<repo>/.wtpool.toml`
//! 3. Command-line overrides

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::RepoConfig;
use crate::git::worktree::main_worktree_root;

/// Per-repository config file name, looked up in the repository root.
pub const REPO_CONFIG_FILE: &str = ".wtpool.toml";

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub main_branch: Option<String>,
    pub worktree_dir: Option<PathBuf>,
    pub init_command: Option<String>,
}

impl From<ConfigOverrides> for RepoConfig {
    fn from(overrides: ConfigOverrides) -> Self {
        RepoConfig {
            main_branch: overrides.main_branch,
            init_command: overrides.init_command,
            worktree_directory: overrides.worktree_dir,
        }
    }
}

/// Repository root and effective configuration for one invocation.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub repo_root: PathBuf,
    pub config: RepoConfig,
}

impl CommandContext {
    /// Resolve the main checkout containing `repo` (or the current
    /// directory) and load its layered configuration.
    pub fn load(repo: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let start = match repo {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir().context("Failed to read current directory")?,
        };
        let repo_root = main_worktree_root(&start)
            .with_context(|| format!("Failed to locate repository from {}", start.display()))?;

        let user = match user_config_path() {
            Some(path) => load_config_file(&path)?,
            None => None,
        };
        let local = load_config_file(&repo_root.join(REPO_CONFIG_FILE))?;
        let config = layer_configs([user, local, Some(overrides.into())]);

        debug!(repo = %repo_root.display(), ?config, "loaded configuration");
        Ok(Self { repo_root, config })
    }

    /// Resolve a user-supplied worktree path against the current directory.
    pub fn worktree_path(&self, path: &Path) -> Result<PathBuf> {
        std::path::absolute(path)
            .with_context(|| format!("Failed to resolve path {}", path.display()))
    }
}

/// `<config dir>/wtpool/config.toml`, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wtpool").join("config.toml"))
}

/// Read a TOML config file. A missing file is `None`, a malformed one an error.
pub fn load_config_file(path: &Path) -> Result<Option<RepoConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(Some(config))
}

fn layer_configs<I>(layers: I) -> RepoConfig
where
    I: IntoIterator<Item = Option<RepoConfig>>,
{
    layers
        .into_iter()
        .flatten()
        .fold(RepoConfig::default(), RepoConfig::merged_with)
}
