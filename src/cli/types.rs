use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use wtpool::commands::ConfigOverrides;
use wtpool::pool::{DirtyResolution, MergeOptions};

#[derive(Parser)]
#[command(name = "wtpool")]
#[command(about = "Manage a pool of reusable git worktrees", long_about = None)]
#[command(version)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    /// Repository to operate on (defaults to the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// Branch slots start from and reset to, instead of detecting it
    #[arg(long, global = true, value_name = "BRANCH")]
    pub main_branch: Option<String>,

    /// Directory new worktrees are created in
    #[arg(long, global = true, value_name = "DIR")]
    pub worktree_dir: Option<PathBuf>,

    /// Shell command run inside each newly created worktree
    #[arg(long, global = true, value_name = "CMD")]
    pub init_command: Option<String>,

    /// Log git invocations and decisions
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            main_branch: self.main_branch.clone(),
            worktree_dir: self.worktree_dir.clone(),
            init_command: self.init_command.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List pool worktrees and whether each is available or claimed
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show uncommitted changes in a worktree
    Status {
        path: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Print the branch slots are created from and released to
    DefaultBranch,

    /// Create a new available worktree named <repo>-<NAME> on tmp-<NAME>
    Create { name: String },

    /// Put a worktree on a branch, creating it from the default branch if needed
    Claim {
        path: PathBuf,
        branch: String,

        #[command(flatten)]
        dirty: DirtyArgs,
    },

    /// Park a worktree back on its tmp- branch at the default branch tip
    Release {
        path: PathBuf,

        #[command(flatten)]
        dirty: DirtyArgs,
    },

    /// Remove a worktree permanently
    Archive {
        path: PathBuf,

        /// Remove even if its branch is not merged into the default branch
        #[arg(short, long)]
        force: bool,
    },

    /// Merge a branch into another in the repository's main checkout
    Merge {
        from: String,
        to: String,

        #[arg(long, conflicts_with = "no_ff")]
        squash: bool,

        #[arg(long)]
        no_ff: bool,

        /// Commit message (squash default: "Merge <FROM> (squashed)")
        #[arg(short, long)]
        message: Option<String>,

        /// Remove the worktree that has <FROM> checked out afterwards
        #[arg(long)]
        delete_worktree: bool,
    },

    /// Check out a branch in a worktree and rebase it onto another
    Rebase {
        path: PathBuf,
        from: String,
        onto: String,
    },

    /// Drop registrations of worktrees whose directories are gone
    Prune,

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// How to handle uncommitted changes before switching branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnDirty {
    Stash,
    Commit,
    Amend,
    Clean,
    Cancel,
}

#[derive(Debug, Clone, Args)]
pub struct DirtyArgs {
    /// What to do with uncommitted changes
    #[arg(long, value_enum, value_name = "ACTION")]
    pub on_dirty: Option<OnDirty>,

    /// Commit message for --on-dirty commit
    #[arg(long = "commit-message", value_name = "MSG", requires = "on_dirty")]
    pub commit_message: Option<String>,
}

impl DirtyArgs {
    pub fn resolution(self) -> Option<DirtyResolution> {
        self.on_dirty.map(|action| match action {
            OnDirty::Stash => DirtyResolution::Stash,
            OnDirty::Commit => DirtyResolution::Commit {
                message: self.commit_message.unwrap_or_default(),
            },
            OnDirty::Amend => DirtyResolution::Amend,
            OnDirty::Clean => DirtyResolution::Clean,
            OnDirty::Cancel => DirtyResolution::Cancel,
        })
    }
}

pub fn merge_options(
    squash: bool,
    no_ff: bool,
    message: Option<String>,
    delete_worktree: bool,
) -> MergeOptions {
    MergeOptions {
        squash,
        no_ff,
        message,
        delete_worktree,
    }
}
