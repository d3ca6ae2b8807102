use anyhow::Result;
use clap::CommandFactory;
use std::io;

use wtpool::commands::{
    archive, claim, create, list, maintenance, merge, rebase, release, status, CommandContext,
};
use wtpool::completions::generate_completions;

use super::types::{merge_options, Cli, Commands};

pub fn dispatch(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        generate_completions(&mut Cli::command(), shell, &mut io::stdout());
        return Ok(());
    }

    let ctx = CommandContext::load(cli.repo.as_deref(), cli.config_overrides())?;

    match cli.command {
        Commands::List { json } => list::execute(&ctx, json),
        Commands::Status { path, json } => status::execute(&ctx, &path, json),
        Commands::DefaultBranch => maintenance::default_branch(&ctx),
        Commands::Create { name } => create::execute(&ctx, &name),
        Commands::Claim { path, branch, dirty } => {
            claim::execute(&ctx, &path, &branch, dirty.resolution())
        }
        Commands::Release { path, dirty } => release::execute(&ctx, &path, dirty.resolution()),
        Commands::Archive { path, force } => archive::execute(&ctx, &path, force),
        Commands::Merge {
            from,
            to,
            squash,
            no_ff,
            message,
            delete_worktree,
        } => merge::execute(
            &ctx,
            &from,
            &to,
            merge_options(squash, no_ff, message, delete_worktree),
        ),
        Commands::Rebase { path, from, onto } => rebase::execute(&ctx, &path, &from, &onto),
        Commands::Prune => maintenance::prune(&ctx),
        Commands::Completions { .. } => Ok(()),
    }
}
