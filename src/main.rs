mod cli;

use anyhow::Result;
use clap::Parser;

use cli::dispatch::dispatch;
use cli::types::Cli;
use wtpool::git::check_git_available;
use wtpool::logging::init_tracing;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "wtpool=debug" } else { "wtpool=warn" };
    init_tracing(default_filter, cli.log_json);

    check_git_available()?;
    dispatch(cli)
}
