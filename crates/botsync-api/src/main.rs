//! botsync CLI entry point.
//!
//! Binary name: `bsync`
//!
//! Parses CLI arguments, initializes tracing, then dispatches to the
//! appropriate command handler.

mod cli;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,botsync=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Sync {
            file,
            keep_going,
            dry_run,
        } => {
            cli::sync::run(file, keep_going, dry_run, cli.json).await?;
        }

        Commands::Validate { file } => {
            cli::validate::run(file, cli.json).await?;
        }

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "bsync", &mut std::io::stdout());
        }
    }

    Ok(())
}
