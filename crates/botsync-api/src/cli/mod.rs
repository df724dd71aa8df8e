//! CLI command definitions and dispatch for the `bsync` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod sync;
pub mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Sync declarative bot definitions to the model-building service.
#[derive(Parser)]
#[command(name = "bsync", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile the sync file against the remote service.
    Sync {
        /// Sync file to read (defaults to the settings' sync_file, bots.yml).
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Record per-bot failures and continue instead of aborting.
        #[arg(long)]
        keep_going: bool,

        /// Show what would be upserted without calling the service.
        #[arg(long)]
        dry_run: bool,
    },

    /// Parse and validate a sync file without touching the service.
    Validate {
        /// Sync file to check (defaults to the settings' sync_file, bots.yml).
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
