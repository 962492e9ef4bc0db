//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser};

use dryvo_core::DEFAULT_API_URL;

use crate::commands::Command;

/// Dryvo command-line client.
#[derive(Parser, Debug)]
#[command(name = "dryvo")]
#[command(author, version = env!("DRYVO_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// API origin
    #[arg(long, env = "DRYVO_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Credential store file (defaults to the user data directory)
    #[arg(long, env = "DRYVO_STORE", global = true)]
    pub store: Option<PathBuf>,
}
