//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "hearth")]
#[command(author, version, about = "Sync thermostat telemetry history to a local CSV", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file location (defaults to the platform config dir)
    #[arg(short, long, global = true, env = "HEARTH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authorize the application and store API credentials
    Setup(SetupArgs),

    /// Fetch a bounded window of history and merge it into the CSV
    Sync(SyncArgs),

    /// Discover where history begins and rebuild the CSV from scratch
    Backfill(BackfillArgs),

    /// Show the configured CSV and its coverage
    Status(StatusArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SetupArgs {
    /// Re-run authorization even if credentials already exist
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, Args)]
pub struct SyncArgs {
    /// Days ago to start the fetch, further in the past (max 30-day span)
    #[arg(short = 's', long, default_value = "1")]
    pub days_ago_start: u32,

    /// Days ago to end the fetch
    #[arg(short = 'e', long, default_value = "0")]
    pub days_ago_end: u32,
}

#[derive(Debug, Clone, Args)]
pub struct BackfillArgs {
    /// Overwrite the CSV without asking
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Maximum days to look back for the start of history
    #[arg(long, default_value = "730")]
    pub max_lookback_days: u32,
}

#[derive(Debug, Clone, Args)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}
