use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod style;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config_path = cli
        .config
        .unwrap_or_else(config::Config::default_path);

    match cli.command {
        Commands::Setup(args) => commands::setup::cmd_setup(args, &config_path).await,
        Commands::Sync(args) => commands::sync::cmd_sync(args, &config_path).await,
        Commands::Backfill(args) => commands::backfill::cmd_backfill(args, &config_path).await,
        Commands::Status(args) => commands::status::cmd_status(args, &config_path).await,
    }
}
