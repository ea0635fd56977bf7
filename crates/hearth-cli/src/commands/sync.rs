//! Sync command - fetch a bounded window and merge it into the CSV.

use std::path::Path;

use anyhow::{Context, Result};
use hearth_core::{FetchWindow, SyncEngine};
use hearth_store::{read_table, write_table};
use tracing::info;

use crate::cli::SyncArgs;
use crate::commands::{authenticated_client, refresh_thermostats};
use crate::config::Config;

/// Execute the sync command.
pub async fn cmd_sync(args: SyncArgs, config_path: &Path) -> Result<()> {
    let mut config = Config::load(config_path)?;

    // Validate the window before touching the network.
    let window = FetchWindow::plan(args.days_ago_start, args.days_ago_end)
        .context("invalid --days-ago range")?;

    let client = authenticated_client(&mut config, config_path).await?;
    let thermostats = refresh_thermostats(&client, &mut config, config_path).await?;
    info!(thermostats = thermostats.len(), "syncing window");

    let csv_path = config.csv_path();
    let existing = read_table(&csv_path)
        .with_context(|| format!("failed to read {}", csv_path.display()))?;
    let previous_rows = existing.len();

    let engine = SyncEngine::new(client);
    let merged = engine.sync_window(&thermostats, window, &existing).await?;

    write_table(&merged, &csv_path)
        .with_context(|| format!("failed to write {}", csv_path.display()))?;

    // Legacy-id normalization can collapse keys, so the total may shrink.
    println!(
        "Synced days {}..{} ago: {} rows added ({} total) in {}",
        args.days_ago_start,
        args.days_ago_end,
        merged.len().saturating_sub(previous_rows),
        merged.len(),
        csv_path.display()
    );

    Ok(())
}
