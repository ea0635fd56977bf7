//! Backfill command - discover where history begins and rebuild the CSV.

use std::path::Path;

use anyhow::{Context, Result};
use dialoguer::Confirm;
use hearth_core::{Error, SyncEngine};
use hearth_store::write_table;

use crate::cli::BackfillArgs;
use crate::commands::{authenticated_client, refresh_thermostats};
use crate::config::Config;
use crate::style;

/// Execute the backfill command.
pub async fn cmd_backfill(args: BackfillArgs, config_path: &Path) -> Result<()> {
    let mut config = Config::load(config_path)?;
    let csv_path = config.csv_path();

    // The backfill replaces the file wholesale, so ask first.
    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "This will overwrite any existing file at {}, continue?",
                csv_path.display()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted");
            return Ok(());
        }
    }

    let client = authenticated_client(&mut config, config_path).await?;
    let thermostats = refresh_thermostats(&client, &mut config, config_path).await?;

    let engine = SyncEngine::new(client).with_max_lookback(args.max_lookback_days);

    let pb = style::backfill_progress_bar();
    pb.set_message("downloading");
    let pb_for_callback = pb.clone();
    let result = engine
        .backfill(&thermostats, move |done, total| {
            pb_for_callback.set_length(total as u64);
            pb_for_callback.set_position(done as u64);
        })
        .await;

    let table = match result {
        Ok(table) => table,
        Err(Error::HistoryNotFound) => {
            pb.finish_and_clear();
            println!("No thermostat history found within the first month; nothing to download");
            return Ok(());
        }
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };
    pb.finish_with_message("download complete");

    write_table(&table, &csv_path)
        .with_context(|| format!("failed to write {}", csv_path.display()))?;
    println!("Wrote {} rows to {}", table.len(), csv_path.display());

    Ok(())
}
