//! Status command - report the persisted table's coverage.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use hearth_store::read_table;
use time::Date;

use crate::cli::{OutputFormat, StatusArgs};
use crate::config::Config;

/// First and last persisted dates for one thermostat.
struct Coverage {
    rows: usize,
    first: Date,
    last: Date,
}

/// Execute the status command.
pub async fn cmd_status(args: StatusArgs, config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let csv_path = config.csv_path();
    let table = read_table(&csv_path)
        .with_context(|| format!("failed to read {}", csv_path.display()))?;

    let mut coverage: BTreeMap<String, Coverage> = BTreeMap::new();
    for key in table.keys() {
        coverage
            .entry(key.thermostat_id.clone())
            .and_modify(|c| {
                c.rows += 1;
                c.first = c.first.min(key.date);
                c.last = c.last.max(key.date);
            })
            .or_insert(Coverage {
                rows: 1,
                first: key.date,
                last: key.date,
            });
    }

    match args.format {
        OutputFormat::Json => {
            let thermostats: Vec<_> = coverage
                .iter()
                .map(|(id, c)| {
                    serde_json::json!({
                        "thermostat_id": id,
                        "rows": c.rows,
                        "first_date": c.first.to_string(),
                        "last_date": c.last.to_string(),
                    })
                })
                .collect();
            let status = serde_json::json!({
                "config": config_path.display().to_string(),
                "csv": csv_path.display().to_string(),
                "rows": table.len(),
                "thermostats": thermostats,
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        OutputFormat::Text => {
            println!("Config: {}", config_path.display());
            println!("CSV:    {}", csv_path.display());
            println!("Rows:   {}", table.len());
            if coverage.is_empty() {
                println!("No readings persisted yet; run `hearth sync` or `hearth backfill`");
            }
            for (id, c) in &coverage {
                println!(
                    "  thermostat {}: {} rows, {} .. {}",
                    id, c.rows, c.first, c.last
                );
            }
        }
    }

    Ok(())
}
