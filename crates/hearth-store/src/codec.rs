//! CSV codec for the canonical table.

use std::fs;
use std::path::Path;

use time::{Date, Time};
use tracing::{debug, info};

use hearth_types::{
    csv_header, Reading, Table, DATE_FORMAT, REPORT_COLUMNS, TIME_FORMAT,
};

use crate::error::{Error, Result};

/// How the persisted header maps to cells in each record.
enum Layout {
    /// Current schema: `Thermostat ID, Date, Time, <report columns>`.
    Current,
    /// Legacy schema persisted before the thermostat id column existed:
    /// `Date, Time, <report columns>`. Rows read with an empty id; the
    /// merge step re-keys them under the default identifier.
    Legacy,
}

/// Read the persisted table.
///
/// A missing or zero-length file reads as an empty table, which makes the
/// system self-bootstrapping on first run.
///
/// # Errors
///
/// Returns [`Error::SchemaMismatch`] for an unrecognized header and
/// [`Error::BadRow`] when a key cell does not parse.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No table at {}, starting empty", path.display());
        return Ok(Table::new());
    }
    if fs::metadata(path)?.len() == 0 {
        return Ok(Table::new());
    }

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let layout = recognize_layout(&headers).ok_or_else(|| Error::SchemaMismatch {
        path: path.to_path_buf(),
        detail: format!(
            "got {} columns starting with {:?}",
            headers.len(),
            headers.iter().take(3).collect::<Vec<_>>()
        ),
    })?;

    let mut table = Table::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let bad_row = |detail: String| Error::BadRow {
            path: path.to_path_buf(),
            line,
            detail,
        };

        let (thermostat_id, date_cell, time_cell, value_start) = match layout {
            Layout::Current => (record.get(0).unwrap_or("").to_string(), 1, 2, 3),
            Layout::Legacy => (String::new(), 0, 1, 2),
        };
        let date_cell = record.get(date_cell).unwrap_or("");
        let time_cell = record.get(time_cell).unwrap_or("");

        let date = Date::parse(date_cell, DATE_FORMAT)
            .map_err(|e| bad_row(format!("invalid date {date_cell:?}: {e}")))?;
        let time = Time::parse(time_cell, TIME_FORMAT)
            .map_err(|e| bad_row(format!("invalid time {time_cell:?}: {e}")))?;

        table.insert(Reading {
            thermostat_id,
            date,
            time,
            values: record.iter().skip(value_start).map(str::to_string).collect(),
        });
    }
    debug!(rows = table.len(), "read table from {}", path.display());
    Ok(table)
}

fn recognize_layout(headers: &csv::StringRecord) -> Option<Layout> {
    let current = csv_header();
    if headers.iter().eq(current.iter().copied()) {
        return Some(Layout::Current);
    }
    if headers.iter().eq(current.iter().skip(1).copied()) {
        return Some(Layout::Legacy);
    }
    None
}

/// Write the table, replacing any prior content.
///
/// Rows go out in ascending `(thermostat_id, date, time)` order under the
/// fixed header. The write lands in a sibling temp file that is renamed
/// over the target, so readers never observe a partial file.
pub fn write_table<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "history.csv".to_string());
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));

    let mut writer = csv::Writer::from_path(&tmp_path)?;
    writer.write_record(csv_header())?;
    for (key, values) in table.iter() {
        let mut record = Vec::with_capacity(3 + REPORT_COLUMNS.len());
        record.push(key.thermostat_id.clone());
        record.push(key.date_string());
        record.push(key.time_string());
        record.extend(values.iter().cloned());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    drop(writer);

    fs::rename(&tmp_path, path)?;
    info!(rows = table.len(), "wrote table to {}", path.display());
    Ok(())
}
