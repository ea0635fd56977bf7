//! Merging freshly fetched readings into the persisted table.

use tracing::debug;

use hearth_types::{Reading, ReadingKey, Table, DEFAULT_THERMOSTAT_ID};

/// Merge `incoming` into `existing`, producing the new canonical table.
///
/// Semantics are a composite-key union with incoming precedence:
///
/// - keys present only in one input are carried through unchanged;
/// - for shared keys the incoming row wins, except that an empty incoming
///   cell is gap-filled from the existing row instead of erasing it;
/// - no key is ever dropped, so the result's key set is the union of both
///   inputs' key sets.
///
/// The operation is idempotent: applying the same `incoming` twice yields
/// the same table. Legacy rows persisted without a thermostat id are keyed
/// under [`DEFAULT_THERMOSTAT_ID`] before merging, so old and new tables
/// stay key-compatible; the caller's persisted bytes are untouched until
/// the write step.
pub fn merge(existing: &Table, incoming: &Table) -> Table {
    let mut merged = normalize_ids(existing);
    let incoming = normalize_ids(incoming);

    let mut updated = 0usize;
    let mut added = 0usize;
    for (key, new_cells) in incoming.iter() {
        let cells = match merged.get(key) {
            Some(old_cells) => {
                updated += 1;
                gap_fill(new_cells, old_cells)
            }
            None => {
                added += 1;
                new_cells.clone()
            }
        };
        merged.insert(Reading::from_key_values(key.clone(), cells));
    }
    debug!(updated, added, total = merged.len(), "merged tables");
    merged
}

/// Overlay `incoming` on `existing`: incoming cells win unless empty, in
/// which case the prior value is preserved. Blanks are a sentinel distinct
/// from zero and are never coerced.
fn gap_fill(incoming: &[String], existing: &[String]) -> Vec<String> {
    incoming
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            if cell.is_empty() {
                existing.get(i).cloned().unwrap_or_default()
            } else {
                cell.clone()
            }
        })
        .collect()
}

/// Re-key rows with an empty thermostat id under the default identifier.
/// One-time, forward-only schema normalization for tables persisted before
/// the id column existed.
fn normalize_ids(table: &Table) -> Table {
    table
        .iter()
        .map(|(key, values)| {
            let id = if key.thermostat_id.is_empty() {
                DEFAULT_THERMOSTAT_ID
            } else {
                key.thermostat_id.as_str()
            };
            Reading::from_key_values(
                ReadingKey::new(id, key.date, key.time),
                values.clone(),
            )
        })
        .collect()
}
