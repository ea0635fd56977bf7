//! Error types for hearth-store.

use std::path::PathBuf;

/// Result type for hearth-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur reading or writing the persisted table.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// CSV parse/serialize error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The persisted header does not match any recognized schema. Never
    /// silently coerced; the one sanctioned upgrade (missing thermostat id
    /// column) is handled before this fires.
    #[error("unrecognized column set in {path}: {detail}")]
    SchemaMismatch { path: PathBuf, detail: String },

    /// A persisted key cell did not parse.
    #[error("bad row in {path} (line {line}): {detail}")]
    BadRow {
        path: PathBuf,
        line: u64,
        detail: String,
    },

    /// Failed to create the data directory.
    #[error("failed to create data directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
