//! Error types for report-row parsing.

use thiserror::Error;

/// Errors that can occur when parsing report rows into [`Reading`]s.
///
/// [`Reading`]: crate::Reading
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The date cell did not parse as `YYYY-MM-DD`.
    #[error("invalid date {value:?}: {source}")]
    InvalidDate {
        value: String,
        source: time::error::Parse,
    },

    /// The time cell did not parse as `HH:MM:SS`.
    #[error("invalid time {value:?}: {source}")]
    InvalidTime {
        value: String,
        source: time::error::Parse,
    },

    /// The row did not have the expected number of columns.
    #[error("report row has {actual} columns, expected {expected}")]
    ColumnCount { expected: usize, actual: usize },
}
