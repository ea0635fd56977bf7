//! Error types for hearth-core.

use thiserror::Error;

/// Result type alias for hearth-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while planning, fetching, or merging history.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A malformed fetch-window request. Caller bug, never retried.
    #[error("invalid fetch window ({days_ago_start}, {days_ago_end}): {reason}")]
    InvalidRange {
        days_ago_start: u32,
        days_ago_end: u32,
        reason: &'static str,
    },

    /// The report fetch for a specific window failed. Surfaced unchanged;
    /// the engine performs no retry or backoff.
    #[error("report fetch for {start_date}..{end_date} failed: {source}")]
    Fetch {
        start_date: String,
        end_date: String,
        source: reqwest::Error,
    },

    /// An API request outside the report fetch failed.
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: &'static str,
        source: reqwest::Error,
    },

    /// The API answered but the payload was not what we expect.
    #[error("unexpected response from {endpoint}: {detail}")]
    Api {
        endpoint: &'static str,
        detail: String,
    },

    /// Pin authorization or token exchange failed.
    #[error("authorization failed: {0}")]
    Auth(String),

    /// A fetched report row did not parse.
    #[error("malformed report row: {0}")]
    Parse(#[from] hearth_types::ParseError),

    /// The very first probe window held no genuine telemetry; the device
    /// has no meaningful history and a backfill must not be attempted.
    /// This is an expected outcome, not a crash.
    #[error("no genuine telemetry found within the first probe window")]
    HistoryNotFound,
}
