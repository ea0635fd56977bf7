//! Incremental sync engine for thermostat runtime-report history.
//!
//! The engine pulls time-series telemetry from a remote report API and
//! maintains a single canonical table of historical readings. Its pieces:
//!
//! - [`FetchWindow`] / [`backfill_windows`]: partition a date range into
//!   API-sized (at most 30 day) request windows.
//! - [`ClassifierConfig`]: tell genuine telemetry rows apart from
//!   weather-only placeholder rows.
//! - [`HistoryProbe`]: walk backward in time to discover how far real
//!   history extends.
//! - [`merge`]: fold newly fetched rows into a previously persisted table
//!   under a composite temporal key.
//! - [`SyncEngine`]: orchestrate bounded-window sync and full backfill
//!   over a [`ReportSource`].
//!
//! HTTP transport ([`ApiClient`]) and the OAuth pin flow ([`AuthClient`])
//! live here too; persistence belongs to `hearth-store` and the user-facing
//! surface to `hearth-cli`.

mod api;
mod auth;
mod classify;
mod error;
mod merge;
mod probe;
mod sync;
mod traits;
mod window;

pub use api::{ApiClient, API_ROOT};
pub use auth::{AuthClient, PinAuthorization, TokenPair};
pub use classify::ClassifierConfig;
pub use error::{Error, Result};
pub use merge::merge;
pub use probe::{HistoryProbe, DEFAULT_MAX_LOOKBACK_DAYS, PROBE_STEP_DAYS};
pub use sync::SyncEngine;
pub use traits::ReportSource;
pub use window::{backfill_windows, date_string, FetchWindow, MAX_WINDOW_DAYS};
