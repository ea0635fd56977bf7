//! Trait abstractions over the remote report API.
//!
//! [`ReportSource`] is the seam between the sync engine and HTTP transport.
//! The engine only ever asks "fetch a report for thermostat set S over
//! window W"; tests implement the trait with canned data, production uses
//! [`ApiClient`](crate::ApiClient).

use async_trait::async_trait;

use hearth_types::Reading;

use crate::error::Result;
use crate::window::FetchWindow;

/// Capability to fetch runtime reports and enumerate thermostats.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Fetch report rows for the given thermostats over a date window.
    ///
    /// Rows conform to the fixed report schema. Failures surface as a fetch
    /// error and are not retried or interpreted here.
    async fn fetch_report(
        &self,
        thermostat_ids: &[String],
        window: FetchWindow,
    ) -> Result<Vec<Reading>>;

    /// List the identifiers of all registered thermostats.
    async fn list_thermostats(&self) -> Result<Vec<String>>;
}
