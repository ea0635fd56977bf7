//! HTTP client for the thermostat report API.
//!
//! Implements [`ReportSource`] over the ecobee REST API. Both endpoints take
//! a JSON selection document in a `body` query parameter. The client does no
//! retrying or rate limiting; failures surface as typed errors for the
//! caller to deal with.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use time::OffsetDateTime;
use tracing::{debug, info};

use hearth_types::{request_column_list, Reading};

use crate::error::{Error, Result};
use crate::traits::ReportSource;
use crate::window::{date_string, FetchWindow};

/// Production API root.
pub const API_ROOT: &str = "https://api.ecobee.com";

/// Authenticated client for report fetches and thermostat listing.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct RuntimeReportResponse {
    #[serde(rename = "reportList", default)]
    report_list: Vec<Report>,
}

#[derive(Debug, Deserialize)]
struct Report {
    #[serde(rename = "thermostatIdentifier")]
    thermostat_identifier: String,
    #[serde(rename = "rowList", default)]
    row_list: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ThermostatResponse {
    #[serde(rename = "thermostatList", default)]
    thermostat_list: Vec<Thermostat>,
}

#[derive(Debug, Deserialize)]
struct Thermostat {
    identifier: String,
}

impl ApiClient {
    /// Client against the production API root.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(API_ROOT, access_token)
    }

    /// Client against an alternate root (tests, staging).
    pub fn with_base_url(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }
}

#[async_trait]
impl ReportSource for ApiClient {
    async fn fetch_report(
        &self,
        thermostat_ids: &[String],
        window: FetchWindow,
    ) -> Result<Vec<Reading>> {
        let today = OffsetDateTime::now_utc().date();
        let start_date = date_string(today, window.days_ago_start());
        let end_date = date_string(today, window.days_ago_end());
        info!("Fetching report for {start_date}..{end_date}");

        let body = json!({
            "startDate": start_date,
            "endDate": end_date,
            "columns": request_column_list(),
            "selection": {
                "selectionType": "thermostats",
                "selectionMatch": thermostat_ids.join(","),
            },
        });

        let fetch_err = |source| Error::Fetch {
            start_date: start_date.clone(),
            end_date: end_date.clone(),
            source,
        };
        let body = body.to_string();
        let response: RuntimeReportResponse = self
            .http
            .get(format!("{}/1/runtimeReport", self.base_url))
            .query(&[("format", "json"), ("body", body.as_str())])
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(fetch_err)?
            .error_for_status()
            .map_err(fetch_err)?
            .json()
            .await
            .map_err(fetch_err)?;

        let mut readings = Vec::new();
        for report in &response.report_list {
            for row in &report.row_list {
                readings.push(Reading::from_report_row(
                    report.thermostat_identifier.as_str(),
                    row,
                )?);
            }
        }
        debug!(rows = readings.len(), "report parsed");
        Ok(readings)
    }

    async fn list_thermostats(&self) -> Result<Vec<String>> {
        const ENDPOINT: &str = "/1/thermostat";
        info!("Fetching registered thermostats");

        let body = json!({
            "selection": {
                "selectionType": "registered",
                "selectionMatch": "",
            },
        });

        let http_err = |source| Error::Http {
            endpoint: ENDPOINT,
            source,
        };
        let body = body.to_string();
        let response: ThermostatResponse = self
            .http
            .get(format!("{}{}", self.base_url, ENDPOINT))
            .query(&[("format", "json"), ("body", body.as_str())])
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(http_err)?
            .error_for_status()
            .map_err(http_err)?
            .json()
            .await
            .map_err(http_err)?;

        if response.thermostat_list.is_empty() {
            return Err(Error::Api {
                endpoint: ENDPOINT,
                detail: "no registered thermostats in response".to_string(),
            });
        }

        Ok(response
            .thermostat_list
            .into_iter()
            .map(|t| t.identifier)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_report_response() {
        let json = r#"{
            "reportList": [
                {"thermostatIdentifier": "123", "rowList": ["2022-07-07,19:55:00,0"]},
                {"thermostatIdentifier": "456", "rowList": []}
            ]
        }"#;
        let response: RuntimeReportResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.report_list.len(), 2);
        assert_eq!(response.report_list[0].thermostat_identifier, "123");
        assert_eq!(response.report_list[0].row_list.len(), 1);
    }

    #[test]
    fn deserializes_thermostat_response() {
        let json = r#"{"thermostatList": [{"identifier": "123"}, {"identifier": "456"}]}"#;
        let response: ThermostatResponse = serde_json::from_str(json).unwrap();
        let ids: Vec<_> = response
            .thermostat_list
            .into_iter()
            .map(|t| t.identifier)
            .collect();
        assert_eq!(ids, ["123", "456"]);
    }

    #[test]
    fn missing_report_list_defaults_to_empty() {
        let response: RuntimeReportResponse = serde_json::from_str("{}").unwrap();
        assert!(response.report_list.is_empty());
    }
}
