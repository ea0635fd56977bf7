//! Backward probing to discover where history begins.
//!
//! The API offers no "give me everything" primitive, so the probe
//! approximates one: starting 30 days back it fetches single-day sample
//! windows, stepping another 30 days back each time the sample still holds
//! genuine telemetry. The first sample with none marks the download
//! boundary. The walk is serial by design: each step's termination decision
//! depends on the previous step's result.

use tracing::{debug, info};

use crate::classify::ClassifierConfig;
use crate::error::{Error, Result};
use crate::traits::ReportSource;
use crate::window::{FetchWindow, MAX_WINDOW_DAYS};

/// How far back a probe walk may go, in days (~2 years).
pub const DEFAULT_MAX_LOOKBACK_DAYS: u32 = 730;

/// Distance between consecutive probe points.
pub const PROBE_STEP_DAYS: u32 = MAX_WINDOW_DAYS;

/// Discovers the earliest month for which genuine telemetry exists.
#[derive(Debug, Clone, Copy)]
pub struct HistoryProbe {
    /// Hard bound on the walk; reaching it reports the bound itself as the
    /// boundary, never "infinite".
    pub max_lookback_days: u32,
    pub classifier: ClassifierConfig,
}

impl Default for HistoryProbe {
    fn default() -> Self {
        Self {
            max_lookback_days: DEFAULT_MAX_LOOKBACK_DAYS,
            classifier: ClassifierConfig::default(),
        }
    }
}

impl HistoryProbe {
    /// Walk backward until a sample window holds no genuine telemetry and
    /// return that probe point as the boundary, in days ago.
    ///
    /// A sample that still holds data implies history extends at least one
    /// full window further back, so the walk overshoots the true start by
    /// at most one window; the backfill strips the leading placeholder rows
    /// that overshoot produces. Note this assumes history is gap-free once
    /// it starts; an internal gap would end the walk early.
    ///
    /// Always issues the first fetch, then at most one more per
    /// `PROBE_STEP_DAYS` of lookback.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HistoryNotFound`] when the very first probe (30
    /// days ago) finds nothing; the caller must not attempt a backfill.
    pub async fn find_earliest_history<S>(
        &self,
        source: &S,
        thermostat_ids: &[String],
    ) -> Result<u32>
    where
        S: ReportSource + ?Sized,
    {
        info!("Probing for the start of thermostat history");
        let mut days_ago = PROBE_STEP_DAYS;
        loop {
            // The first probe runs unconditionally; the no-history check
            // must happen even when the lookback bound is a single step.
            let window = FetchWindow::single_day(days_ago)?;
            let rows = source.fetch_report(thermostat_ids, window).await?;
            debug!(
                days_ago,
                rows = rows.len(),
                "probe sample fetched"
            );
            if self.classifier.first_genuine_index(&rows).is_none() {
                if days_ago == PROBE_STEP_DAYS {
                    return Err(Error::HistoryNotFound);
                }
                info!(days_ago, "history boundary found");
                return Ok(days_ago);
            }
            days_ago += PROBE_STEP_DAYS;
            if days_ago >= self.max_lookback_days {
                info!(
                    max_lookback_days = self.max_lookback_days,
                    "lookback bound reached, treating it as the boundary"
                );
                return Ok(self.max_lookback_days);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use hearth_types::{Reading, DATE_FORMAT, TIME_FORMAT};
    use time::{Date, Duration, Time};

    /// Serves genuine rows for probes within `history_days` days ago and
    /// placeholder rows beyond, counting every fetch.
    struct FakeSource {
        history_days: u32,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn new(history_days: u32) -> Self {
            Self {
                history_days,
                calls: AtomicUsize::new(0),
            }
        }

        fn row(&self, days_ago: u32) -> Reading {
            let today = Date::parse("2022-07-10", DATE_FORMAT).unwrap();
            let genuine = days_ago <= self.history_days;
            Reading {
                thermostat_id: "123".to_string(),
                date: today - Duration::days(i64::from(days_ago)),
                time: Time::parse("00:00:00", TIME_FORMAT).unwrap(),
                values: if genuine {
                    vec!["1".to_string(); 28]
                } else {
                    vec![String::new(); 28]
                },
            }
        }
    }

    #[async_trait]
    impl ReportSource for FakeSource {
        async fn fetch_report(
            &self,
            _thermostat_ids: &[String],
            window: FetchWindow,
        ) -> Result<Vec<Reading>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((window.days_ago_end()..=window.days_ago_start())
                .map(|d| self.row(d))
                .collect())
        }

        async fn list_thermostats(&self) -> Result<Vec<String>> {
            Ok(vec!["123".to_string()])
        }
    }

    fn ids() -> Vec<String> {
        vec!["123".to_string()]
    }

    #[tokio::test]
    async fn finds_boundary_within_window_granularity() {
        let source = FakeSource::new(100);
        let probe = HistoryProbe::default();
        let boundary = probe.find_earliest_history(&source, &ids()).await.unwrap();
        // Probes at 30, 60, 90 find data; 120 does not.
        assert_eq!(boundary, 120);
        assert!(boundary.abs_diff(100) <= 30);
        assert!(source.calls.load(Ordering::SeqCst) <= (730 / 30 + 1) as usize);
    }

    #[tokio::test]
    async fn caps_at_max_lookback() {
        let source = FakeSource::new(10_000);
        let probe = HistoryProbe::default();
        let boundary = probe.find_earliest_history(&source, &ids()).await.unwrap();
        assert_eq!(boundary, DEFAULT_MAX_LOOKBACK_DAYS);
        assert!(source.calls.load(Ordering::SeqCst) <= (730 / 30 + 1) as usize);
    }

    #[tokio::test]
    async fn single_step_lookback_still_issues_the_first_fetch() {
        // With the bound at one step the walk must still sample once; a
        // device with no history has to surface as such, not as a boundary
        // at the bound.
        let source = FakeSource::new(0);
        let probe = HistoryProbe {
            max_lookback_days: PROBE_STEP_DAYS,
            ..HistoryProbe::default()
        };
        let err = probe
            .find_earliest_history(&source, &ids())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::HistoryNotFound));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn single_step_lookback_caps_when_history_exists() {
        let source = FakeSource::new(10_000);
        let probe = HistoryProbe {
            max_lookback_days: PROBE_STEP_DAYS,
            ..HistoryProbe::default()
        };
        let boundary = probe.find_earliest_history(&source, &ids()).await.unwrap();
        assert_eq!(boundary, PROBE_STEP_DAYS);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn no_history_is_a_distinct_outcome() {
        let source = FakeSource::new(0);
        let probe = HistoryProbe::default();
        let err = probe
            .find_earliest_history(&source, &ids())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::HistoryNotFound));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }
}
