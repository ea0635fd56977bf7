//! Sync orchestration: bounded-window update and full-history backfill.

use tracing::{debug, info};

use hearth_types::Table;

use crate::classify::ClassifierConfig;
use crate::error::Result;
use crate::merge::merge;
use crate::probe::HistoryProbe;
use crate::traits::ReportSource;
use crate::window::{backfill_windows, FetchWindow};

/// Drives sync runs over a [`ReportSource`].
///
/// Two modes, matching the two ways a run can be requested:
///
/// - [`sync_window`](Self::sync_window): fetch one bounded window and merge
///   it into the existing table.
/// - [`backfill`](Self::backfill): probe for the start of history, then
///   download forward to the present 30 days at a time; the result replaces
///   the table wholesale.
///
/// Fetches are sequential; the caller persists the returned table, so a run
/// that dies mid-way leaves the previous table untouched.
pub struct SyncEngine<S> {
    source: S,
    probe: HistoryProbe,
}

impl<S: ReportSource> SyncEngine<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            probe: HistoryProbe::default(),
        }
    }

    /// Override the probe's lookback bound.
    pub fn with_max_lookback(mut self, max_lookback_days: u32) -> Self {
        self.probe.max_lookback_days = max_lookback_days;
        self
    }

    /// Override the placeholder-row classifier.
    pub fn with_classifier(mut self, classifier: ClassifierConfig) -> Self {
        self.probe.classifier = classifier;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch one window and merge it into `existing`.
    ///
    /// Keys already in the table are overwritten by the fetched rows (with
    /// gap-fill for empty cells); everything else is carried through.
    pub async fn sync_window(
        &self,
        thermostat_ids: &[String],
        window: FetchWindow,
        existing: &Table,
    ) -> Result<Table> {
        let rows = self.source.fetch_report(thermostat_ids, window).await?;
        info!(
            fetched = rows.len(),
            existing = existing.len(),
            "merging fetched window"
        );
        let incoming: Table = rows.into_iter().collect();
        Ok(merge(existing, &incoming))
    }

    /// Download the full history: probe for the earliest boundary, then
    /// fetch consecutive windows forward to now.
    ///
    /// Leading placeholder rows in the earliest window (the probe's
    /// overshoot) are discarded. `on_window(done, total)` is invoked after
    /// each window for progress reporting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HistoryNotFound`](crate::Error::HistoryNotFound)
    /// when the device has no genuine history at all.
    pub async fn backfill<F>(&self, thermostat_ids: &[String], mut on_window: F) -> Result<Table>
    where
        F: FnMut(usize, usize) + Send,
    {
        let earliest = self
            .probe
            .find_earliest_history(&self.source, thermostat_ids)
            .await?;
        let windows: Vec<FetchWindow> = backfill_windows(earliest).collect();
        let total = windows.len();
        info!(
            earliest_days_ago = earliest,
            windows = total,
            "downloading full history"
        );

        let mut all_rows = Vec::new();
        for (index, window) in windows.into_iter().enumerate() {
            let mut rows = self.source.fetch_report(thermostat_ids, window).await?;
            if index == 0 {
                // The earliest window starts before real data does.
                match self.probe.classifier.first_genuine_index(&rows) {
                    Some(first) => {
                        debug!(dropped = first, "stripped leading placeholder rows");
                        rows.drain(..first);
                    }
                    None => rows.clear(),
                }
            }
            all_rows.extend(rows);
            on_window(index + 1, total);
        }

        Ok(all_rows.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use hearth_types::{Reading, DATE_FORMAT, TIME_FORMAT};
    use time::{Date, Duration, Time};

    fn today() -> Date {
        Date::parse("2022-07-10", DATE_FORMAT).unwrap()
    }

    fn genuine(id: &str, days_ago: u32, first: &str) -> Reading {
        let mut values = vec!["1".to_string(); 28];
        values[0] = first.to_string();
        Reading {
            thermostat_id: id.to_string(),
            date: today() - Duration::days(i64::from(days_ago)),
            time: Time::parse("19:55:00", TIME_FORMAT).unwrap(),
            values,
        }
    }

    fn placeholder(id: &str, days_ago: u32) -> Reading {
        Reading {
            thermostat_id: id.to_string(),
            date: today() - Duration::days(i64::from(days_ago)),
            time: Time::parse("19:55:00", TIME_FORMAT).unwrap(),
            values: vec![String::new(); 28],
        }
    }

    /// One reading per day; genuine within `history_days`, placeholder
    /// beyond. Records every requested window.
    struct FakeSource {
        history_days: u32,
        windows: Mutex<Vec<(u32, u32)>>,
    }

    impl FakeSource {
        fn new(history_days: u32) -> Self {
            Self {
                history_days,
                windows: Mutex::new(Vec::new()),
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
            self.windows
                .lock()
                .unwrap()
                .push((window.days_ago_start(), window.days_ago_end()));
            Ok((window.days_ago_end()..=window.days_ago_start())
                .rev()
                .map(|d| {
                    if d <= self.history_days {
                        genuine("123", d, "1")
                    } else {
                        placeholder("123", d)
                    }
                })
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
    async fn sync_window_merges_into_existing() {
        let engine = SyncEngine::new(FakeSource::new(1000));
        let existing: Table = vec![genuine("123", 40, "200")].into_iter().collect();

        let window = FetchWindow::plan(10, 5).unwrap();
        let merged = engine
            .sync_window(&ids(), window, &existing)
            .await
            .unwrap();

        // The pre-existing out-of-window row survives; the window's six
        // days are all new keys.
        assert_eq!(merged.len(), 1 + 6);
        assert!(merged.contains_key(&genuine("123", 40, "200").key()));
    }

    #[tokio::test]
    async fn backfill_strips_leading_placeholders() {
        let engine = SyncEngine::new(FakeSource::new(100));
        let table = engine.backfill(&ids(), |_, _| {}).await.unwrap();

        // Boundary lands at 120; the first window (120..90) begins with
        // placeholder days which must not survive.
        assert!(!table.is_empty());
        let earliest = table.keys().map(|k| k.date).min().unwrap();
        assert_eq!(earliest, today() - Duration::days(100));

        let windows = engine.source().windows.lock().unwrap().clone();
        // Probes are single-day samples; download windows span 30 days and
        // run oldest first down to zero.
        let downloads: Vec<_> = windows.iter().filter(|(s, e)| s - e > 1).collect();
        assert_eq!(downloads.first().unwrap(), &&(120, 90));
        assert_eq!(downloads.last().unwrap(), &&(30, 0));
    }

    #[tokio::test]
    async fn backfill_reports_progress_per_window() {
        let engine = SyncEngine::new(FakeSource::new(100));
        let mut seen = Vec::new();
        engine
            .backfill(&ids(), |done, total| seen.push((done, total)))
            .await
            .unwrap();
        assert_eq!(seen, [(1, 4), (2, 4), (3, 4), (4, 4)]);
    }

    #[tokio::test]
    async fn backfill_without_history_fails_cleanly() {
        let engine = SyncEngine::new(FakeSource::new(0));
        let err = engine.backfill(&ids(), |_, _| {}).await.unwrap_err();
        assert!(matches!(err, crate::Error::HistoryNotFound));
    }
}
