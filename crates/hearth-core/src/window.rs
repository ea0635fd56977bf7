//! Fetch-window planning.
//!
//! The report API caps a single request at 30 days. A [`FetchWindow`] is a
//! validated `(days_ago_start, days_ago_end)` pair measured from "today",
//! with the start further in the past than the end. Conversion to calendar
//! dates takes an explicit `today` and happens only at the fetch boundary,
//! keeping planning pure and tests clock-free.

use time::{Date, Duration};

use hearth_types::DATE_FORMAT;

use crate::error::{Error, Result};

/// Maximum span of a single report request, in days.
pub const MAX_WINDOW_DAYS: u32 = 30;

/// A validated request window obeying the API's 30-day span limit.
///
/// Invariants: `days_ago_start > days_ago_end` and the span is at most
/// [`MAX_WINDOW_DAYS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    days_ago_start: u32,
    days_ago_end: u32,
}

impl FetchWindow {
    /// Validate a `(days_ago_start, days_ago_end)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] when the start is not further in the
    /// past than the end, or when the span exceeds [`MAX_WINDOW_DAYS`].
    pub fn plan(days_ago_start: u32, days_ago_end: u32) -> Result<Self> {
        if days_ago_start <= days_ago_end {
            return Err(Error::InvalidRange {
                days_ago_start,
                days_ago_end,
                reason: "start must be further in the past than end",
            });
        }
        if days_ago_start - days_ago_end > MAX_WINDOW_DAYS {
            return Err(Error::InvalidRange {
                days_ago_start,
                days_ago_end,
                reason: "span exceeds the 30-day API limit",
            });
        }
        Ok(Self {
            days_ago_start,
            days_ago_end,
        })
    }

    /// A single-day sample window ending the day after `days_ago`, as used
    /// by the history probe.
    pub fn single_day(days_ago: u32) -> Result<Self> {
        Self::plan(days_ago, days_ago.saturating_sub(1))
    }

    pub fn days_ago_start(&self) -> u32 {
        self.days_ago_start
    }

    pub fn days_ago_end(&self) -> u32 {
        self.days_ago_end
    }

    /// Calendar date of the window start, relative to `today`.
    pub fn start_date(&self, today: Date) -> Date {
        today - Duration::days(i64::from(self.days_ago_start))
    }

    /// Calendar date of the window end, relative to `today`.
    pub fn end_date(&self, today: Date) -> Date {
        today - Duration::days(i64::from(self.days_ago_end))
    }
}

/// Format `today - days_ago` as `YYYY-MM-DD` for the report API.
pub fn date_string(today: Date, days_ago: u32) -> String {
    (today - Duration::days(i64::from(days_ago)))
        .format(DATE_FORMAT)
        .expect("well-formed date format")
}

/// Enumerate consecutive, non-overlapping windows covering
/// `[earliest_days_ago, 0)`, oldest first.
///
/// Each window spans at most [`MAX_WINDOW_DAYS`]; the sequence is finite and
/// ends once a window reaches 0 days ago.
pub fn backfill_windows(earliest_days_ago: u32) -> impl Iterator<Item = FetchWindow> {
    let mut start = earliest_days_ago;
    std::iter::from_fn(move || {
        if start == 0 {
            return None;
        }
        let end = start.saturating_sub(MAX_WINDOW_DAYS);
        let window = FetchWindow {
            days_ago_start: start,
            days_ago_end: end,
        };
        start = end;
        Some(window)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn rejects_start_not_after_end() {
        assert!(matches!(
            FetchWindow::plan(5, 10),
            Err(Error::InvalidRange { .. })
        ));
        assert!(matches!(
            FetchWindow::plan(5, 5),
            Err(Error::InvalidRange { .. })
        ));
    }

    #[test]
    fn rejects_span_over_limit() {
        assert!(matches!(
            FetchWindow::plan(40, 5),
            Err(Error::InvalidRange { .. })
        ));
    }

    #[test]
    fn accepts_valid_window() {
        let window = FetchWindow::plan(10, 5).unwrap();
        assert_eq!(window.days_ago_start(), 10);
        assert_eq!(window.days_ago_end(), 5);
    }

    #[test]
    fn converts_to_calendar_dates() {
        let today = date!(2022 - 07 - 10);
        let window = FetchWindow::plan(3, 0).unwrap();
        assert_eq!(window.start_date(today), date!(2022 - 07 - 07));
        assert_eq!(window.end_date(today), today);
        assert_eq!(date_string(today, 3), "2022-07-07");
    }

    #[test]
    fn backfill_windows_cover_range_oldest_first() {
        let windows: Vec<_> = backfill_windows(100).collect();
        assert_eq!(windows.len(), 4);
        assert_eq!(
            (windows[0].days_ago_start(), windows[0].days_ago_end()),
            (100, 70)
        );
        assert_eq!(
            (windows[3].days_ago_start(), windows[3].days_ago_end()),
            (10, 0)
        );
        // Consecutive and non-overlapping.
        for pair in windows.windows(2) {
            assert_eq!(pair[0].days_ago_end(), pair[1].days_ago_start());
        }
    }

    #[test]
    fn backfill_windows_exact_multiple() {
        let windows: Vec<_> = backfill_windows(60).collect();
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[1].days_ago_end(), 0);
    }

    #[test]
    fn backfill_windows_empty_for_zero() {
        assert_eq!(backfill_windows(0).count(), 0);
    }
}
