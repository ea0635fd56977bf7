//! Telling genuine telemetry rows apart from placeholder rows.
//!
//! The report API returns rows for every time bucket in a window even when
//! the thermostat was not yet reporting; those placeholder rows carry only
//! ambient weather data and leave most device-specific cells blank. Genuine
//! rows have few blanks: only demand-management offset, sky cover, and the
//! override-event column are consistently empty.

use hearth_types::Reading;

/// Empty-cell threshold used to classify placeholder rows.
///
/// Rows with an empty-field count at or above this are classified as
/// placeholder. Tunable; the default tracks the three consistently-blank
/// columns with headroom of one.
pub const DEFAULT_EMPTY_FIELD_THRESHOLD: usize = 5;

/// Configuration for the row classifier.
#[derive(Debug, Clone, Copy)]
pub struct ClassifierConfig {
    /// Rows with `empty-field count >= threshold` are placeholder.
    pub empty_field_threshold: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            empty_field_threshold: DEFAULT_EMPTY_FIELD_THRESHOLD,
        }
    }
}

impl ClassifierConfig {
    /// Does this row contain genuine device telemetry?
    pub fn is_genuine(&self, reading: &Reading) -> bool {
        reading.empty_field_count() < self.empty_field_threshold
    }

    /// Index of the first genuine row, scanning in order.
    ///
    /// `None` means no row qualifies; callers must treat that as a distinct
    /// case, never as an offset.
    pub fn first_genuine_index(&self, rows: &[Reading]) -> Option<usize> {
        rows.iter().position(|r| self.is_genuine(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_types::{DATE_FORMAT, TIME_FORMAT};
    use time::{Date, Time};

    fn reading_with_empties(empty_count: usize) -> Reading {
        let mut values = vec!["1".to_string(); 28];
        for cell in values.iter_mut().take(empty_count) {
            cell.clear();
        }
        Reading {
            thermostat_id: "123".to_string(),
            date: Date::parse("2022-07-07", DATE_FORMAT).unwrap(),
            time: Time::parse("19:55:00", TIME_FORMAT).unwrap(),
            values,
        }
    }

    #[test]
    fn genuine_below_threshold() {
        let classifier = ClassifierConfig::default();
        assert!(classifier.is_genuine(&reading_with_empties(0)));
        assert!(classifier.is_genuine(&reading_with_empties(4)));
        assert!(!classifier.is_genuine(&reading_with_empties(5)));
        assert!(!classifier.is_genuine(&reading_with_empties(28)));
    }

    #[test]
    fn threshold_is_tunable() {
        let strict = ClassifierConfig {
            empty_field_threshold: 1,
        };
        assert!(strict.is_genuine(&reading_with_empties(0)));
        assert!(!strict.is_genuine(&reading_with_empties(1)));
    }

    #[test]
    fn first_genuine_index_scans_in_order() {
        let classifier = ClassifierConfig::default();
        let rows = vec![
            reading_with_empties(20),
            reading_with_empties(10),
            reading_with_empties(3),
            reading_with_empties(20),
        ];
        assert_eq!(classifier.first_genuine_index(&rows), Some(2));
    }

    #[test]
    fn first_genuine_index_not_found() {
        let classifier = ClassifierConfig::default();
        let rows = vec![reading_with_empties(20), reading_with_empties(28)];
        assert_eq!(classifier.first_genuine_index(&rows), None);
        assert_eq!(classifier.first_genuine_index(&[]), None);
    }
}
