//! A single telemetry sample and its composite key.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Time};

use crate::error::ParseError;
use crate::schema::REPORT_COLUMNS;

/// Wire/CSV format for dates, e.g. `2022-07-07`.
pub static DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Wire/CSV format for times of day, e.g. `19:55:00`.
pub static TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

/// Composite key identifying exactly one reading in a [`Table`].
///
/// Ordering is `(thermostat_id, date, time)` ascending, which is also the
/// persisted row order.
///
/// [`Table`]: crate::Table
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReadingKey {
    pub thermostat_id: String,
    pub date: Date,
    pub time: Time,
}

impl ReadingKey {
    pub fn new(thermostat_id: impl Into<String>, date: Date, time: Time) -> Self {
        Self {
            thermostat_id: thermostat_id.into(),
            date,
            time,
        }
    }

    /// The date formatted as `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).expect("well-formed date format")
    }

    /// The time formatted as `HH:MM:SS`.
    pub fn time_string(&self) -> String {
        self.time.format(TIME_FORMAT).expect("well-formed time format")
    }
}

/// One telemetry sample: a key plus one textual cell per report column.
///
/// Cells are kept as the text the API/CSV carried them in. The empty string
/// is the missing-value sentinel and is never coerced to zero; a handful of
/// columns (demand-management offset, sky cover, override event) are
/// legitimately blank in genuine data.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub thermostat_id: String,
    pub date: Date,
    pub time: Time,
    pub values: Vec<String>,
}

impl Reading {
    /// Parse a report row as returned by the runtime-report endpoint.
    ///
    /// Rows arrive as `date,time,<value per requested column>`; the
    /// thermostat id comes from the enclosing report and is supplied by the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ColumnCount`] on arity mismatch and
    /// [`ParseError::InvalidDate`]/[`ParseError::InvalidTime`] when the key
    /// cells do not parse.
    pub fn from_report_row(
        thermostat_id: impl Into<String>,
        row: &str,
    ) -> Result<Self, ParseError> {
        let cells: Vec<&str> = row.split(',').collect();
        let expected = 2 + REPORT_COLUMNS.len();
        if cells.len() != expected {
            return Err(ParseError::ColumnCount {
                expected,
                actual: cells.len(),
            });
        }

        let date = Date::parse(cells[0], DATE_FORMAT).map_err(|source| {
            ParseError::InvalidDate {
                value: cells[0].to_string(),
                source,
            }
        })?;
        let time = Time::parse(cells[1], TIME_FORMAT).map_err(|source| {
            ParseError::InvalidTime {
                value: cells[1].to_string(),
                source,
            }
        })?;

        Ok(Self {
            thermostat_id: thermostat_id.into(),
            date,
            time,
            values: cells[2..].iter().map(|c| c.trim().to_string()).collect(),
        })
    }

    /// Reassemble a reading from a key and its cells.
    pub fn from_key_values(key: ReadingKey, values: Vec<String>) -> Self {
        Self {
            thermostat_id: key.thermostat_id,
            date: key.date,
            time: key.time,
            values,
        }
    }

    /// The composite key for this reading.
    pub fn key(&self) -> ReadingKey {
        ReadingKey {
            thermostat_id: self.thermostat_id.clone(),
            date: self.date,
            time: self.time,
        }
    }

    /// Number of empty cells, the classifier's input.
    pub fn empty_field_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_empty()).count()
    }
}
