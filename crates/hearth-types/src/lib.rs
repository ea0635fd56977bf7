//! Core types for thermostat runtime-report data.
//!
//! This crate is pure data: the fixed report column schema, a single
//! [`Reading`] (one five-minute telemetry sample for one thermostat), and
//! the [`Table`] of readings keyed by `(thermostat id, date, time)`.
//! No I/O and no async live here.

mod error;
mod reading;
mod schema;
mod table;

pub use error::ParseError;
pub use reading::{Reading, ReadingKey, DATE_FORMAT, TIME_FORMAT};
pub use schema::{
    csv_header, request_column_list, DATE_COLUMN, DEFAULT_THERMOSTAT_ID, KEY_COLUMNS,
    REPORT_COLUMNS, THERMOSTAT_ID_COLUMN, TIME_COLUMN,
};
pub use table::Table;
