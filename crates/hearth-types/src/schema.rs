//! The fixed runtime-report column schema.
//!
//! The report API is asked for exactly these columns, in this order, and the
//! persisted CSV uses the readable header names in the same order. The set is
//! known at build time and never inferred from data.

/// Report columns: `(API request name, CSV header name)` pairs.
pub const REPORT_COLUMNS: [(&str, &str); 28] = [
    ("auxHeat1", "Aux Heat (sec)"),
    ("auxHeat2", "Aux Heat Stage 2 (sec)"),
    ("auxHeat3", "Aux Heat Stage 3 (sec)"),
    ("compCool1", "Cool Stage 1 (sec)"),
    ("compCool2", "Cool Stage 2 (sec)"),
    ("compHeat1", "Heat Stage 1 (sec)"),
    ("compHeat2", "Heat Stage 2 (sec)"),
    ("dehumidifier", "Dehumidifier (sec)"),
    ("dmOffset", "Demand Mgmt Offset (F)"),
    ("economizer", "Economizer Runtime (sec)"),
    ("fan", "Fan (sec)"),
    ("humidifier", "Humidifier (sec)"),
    ("hvacMode", "HVAC Mode"),
    ("outdoorHumidity", "Outdoor Humidity (%)"),
    ("outdoorTemp", "Outdoor Temp (F)"),
    ("sky", "Sky Cover"),
    ("ventilator", "Ventilator (sec)"),
    ("wind", "Wind Speed (km/h)"),
    ("zoneAveTemp", "Indoor Temp Avg (F)"),
    ("zoneCalendarEvent", "Override Event"),
    ("zoneClimate", "Climate Mode"),
    ("zoneCoolTemp", "Zone Cool Temp"),
    ("zoneHeatTemp", "Zone Heat Temp"),
    ("zoneHumidity", "Humidity Avg (%)"),
    ("zoneHumidityHigh", "Humidity High (%)"),
    ("zoneHumidityLow", "Humidity Low (%)"),
    ("zoneHvacMode", "HVAC System Mode"),
    ("zoneOccupancy", "Zone Occupancy"),
];

/// CSV header name for the thermostat identifier column.
pub const THERMOSTAT_ID_COLUMN: &str = "Thermostat ID";

/// CSV header name for the date column (`YYYY-MM-DD`).
pub const DATE_COLUMN: &str = "Date";

/// CSV header name for the time-of-day column (`HH:MM:SS`, 5-minute buckets).
pub const TIME_COLUMN: &str = "Time";

/// The composite-key columns, in key order.
pub const KEY_COLUMNS: [&str; 3] = [THERMOSTAT_ID_COLUMN, DATE_COLUMN, TIME_COLUMN];

/// Identifier assigned to rows from legacy tables persisted without a
/// thermostat id column.
pub const DEFAULT_THERMOSTAT_ID: &str = "0";

/// The full CSV header row: key columns followed by the report columns.
pub fn csv_header() -> Vec<&'static str> {
    KEY_COLUMNS
        .iter()
        .copied()
        .chain(REPORT_COLUMNS.iter().map(|(_, header)| *header))
        .collect()
}

/// Comma-joined API request names, as the report endpoint expects them.
pub fn request_column_list() -> String {
    REPORT_COLUMNS
        .iter()
        .map(|(api, _)| *api)
        .collect::<Vec<_>>()
        .join(",")
}
