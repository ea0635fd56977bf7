//! Flat-file persistence for the canonical readings table.
//!
//! One CSV file holds the entire history: a fixed header naming the key and
//! report columns, then one row per reading in ascending key order. The
//! codec is a pure structural transform; it never converts units or rounds
//! values, and a missing file reads as an empty table so the first run
//! bootstraps itself.
//!
//! # Example
//!
//! ```no_run
//! use hearth_store::{read_table, write_table};
//!
//! let table = read_table("history.csv")?;
//! write_table(&table, "history.csv")?;
//! # Ok::<(), hearth_store::Error>(())
//! ```

mod codec;
mod error;

pub use codec::{read_table, write_table};
pub use error::{Error, Result};

/// Default CSV path following platform conventions.
///
/// - Linux: `~/.local/share/hearth/history.csv`
/// - macOS: `~/Library/Application Support/hearth/history.csv`
/// - Windows: `C:\Users\<user>\AppData\Local\hearth\history.csv`
pub fn default_csv_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("hearth")
        .join("history.csv")
}
