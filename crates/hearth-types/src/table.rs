//! The canonical table of readings.

use std::collections::BTreeMap;

use crate::reading::{Reading, ReadingKey};

/// An ordered collection of readings keyed by `(thermostat_id, date, time)`.
///
/// Keys are unique by construction; inserting a reading for an existing key
/// replaces its cells. Iteration is in ascending key order, which is the
/// order the codec persists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: BTreeMap<ReadingKey, Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Insert a reading, returning the previous cells for its key if any.
    pub fn insert(&mut self, reading: Reading) -> Option<Vec<String>> {
        let key = reading.key();
        self.rows.insert(key, reading.values)
    }

    pub fn get(&self, key: &ReadingKey) -> Option<&Vec<String>> {
        self.rows.get(key)
    }

    pub fn contains_key(&self, key: &ReadingKey) -> bool {
        self.rows.contains_key(key)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &ReadingKey> {
        self.rows.keys()
    }

    /// `(key, cells)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ReadingKey, &Vec<String>)> {
        self.rows.iter()
    }

    /// Owned readings in ascending key order, consuming the table.
    pub fn into_readings(self) -> impl Iterator<Item = Reading> {
        self.rows
            .into_iter()
            .map(|(key, values)| Reading::from_key_values(key, values))
    }

    /// The distinct thermostat ids present, in ascending order.
    pub fn thermostat_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .rows
            .keys()
            .map(|k| k.thermostat_id.as_str())
            .collect();
        ids.dedup();
        ids
    }
}

impl FromIterator<Reading> for Table {
    fn from_iter<I: IntoIterator<Item = Reading>>(iter: I) -> Self {
        let mut table = Table::new();
        for reading in iter {
            table.insert(reading);
        }
        table
    }
}

impl Extend<Reading> for Table {
    fn extend<I: IntoIterator<Item = Reading>>(&mut self, iter: I) {
        for reading in iter {
            self.insert(reading);
        }
    }
}
