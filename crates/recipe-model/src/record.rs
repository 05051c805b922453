//! String-cell records as read back from a materialized table.
//!
//! This is the shape the validator consumes: what a CSV round trip through
//! the warehouse yields, independent of how the rows were produced.

use std::collections::BTreeMap;

use crate::rows::{RowSets, TableRow};
use crate::table::TableKind;

/// One record with string cells keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    cells: BTreeMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(column, value)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Build a record from a typed row using the table's column order.
    pub fn from_row<T: TableRow>(row: &T) -> Self {
        Self::from_pairs(T::TABLE.columns().iter().copied().zip(row.cells()))
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Cell value, or an empty string when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    /// Cell value when present and non-empty.
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        Some(self.get(column)).filter(|value| !value.is_empty())
    }
}

/// All records of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub kind: TableKind,
    pub records: Vec<RawRecord>,
}

impl RawTable {
    pub fn new(kind: TableKind, records: Vec<RawRecord>) -> Self {
        Self { kind, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Values of `column`, in record order.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.records.iter().map(move |record| record.get(column))
    }
}

impl RowSets {
    /// String-cell view of every table, in export order.
    pub fn to_raw_tables(&self) -> Vec<RawTable> {
        vec![
            raw_table(&self.users),
            raw_table(&self.recipes),
            raw_table(&self.ingredients),
            raw_table(&self.steps),
            raw_table(&self.interactions),
        ]
    }
}

fn raw_table<T: TableRow>(rows: &[T]) -> RawTable {
    RawTable::new(T::TABLE, rows.iter().map(RawRecord::from_row).collect())
}
