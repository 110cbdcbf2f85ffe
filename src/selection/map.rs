//! Row-indexed candidate sets.

use std::collections::{BTreeMap, BTreeSet};

/// Seating row index. Row 0 is the front.
pub type Row = usize;

/// Mapping from seating row to the names selected in that row.
///
/// Rows iterate front to back; names within a row iterate in lexical
/// order. A name may appear in more than one row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionMap {
    rows: BTreeMap<Row, BTreeSet<String>>,
}

impl SelectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places every name in row 0.
    pub fn single_row<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map = Self::new();
        for name in names {
            map.insert(0, name);
        }
        map
    }

    pub fn insert(&mut self, row: Row, name: impl Into<String>) {
        self.rows.entry(row).or_default().insert(name.into());
    }

    /// Number of distinct (non-empty) rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, row: Row) -> Option<&BTreeSet<String>> {
        self.rows.get(&row)
    }

    /// Rows in ascending order.
    pub fn rows(&self) -> impl Iterator<Item = (Row, &BTreeSet<String>)> {
        self.rows.iter().map(|(r, names)| (*r, names))
    }

    /// Every name across every row, front row first. Repeats are kept.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rows.values().flatten().map(String::as_str)
    }
}
