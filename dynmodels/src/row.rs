//! Backend-neutral row representation

use crate::error::{Error, Result};
use crate::traits::Row;
use crate::value::Value;

/// A row returned by any backend adapter.
///
/// Columns keep the order the backend reported them in. Lookup by name tries
/// an exact match first and falls back to an ASCII case-insensitive match, so
/// warehouse backends that upper-case identifiers project into the same
/// records as row-store backends that lower-case them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynRow {
    columns: Vec<(String, Value)>,
}

impl DynRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty row with room for `capacity` columns.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    /// Append a column.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.columns.push((name.into(), value.into()));
    }

    /// Builder-style [`DynRow::push`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    /// Column names in backend order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn lookup(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .or_else(|| {
                self.columns
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(column))
            })
            .map(|(_, value)| value)
    }
}

impl Row for DynRow {
    fn get_value(&self, column: &str) -> Result<Value> {
        self.lookup(column)
            .cloned()
            .ok_or_else(|| Error::ColumnNotFound(column.to_string()))
    }
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for DynRow {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut row = DynRow::new();
        for (name, value) in iter {
            row.push(name, value);
        }
        row
    }
}
