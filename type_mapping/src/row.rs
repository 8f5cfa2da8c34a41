//! Raw result rows
//!
//! A `RawRow` is what a query executor hands back for every row: the column
//! labels in select-list order with their decoded values.

use crate::errors::MappingError;
use serde_json::Value;

/// One result row, columns kept in database order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    labels: Vec<String>,
    values: Vec<Value>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(columns: usize) -> Self {
        Self {
            labels: Vec::with_capacity(columns),
            values: Vec::with_capacity(columns),
        }
    }

    /// Append a column
    pub fn push(&mut self, label: impl Into<String>, value: Value) {
        self.labels.push(label.into());
        self.values.push(value);
    }

    /// Builder-style variant of [`RawRow::push`]
    pub fn with_column(mut self, label: impl Into<String>, value: Value) -> Self {
        self.push(label, value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value at a zero-based column position
    pub fn get(&self, index: usize) -> Result<&Value, MappingError> {
        self.values.get(index).ok_or(MappingError::ColumnOutOfRange {
            index,
            len: self.values.len(),
        })
    }

    /// First column whose label matches ignoring ASCII case
    pub fn get_by_label(&self, label: &str) -> Option<&Value> {
        self.labels
            .iter()
            .position(|l| l.eq_ignore_ascii_case(label))
            .map(|i| &self.values[i])
    }

    /// Iterate over `(label, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl<S: Into<String>> FromIterator<(S, Value)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (S, Value)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (label, value) in iter {
            row.push(label, value);
        }
        row
    }
}
