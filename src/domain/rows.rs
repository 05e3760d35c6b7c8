//! Extracted table contents
//!
//! Rows travel between databases as JSON objects keyed by column name. The
//! destination converts each field to its column type on insert, so the
//! loader never needs to know the column types itself.

use serde_json::{Map, Value};

/// One extracted row
pub type Row = Map<String, Value>;

/// All rows of one source relation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableData {
    rows: Vec<Row>,
}

impl TableData {
    /// Creates table data from extracted rows
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Builds table data from JSON values, ignoring anything that is not an object
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let rows = values
            .into_iter()
            .filter_map(|value| match value {
                Value::Object(row) => Some(row),
                _ => None,
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names of the source relation, taken from the first row
    pub fn columns(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// All rows as a single JSON array, the form bound as an insert parameter
    pub fn to_json_array(&self) -> Value {
        Value::Array(self.rows.iter().cloned().map(Value::Object).collect())
    }
}
