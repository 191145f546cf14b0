//! ODBC row definition.

use crate::odbc::{OdbcColumn, OdbcValue};
use std::sync::Arc;

/// A row from an ODBC result set: an ordered sequence of column/value pairs.
///
/// The column descriptors are shared across all rows of one result set,
/// since every row of a single execution has the same shape.
#[derive(Debug, Clone)]
pub struct OdbcRow {
    columns: Arc<[OdbcColumn]>,
    values: Vec<OdbcValue>,
}

impl OdbcRow {
    pub(crate) fn new(columns: Arc<[OdbcColumn]>, values: Vec<OdbcValue>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// The number of columns in this row.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the row is empty.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The column descriptors for this row, in ordinal order.
    pub fn columns(&self) -> &[OdbcColumn] {
        &self.columns
    }

    /// Get a value by 0-based index.
    pub fn get(&self, index: usize) -> Option<&OdbcValue> {
        self.values.get(index)
    }

    /// Get a value by column name. The first matching column wins.
    pub fn get_by_name(&self, name: &str) -> Option<&OdbcValue> {
        self.columns
            .iter()
            .position(|column| column.name() == name)
            .and_then(|index| self.values.get(index))
    }

    /// Iterate over `(column name, value)` pairs in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OdbcValue)> {
        self.columns
            .iter()
            .map(|column| column.name())
            .zip(self.values.iter())
    }
}
