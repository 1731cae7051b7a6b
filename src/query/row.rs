//! Column access for row mappers.

use sqlx::any::AnyRow;
use sqlx::{Any, Decode, Row, Type};

use crate::datasource::DataAccessError;

/// A single result row as seen by a row mapper.
pub struct ResultRow<'r> {
    row: &'r AnyRow,
    row_num: usize,
}

impl<'r> ResultRow<'r> {
    pub(crate) fn new(row: &'r AnyRow, row_num: usize) -> Self {
        Self { row, row_num }
    }

    /// Zero-based position of this row in the result set.
    pub fn row_num(&self) -> usize {
        self.row_num
    }

    /// Read a column by name.
    pub fn get<T>(&self, column: &str) -> Result<T, DataAccessError>
    where
        T: for<'a> Decode<'a, Any> + Type<Any>,
    {
        self.row
            .try_get::<T, _>(column)
            .map_err(|source| DataAccessError::Mapping {
                column: column.to_string(),
                source,
            })
    }
}
