//! Customer records.

use serde::{Deserialize, Serialize};

use crate::datasource::DataAccessError;
use crate::query::{QueryTemplate, ResultRow};

/// Query backing `GET /customers`.
pub const SELECT_ALL: &str = "select * from customers";

/// A row of the `customers` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
}

impl Customer {
    /// Row mapper for the `customers` table.
    pub fn from_row(row: &ResultRow<'_>) -> Result<Self, DataAccessError> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

/// Load every customer in result-set order.
pub async fn find_all(template: &QueryTemplate) -> Result<Vec<Customer>, DataAccessError> {
    template.query(SELECT_ALL, Customer::from_row).await
}
