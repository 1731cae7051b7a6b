//! Query template over a data source.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use sqlx::any::AnyRow;

use crate::datasource::{DataAccessError, DataSource};
use crate::observability::metrics;
use crate::query::ResultRow;

/// Runs SQL against a data source and maps rows to records.
#[derive(Clone)]
pub struct QueryTemplate {
    data_source: Arc<dyn DataSource>,
}

impl QueryTemplate {
    pub fn new(data_source: Arc<dyn DataSource>) -> Self {
        Self { data_source }
    }

    /// Run `sql` and map every row with `mapper`, preserving result-set order.
    pub async fn query<T, F>(&self, sql: &str, mapper: F) -> Result<Vec<T>, DataAccessError>
    where
        F: Fn(&ResultRow<'_>) -> Result<T, DataAccessError>,
    {
        let start = Instant::now();
        let rows = match self.fetch(sql).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(sql = %sql, error = %e, "Query failed");
                metrics::record_query("error", start);
                return Err(e);
            }
        };

        let mapped = rows
            .iter()
            .enumerate()
            .map(|(row_num, row)| mapper(&ResultRow::new(row, row_num)))
            .collect::<Result<Vec<_>, _>>();

        match &mapped {
            Ok(records) => {
                tracing::debug!(
                    sql = %sql,
                    rows = records.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Query executed"
                );
                metrics::record_query("ok", start);
            }
            Err(e) => {
                tracing::error!(sql = %sql, error = %e, "Row mapping failed");
                metrics::record_query("error", start);
            }
        }

        mapped
    }

    /// Execute a statement and return the number of affected rows.
    pub async fn update(&self, sql: &str) -> Result<u64, DataAccessError> {
        let start = Instant::now();
        let mut conn = self.data_source.connection().await?;

        match sqlx::query(sql).execute(&mut *conn).await {
            Ok(result) => {
                metrics::record_query("ok", start);
                Ok(result.rows_affected())
            }
            Err(e) => {
                tracing::error!(sql = %sql, error = %e, "Statement failed");
                metrics::record_query("error", start);
                Err(DataAccessError::Sql(e))
            }
        }
    }

    async fn fetch(&self, sql: &str) -> Result<Vec<AnyRow>, DataAccessError> {
        let mut conn = self.data_source.connection().await?;
        let rows = sqlx::query(sql).fetch_all(&mut *conn).await?;
        Ok(rows)
    }
}

impl fmt::Debug for QueryTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryTemplate")
            .field("data_source", &format_args!("{}", self.data_source))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::PooledDataSource;
    use crate::naming::descriptor::props;
    use crate::naming::{ResourceDescriptor, DATA_SOURCE_TYPE};

    // A single connection keeps the in-memory database alive across calls.
    fn template() -> QueryTemplate {
        let descriptor = ResourceDescriptor::builder("jdbc/test", DATA_SOURCE_TYPE)
            .property(props::URL, "sqlite::memory:")
            .property(props::MAX_TOTAL, "1")
            .property(props::MIN_IDLE, "1")
            .build();
        let ds = PooledDataSource::from_descriptor("java:comp/env/jdbc/test", Arc::new(descriptor)).unwrap();
        QueryTemplate::new(Arc::new(ds))
    }

    #[tokio::test]
    async fn test_rows_mapped_in_order() {
        let template = template();
        template
            .update("CREATE TABLE items (id INTEGER PRIMARY KEY, label TEXT NOT NULL)")
            .await
            .unwrap();
        let inserted = template
            .update("INSERT INTO items (id, label) VALUES (3, 'c'), (1, 'a'), (2, 'b')")
            .await
            .unwrap();
        assert_eq!(inserted, 3);

        let items = template
            .query("SELECT id, label FROM items ORDER BY id DESC", |row| {
                Ok((row.row_num(), row.get::<i64>("id")?, row.get::<String>("label")?))
            })
            .await
            .unwrap();

        assert_eq!(
            items,
            vec![(0, 3, "c".to_string()), (1, 2, "b".to_string()), (2, 1, "a".to_string())]
        );
    }

    #[tokio::test]
    async fn test_debug_renders_data_source() {
        let rendered = format!("{:?}", template());
        assert!(rendered.starts_with("QueryTemplate"));
        assert!(rendered.contains("java:comp/env/jdbc/test"));
    }

    #[tokio::test]
    async fn test_empty_result() {
        let template = template();
        template.update("CREATE TABLE items (id INTEGER)").await.unwrap();

        let items = template
            .query("SELECT * FROM items", |row| row.get::<i64>("id"))
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_sql_error_propagates() {
        let template = template();
        let err = template
            .query("SELECT * FROM missing_table", |row| row.get::<i64>("id"))
            .await
            .unwrap_err();
        assert!(matches!(err, DataAccessError::Sql(_)));
    }

    #[tokio::test]
    async fn test_mapping_error_names_column() {
        let template = template();
        template.update("CREATE TABLE items (id INTEGER)").await.unwrap();
        template.update("INSERT INTO items (id) VALUES (1)").await.unwrap();

        let err = template
            .query("SELECT * FROM items", |row| row.get::<i64>("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, DataAccessError::Mapping { ref column, .. } if column == "nope"));
    }
}
