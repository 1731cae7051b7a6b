//! Pooled data source built from a resource descriptor.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::any::AnyPoolOptions;
use sqlx::pool::PoolConnection;
use sqlx::{Any, AnyPool};

use crate::datasource::{DataAccessError, DataSource, Driver};
use crate::naming::descriptor::{props, ResourceDescriptor};
use crate::naming::NamingError;

const DEFAULT_MAX_TOTAL: u32 = 10;
const DEFAULT_MIN_IDLE: u32 = 0;
const DEFAULT_MAX_WAIT_MILLIS: u64 = 5_000;

/// A connection pool bound in the naming registry.
pub struct PooledDataSource {
    name: String,
    descriptor: Arc<ResourceDescriptor>,
    driver: Driver,
    display_url: String,
    pool: AnyPool,
}

impl PooledDataSource {
    /// Build the pool described by `descriptor`, to be bound under `name`.
    ///
    /// The pool connects lazily, so this never touches the database. It must be
    /// called from within a Tokio runtime.
    pub fn from_descriptor(
        name: impl Into<String>,
        descriptor: Arc<ResourceDescriptor>,
    ) -> Result<Self, NamingError> {
        let name = name.into();
        let invalid = |reason: String| NamingError::InvalidResource {
            name: name.clone(),
            reason,
        };

        let url = descriptor
            .property(props::URL)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| invalid("missing url".to_string()))?;

        let driver = Driver::from_url(url)
            .ok_or_else(|| invalid(format!("unsupported url scheme in '{}'", url)))?;

        if let Some(declared) = descriptor.property(props::DRIVER_CLASS_NAME) {
            if Driver::from_name(declared) != Some(driver) {
                return Err(invalid(format!(
                    "driver '{}' does not match url scheme '{}'",
                    declared, driver
                )));
            }
        }

        let username = descriptor.property(props::USERNAME).unwrap_or_default();
        let password = descriptor.property(props::PASSWORD).unwrap_or_default();
        let connect_url = driver.connect_url(url, username, password).map_err(invalid)?;

        let max_total = numeric(&descriptor, props::MAX_TOTAL, DEFAULT_MAX_TOTAL).map_err(invalid)?;
        let min_idle = numeric(&descriptor, props::MIN_IDLE, DEFAULT_MIN_IDLE).map_err(invalid)?;
        let max_wait = numeric(&descriptor, props::MAX_WAIT_MILLIS, DEFAULT_MAX_WAIT_MILLIS)
            .map_err(invalid)?;

        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(max_total)
            .min_connections(min_idle)
            .acquire_timeout(Duration::from_millis(max_wait))
            .connect_lazy(&connect_url)
            .map_err(|e| invalid(e.to_string()))?;

        tracing::debug!(
            name = %name,
            driver = %driver,
            max_connections = max_total,
            "Data source pool created"
        );

        Ok(Self {
            display_url: driver.display_url(url),
            name,
            descriptor,
            driver,
            pool,
        })
    }

    /// Full name this data source is bound under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &Arc<ResourceDescriptor> {
        &self.descriptor
    }
}

fn numeric<T: std::str::FromStr>(
    descriptor: &ResourceDescriptor,
    key: &str,
    default: T,
) -> Result<T, String> {
    match descriptor.property(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("property '{}' is not a number: '{}'", key, raw)),
    }
}

#[async_trait]
impl DataSource for PooledDataSource {
    async fn connection(&self) -> Result<PoolConnection<Any>, DataAccessError> {
        self.pool.acquire().await.map_err(|e| {
            tracing::error!(name = %self.name, error = %e, "Failed to acquire connection");
            DataAccessError::Sql(e)
        })
    }
}

impl fmt::Display for PooledDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PooledDataSource[name={}, driverClassName={}, url={}, username={}]",
            self.name,
            self.driver,
            self.display_url,
            self.descriptor.property(props::USERNAME).unwrap_or_default()
        )
    }
}

impl fmt::Debug for PooledDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledDataSource")
            .field("name", &self.name)
            .field("driver", &self.driver)
            .field("url", &self.display_url)
            .finish()
    }
}
