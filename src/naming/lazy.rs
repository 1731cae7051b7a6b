//! Lazily resolved data source.
//!
//! `LazyDataSource` stands in for a registry entry without touching the
//! registry until a connection is first requested. The first successful
//! lookup is cached for the lifetime of the handle; failed lookups are not,
//! so the next use looks again.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use sqlx::pool::PoolConnection;
use sqlx::Any;

use crate::datasource::{DataAccessError, DataSource, PooledDataSource};
use crate::naming::{NamingError, NamingRegistry};

/// Data source that resolves its target from the naming registry on first use.
pub struct LazyDataSource {
    name: String,
    registry: Arc<NamingRegistry>,
    lookup_on_startup: bool,
    target: OnceCell<Arc<PooledDataSource>>,
}

impl LazyDataSource {
    /// Create a handle for `name`. No lookup happens yet.
    pub fn new(registry: Arc<NamingRegistry>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registry,
            lookup_on_startup: false,
            target: OnceCell::new(),
        }
    }

    /// Create a handle and resolve it immediately.
    pub fn resolved(registry: Arc<NamingRegistry>, name: impl Into<String>) -> Result<Self, NamingError> {
        let handle = Self {
            lookup_on_startup: true,
            ..Self::new(registry, name)
        };
        handle.resolve()?;
        Ok(handle)
    }

    /// Name this handle resolves.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lookup_on_startup(&self) -> bool {
        self.lookup_on_startup
    }

    pub fn is_resolved(&self) -> bool {
        self.target.get().is_some()
    }

    /// Resolve the target, looking it up on first call.
    pub fn resolve(&self) -> Result<&Arc<PooledDataSource>, NamingError> {
        self.target.get_or_try_init(|| {
            tracing::debug!(name = %self.name, "Resolving lazy data source");
            self.registry.lookup(&self.name)
        })
    }

    /// Resolve, then render the target.
    pub fn describe(&self) -> Result<String, NamingError> {
        self.resolve().map(|target| target.to_string())
    }
}

#[async_trait]
impl DataSource for LazyDataSource {
    async fn connection(&self) -> Result<PoolConnection<Any>, DataAccessError> {
        let target = self.resolve()?.clone();
        target.connection().await
    }
}

impl fmt::Display for LazyDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target.get() {
            Some(target) => fmt::Display::fmt(target, f),
            None => write!(f, "LazyDataSource[{} (unresolved)]", self.name),
        }
    }
}

impl fmt::Debug for LazyDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyDataSource")
            .field("name", &self.name)
            .field("lookup_on_startup", &self.lookup_on_startup)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
