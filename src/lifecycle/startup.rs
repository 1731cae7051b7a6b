//! Startup orchestration.
//!
//! # Responsibilities
//! - Describe the data source from configuration and bind it in the registry
//! - Build the lazy data-source handle and the query template over it
//! - Hand the wired application to the HTTP server
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Registration completes before the listener is bound, so request handlers
//!   only ever see a frozen registry
//! - The lazy handle performs no lookup here

use std::sync::Arc;

use thiserror::Error;

use crate::config::{AppConfig, ConfigError};
use crate::naming::{LazyDataSource, NamingError, NamingRegistry, ResourceDescriptor, DATA_SOURCE_JNDI_NAME};
use crate::query::QueryTemplate;

/// Errors that stop the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("naming registration failed: {0}")]
    Naming(#[from] NamingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid address: {0}")]
    Address(#[from] std::net::AddrParseError),

    #[error("metrics exporter failed: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Everything request handlers need, wired once at startup.
#[derive(Debug, Clone)]
pub struct Application {
    /// Frozen naming registry for direct lookups.
    pub registry: Arc<NamingRegistry>,
    /// Lazy handle onto the bound data source.
    pub data_source: Arc<LazyDataSource>,
    /// Query helper over `data_source`.
    pub template: QueryTemplate,
}

impl Application {
    /// Wire handlers over an already populated registry.
    pub fn new(registry: Arc<NamingRegistry>) -> Self {
        let data_source = Arc::new(LazyDataSource::new(registry.clone(), DATA_SOURCE_JNDI_NAME));
        let template = QueryTemplate::new(data_source.clone());

        Self {
            registry,
            data_source,
            template,
        }
    }
}

/// Register the data source and wire the application.
///
/// Must run inside a Tokio runtime; the data-source pool is created (but not
/// connected) here.
pub fn bootstrap(config: &AppConfig) -> Result<Application, StartupError> {
    let descriptor = ResourceDescriptor::data_source(&config.datasource);
    tracing::info!(
        name = %descriptor.name(),
        url = %config.datasource.determine_url(),
        "Registering data source"
    );

    let registry = NamingRegistry::builder().bind(descriptor)?.build();
    Ok(Application::new(registry))
}
