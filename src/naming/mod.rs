//! Naming subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     DataSourceConfig
//!         → descriptor.rs (ResourceDescriptor, property resolution)
//!         → registry.rs (bind under java:comp/env/, build PooledDataSource)
//!         → NamingRegistry (frozen, shared via Arc)
//!
//! Request time:
//!     direct lookup:  NamingRegistry::lookup(name)
//!     lazy lookup:    LazyDataSource → NamingRegistry::lookup(name) once, cached
//! ```
//!
//! # Design Decisions
//! - The registry is an explicit value, never ambient global state
//! - Registration happens only through the builder; a built registry is read-only
//! - Lookups match the full name exactly, no normalization

pub mod descriptor;
pub mod lazy;
pub mod registry;

use thiserror::Error;

pub use descriptor::{DescriptorBuilder, ResourceDescriptor};
pub use lazy::LazyDataSource;
pub use registry::{NamingRegistry, RegistryBuilder};

/// Prefix of the component environment every resource is bound under.
pub const COMP_ENV: &str = "java:comp/env/";

/// Resource name of the application data source, relative to [`COMP_ENV`].
pub const DATA_SOURCE_NAME: &str = "jdbc/myDataSource";

/// Full lookup name of the application data source.
pub const DATA_SOURCE_JNDI_NAME: &str = "java:comp/env/jdbc/myDataSource";

/// Declared type of data-source resources.
pub const DATA_SOURCE_TYPE: &str = "sql.DataSource";

/// Errors raised by the naming registry.
#[derive(Debug, Error)]
pub enum NamingError {
    /// Nothing is bound under the requested name.
    #[error("name not found: {name}")]
    NameNotFound { name: String },

    /// A resource is already bound under this name.
    #[error("name already bound: {name}")]
    AlreadyBound { name: String },

    /// No resource factory exists for the declared type.
    #[error("unsupported resource type '{resource_type}' for {name}")]
    UnsupportedType { name: String, resource_type: String },

    /// The descriptor could not be turned into a live resource.
    #[error("invalid resource {name}: {reason}")]
    InvalidResource { name: String, reason: String },
}

/// Join a relative resource name onto the component environment.
pub fn comp_env_name(name: &str) -> String {
    format!("{COMP_ENV}{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_matches_constant() {
        assert_eq!(comp_env_name(DATA_SOURCE_NAME), DATA_SOURCE_JNDI_NAME);
    }
}
