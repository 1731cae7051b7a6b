//! Naming registry.
//!
//! # Responsibilities
//! - Bind resource descriptors under the component environment
//! - Turn each descriptor into its live resource through the matching factory
//! - Serve exact-name lookups at request time
//!
//! # Design Decisions
//! - Binding is only possible through `RegistryBuilder`; `build()` freezes it
//! - A frozen registry needs no locking, lookups are plain map reads
//! - The same `Arc` is handed out on every lookup of a name

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::datasource::PooledDataSource;
use crate::naming::{comp_env_name, NamingError, ResourceDescriptor, DATA_SOURCE_TYPE};
use crate::observability::metrics;

/// Read-only directory of named resources.
#[derive(Debug)]
pub struct NamingRegistry {
    bindings: HashMap<String, Arc<PooledDataSource>>,
    lookups: AtomicU64,
}

impl NamingRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Look up a resource by its full name.
    pub fn lookup(&self, name: &str) -> Result<Arc<PooledDataSource>, NamingError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);

        match self.bindings.get(name) {
            Some(resource) => {
                tracing::debug!(name = %name, "Naming lookup resolved");
                metrics::record_lookup(name, "found");
                Ok(resource.clone())
            }
            None => {
                tracing::warn!(name = %name, "Naming lookup failed");
                metrics::record_lookup(name, "not_found");
                Err(NamingError::NameNotFound {
                    name: name.to_string(),
                })
            }
        }
    }

    /// Check whether anything is bound under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Bound names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// Number of lookups served so far, successful or not.
    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }
}

/// Collects bindings before the registry is frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    bindings: HashMap<String, Arc<PooledDataSource>>,
}

impl RegistryBuilder {
    /// Bind a descriptor under `java:comp/env/<descriptor name>`.
    pub fn bind(mut self, descriptor: ResourceDescriptor) -> Result<Self, NamingError> {
        let name = comp_env_name(descriptor.name());

        if self.bindings.contains_key(&name) {
            return Err(NamingError::AlreadyBound { name });
        }

        let descriptor = Arc::new(descriptor);
        let resource = match descriptor.resource_type() {
            DATA_SOURCE_TYPE => PooledDataSource::from_descriptor(name.clone(), descriptor.clone())?,
            other => {
                return Err(NamingError::UnsupportedType {
                    name,
                    resource_type: other.to_string(),
                })
            }
        };

        tracing::info!(
            name = %name,
            resource_type = %descriptor.resource_type(),
            "Resource bound"
        );

        self.bindings.insert(name, Arc::new(resource));
        Ok(self)
    }

    /// Freeze the bindings into a shareable registry.
    pub fn build(self) -> Arc<NamingRegistry> {
        Arc::new(NamingRegistry {
            bindings: self.bindings,
            lookups: AtomicU64::new(0),
        })
    }
}
