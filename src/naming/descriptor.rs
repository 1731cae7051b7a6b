//! Resource descriptors.
//!
//! A descriptor is the declarative half of a naming entry: a relative name, a
//! declared type, and a bag of string properties. The registry turns it into a
//! live resource when it is bound.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::DataSourceConfig;
use crate::naming::{DATA_SOURCE_NAME, DATA_SOURCE_TYPE};

/// Property keys understood by the data-source factory.
pub mod props {
    pub const DRIVER_CLASS_NAME: &str = "driverClassName";
    pub const URL: &str = "url";
    pub const USERNAME: &str = "username";
    pub const PASSWORD: &str = "password";
    pub const MAX_TOTAL: &str = "maxTotal";
    pub const MIN_IDLE: &str = "minIdle";
    pub const MAX_WAIT_MILLIS: &str = "maxWaitMillis";
}

/// Declarative description of a named resource.
#[derive(Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    name: String,
    resource_type: String,
    properties: BTreeMap<String, String>,
}

impl ResourceDescriptor {
    /// Start a descriptor with the given relative name and declared type.
    pub fn builder(name: impl Into<String>, resource_type: impl Into<String>) -> DescriptorBuilder {
        DescriptorBuilder {
            name: name.into(),
            resource_type: resource_type.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Describe the application data source from resolved configuration.
    pub fn data_source(config: &DataSourceConfig) -> Self {
        let driver = config.determine_driver();

        let mut builder = Self::builder(DATA_SOURCE_NAME, DATA_SOURCE_TYPE)
            .property(props::URL, config.determine_url())
            .property(props::USERNAME, &config.username)
            .property(props::PASSWORD, &config.password)
            .property(props::MAX_TOTAL, config.max_connections.to_string())
            .property(props::MIN_IDLE, config.min_connections.to_string())
            .property(
                props::MAX_WAIT_MILLIS,
                config.acquire_timeout_secs.saturating_mul(1000).to_string(),
            );

        if let Some(driver) = driver {
            builder = builder.property(props::DRIVER_CLASS_NAME, driver.name());
        }

        builder.build()
    }

    /// Name relative to the component environment.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Look up a single property.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// All properties in key order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Debug for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted: BTreeMap<&str, &str> = self
            .properties()
            .map(|(k, v)| if k == props::PASSWORD { (k, "[REDACTED]") } else { (k, v) })
            .collect();

        f.debug_struct("ResourceDescriptor")
            .field("name", &self.name)
            .field("resource_type", &self.resource_type)
            .field("properties", &redacted)
            .finish()
    }
}

/// Builder for [`ResourceDescriptor`].
#[derive(Debug)]
pub struct DescriptorBuilder {
    name: String,
    resource_type: String,
    properties: BTreeMap<String, String>,
}

impl DescriptorBuilder {
    /// Set a property, replacing any previous value.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> ResourceDescriptor {
        ResourceDescriptor {
            name: self.name,
            resource_type: self.resource_type,
            properties: self.properties,
        }
    }
}
