//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, pool sizes consistent)
//! - Check the data source URL and driver agree
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::datasource::Driver;

/// Longest a request may wait for a pooled connection.
pub const MAX_ACQUIRE_TIMEOUT_SECS: u64 = 3600;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("datasource.min_connections ({min}) exceeds datasource.max_connections ({max})")]
    PoolBounds { min: u32, max: u32 },

    #[error("{field}: must not exceed {max}")]
    TooLarge { field: &'static str, max: u64 },

    #[error("datasource.url: must be set")]
    MissingUrl,

    #[error("datasource.url: unsupported scheme in '{0}'")]
    UnsupportedUrl(String),

    #[error("datasource.driver: unknown driver '{0}'")]
    UnknownDriver(String),

    #[error("datasource.driver: '{driver}' does not match url scheme '{scheme}'")]
    DriverMismatch { driver: String, scheme: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::NotPositive {
            field: "timeouts.request_secs",
        });
    }

    let ds = &config.datasource;
    if ds.max_connections == 0 {
        errors.push(ValidationError::NotPositive {
            field: "datasource.max_connections",
        });
    } else if ds.min_connections > ds.max_connections {
        errors.push(ValidationError::PoolBounds {
            min: ds.min_connections,
            max: ds.max_connections,
        });
    }

    if ds.acquire_timeout_secs == 0 {
        errors.push(ValidationError::NotPositive {
            field: "datasource.acquire_timeout_secs",
        });
    } else if ds.acquire_timeout_secs > MAX_ACQUIRE_TIMEOUT_SECS {
        errors.push(ValidationError::TooLarge {
            field: "datasource.acquire_timeout_secs",
            max: MAX_ACQUIRE_TIMEOUT_SECS,
        });
    }

    let url = ds.determine_url();
    match (Driver::from_url(url), ds.driver.trim()) {
        _ if url.is_empty() => errors.push(ValidationError::MissingUrl),
        (None, _) => errors.push(ValidationError::UnsupportedUrl(url.to_string())),
        (Some(_), "") => {}
        (Some(from_url), declared) => match Driver::from_name(declared) {
            None => errors.push(ValidationError::UnknownDriver(declared.to_string())),
            Some(driver) if driver != from_url => errors.push(ValidationError::DriverMismatch {
                driver: declared.to_string(),
                scheme: from_url.name().to_string(),
            }),
            Some(_) => {}
        },
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
