//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, environment overrides)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → read once during bootstrap
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AppConfig;
pub use schema::DataSourceConfig;
pub use schema::ListenerConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;

/// In-memory SQLite config for unit tests. One pooled connection, so every
/// statement sees the same database.
#[cfg(test)]
pub(crate) fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.datasource.url = "sqlite::memory:".to_string();
    config.datasource.max_connections = 1;
    config
}
