//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Environment variables that override file settings.
pub const ENV_DATASOURCE_URL: &str = "DATASOURCE_URL";
pub const ENV_DATASOURCE_USERNAME: &str = "DATASOURCE_USERNAME";
pub const ENV_DATASOURCE_PASSWORD: &str = "DATASOURCE_PASSWORD";
pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";

/// Load configuration from an optional TOML file plus the process environment,
/// then validate it.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => AppConfig::default(),
    };

    apply_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse configuration text without validating it.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Apply overrides from `lookup` (normally the process environment).
pub fn apply_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_DATASOURCE_URL) {
        config.datasource.url = url;
    }
    if let Some(username) = lookup(ENV_DATASOURCE_USERNAME) {
        config.datasource.username = username;
    }
    if let Some(password) = lookup(ENV_DATASOURCE_PASSWORD) {
        config.datasource.password = password;
    }
    if let Some(addr) = lookup(ENV_BIND_ADDRESS) {
        config.listener.bind_address = addr;
    }
}
