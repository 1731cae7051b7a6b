//! Data-source capability.
//!
//! # Responsibilities
//! - Define the `DataSource` contract (hand out live connections)
//! - Map connection URLs to supported drivers
//! - Classify data-access failures
//!
//! # Design Decisions
//! - One pool type for every driver (`sqlx::Any`), chosen by URL scheme
//! - Pools connect lazily; nothing touches the database before first use

pub mod pool;

use std::fmt;

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::Any;
use thiserror::Error;
use url::Url;

use crate::naming::NamingError;

pub use pool::PooledDataSource;

/// Anything that can hand out a live database connection.
#[async_trait]
pub trait DataSource: Send + Sync + fmt::Display {
    /// Acquire a connection.
    async fn connection(&self) -> Result<PoolConnection<Any>, DataAccessError>;
}

/// Errors raised while talking to the database.
#[derive(Debug, Error)]
pub enum DataAccessError {
    /// The data source could not be resolved from the naming registry.
    #[error("data source unavailable: {0}")]
    Naming(#[from] NamingError),

    /// Connection or statement failure reported by the driver.
    #[error("sql error: {0}")]
    Sql(#[from] sqlx::Error),

    /// A column could not be read into the requested type.
    #[error("failed to map column '{column}': {source}")]
    Mapping {
        column: String,
        #[source]
        source: sqlx::Error,
    },
}

/// Database drivers this service can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Postgres,
    Sqlite,
}

impl Driver {
    /// Pick the driver from the URL scheme.
    pub fn from_url(url: &str) -> Option<Self> {
        let scheme = url.split(':').next()?;
        match scheme {
            "postgres" | "postgresql" => Some(Driver::Postgres),
            "sqlite" => Some(Driver::Sqlite),
            _ => None,
        }
    }

    /// Parse a driver name as written in configuration.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Some(Driver::Postgres),
            "sqlite" => Some(Driver::Sqlite),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Driver::Postgres => "postgres",
            Driver::Sqlite => "sqlite",
        }
    }

    /// Build the URL handed to the pool, folding in credentials.
    ///
    /// Non-empty credentials replace any embedded in the URL. SQLite has no
    /// notion of users, so its URL passes through untouched.
    pub fn connect_url(&self, url: &str, username: &str, password: &str) -> Result<String, String> {
        match self {
            Driver::Sqlite => Ok(url.to_string()),
            Driver::Postgres => {
                let mut parsed = Url::parse(url).map_err(|e| e.to_string())?;
                if !username.is_empty() {
                    parsed
                        .set_username(username)
                        .map_err(|_| "url cannot carry a username".to_string())?;
                }
                if !password.is_empty() {
                    parsed
                        .set_password(Some(password))
                        .map_err(|_| "url cannot carry a password".to_string())?;
                }
                Ok(parsed.into())
            }
        }
    }

    /// Render a URL with any embedded password removed.
    pub fn display_url(&self, url: &str) -> String {
        match self {
            Driver::Sqlite => url.to_string(),
            Driver::Postgres => match Url::parse(url) {
                Ok(mut parsed) => {
                    let _ = parsed.set_password(None);
                    parsed.into()
                }
                Err(_) => url.to_string(),
            },
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
