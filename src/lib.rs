//! Named data-source service library.
//!
//! Binds a pooled database resource in a naming registry at startup and serves
//! it over HTTP, both through direct lookups and through a lazily resolving
//! handle.

pub mod config;
pub mod customers;
pub mod datasource;
pub mod http;
pub mod lifecycle;
pub mod naming;
pub mod observability;
pub mod query;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::{bootstrap, Application, Shutdown};
