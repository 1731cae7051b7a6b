//! Named data-source service (v1)
//!
//! An HTTP service built with Tokio, Axum and sqlx that exposes a database
//! connection pool through a naming registry.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────────┐
//!                      │                 STARTUP (once)                        │
//!                      │                                                       │
//!     config.toml ─────┼─▶ config ──▶ ResourceDescriptor ──▶ NamingRegistry    │
//!     + env            │                 (jdbc/myDataSource)   (frozen, Arc)   │
//!                      │                                           │           │
//!                      │                         LazyDataSource ◀──┘           │
//!                      │                         (no lookup yet)               │
//!                      └──────────────────────────────┬───────────────────────┘
//!                                                     │
//!     Client Request                                  ▼
//!     ──────────────▶ request id ─▶ trace ─▶ timeout ─▶ handlers
//!                                                   │
//!                    GET /compare ──────────────────┼─▶ registry.lookup()
//!                                                   │   + lazy handle rendering
//!                    GET /customers ────────────────┴─▶ QueryTemplate
//!                                                       └─▶ LazyDataSource
//!                                                           └─▶ sqlx pool ─▶ Database
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use jndi_datasource::config::load_config;
use jndi_datasource::lifecycle::{bootstrap, signals, Shutdown, StartupError};
use jndi_datasource::observability::{logging, metrics};
use jndi_datasource::HttpServer;

#[derive(Parser)]
#[command(name = "jndi-datasource")]
#[command(about = "Serve a named data source over HTTP", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let cli = Cli::parse();

    // Load configuration before logging so the configured level applies
    let config = load_config(cli.config.as_deref())?;
    logging::init(&config.observability);

    tracing::info!("jndi-datasource v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        datasource = ?config.datasource,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    // Register naming resources before accepting any traffic
    let app = bootstrap(&config)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config, app);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
