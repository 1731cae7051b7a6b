//! Shared utilities for integration and load testing.

use std::net::SocketAddr;

use jndi_datasource::config::AppConfig;
use jndi_datasource::{bootstrap, Application, HttpServer, Shutdown};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A running server plus the handles a test needs to inspect it.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub app: Application,
    pub shutdown: Shutdown,
    _db_dir: Option<TempDir>,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Configuration pointing at a fresh SQLite file in a temporary directory.
pub fn sqlite_config() -> (AppConfig, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("customers.db");

    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.datasource.url = format!("sqlite://{}?mode=rwc", path.display());
    (config, dir)
}

/// Bootstrap and start a server backed by a temporary SQLite database.
#[allow(dead_code)]
pub async fn start_server() -> TestServer {
    let (config, dir) = sqlite_config();
    let app = bootstrap(&config).unwrap();
    let mut server = start_with(config, app).await;
    server._db_dir = Some(dir);
    server
}

/// Start a server over an already wired application on an ephemeral port.
pub async fn start_with(config: AppConfig, app: Application) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, app.clone());
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer {
        addr,
        app,
        shutdown,
        _db_dir: None,
    }
}

/// Create the `customers` table and insert `rows` in order.
#[allow(dead_code)]
pub async fn seed_customers(app: &Application, rows: &[(i64, &str)]) {
    app.template
        .update("CREATE TABLE customers (id INTEGER PRIMARY KEY, name TEXT NOT NULL)")
        .await
        .unwrap();

    for (id, name) in rows {
        app.template
            .update(&format!(
                "INSERT INTO customers (id, name) VALUES ({}, '{}')",
                id,
                name.replace('\'', "''")
            ))
            .await
            .unwrap();
    }
}
