//! Failure injection tests: every failure surfaces as a request-level error.

use jndi_datasource::http::response::ErrorBody;
use jndi_datasource::naming::NamingRegistry;
use jndi_datasource::{bootstrap, Application};

mod common;

#[tokio::test]
async fn test_missing_table_is_data_access_error() {
    let server = common::start_server().await;

    let res = reqwest::get(server.url("/customers")).await.unwrap();
    assert_eq!(res.status(), 500);

    let body: ErrorBody = res.json().await.unwrap();
    assert_eq!(body.error, "data_access");
}

#[tokio::test]
async fn test_unbound_name_is_naming_error() {
    let (config, _dir) = common::sqlite_config();
    let app = Application::new(NamingRegistry::builder().build());
    let server = common::start_with(config, app).await;

    for path in ["/compare", "/customers"] {
        let res = reqwest::get(server.url(path)).await.unwrap();
        assert_eq!(res.status(), 500, "{path}");

        let body: ErrorBody = res.json().await.unwrap();
        assert_eq!(body.error, "naming", "{path}");
        assert!(body.message.contains("java:comp/env/jdbc/myDataSource"));
    }

    // Nothing was cached by the failed lookups
    assert!(!server.app.data_source.is_resolved());
}

#[tokio::test]
async fn test_unreachable_database() {
    let (mut config, _dir) = common::sqlite_config();
    // Nothing listens on port 1
    config.datasource.url = "postgres://127.0.0.1:1/app".into();
    config.datasource.acquire_timeout_secs = 1;

    let app = bootstrap(&config).unwrap();
    let server = common::start_with(config, app).await;

    // /compare never connects, so it still works
    let res = reqwest::get(server.url("/compare")).await.unwrap();
    assert_eq!(res.status(), 200);

    let res = reqwest::get(server.url("/customers")).await.unwrap();
    assert_eq!(res.status(), 500);
    let body: ErrorBody = res.json().await.unwrap();
    assert_eq!(body.error, "data_access");
}
