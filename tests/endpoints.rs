//! End-to-end tests for the HTTP endpoints.

use jndi_datasource::customers::Customer;
use jndi_datasource::http::handlers::Comparison;
use jndi_datasource::http::X_REQUEST_ID;
use jndi_datasource::naming::DATA_SOURCE_JNDI_NAME;

mod common;

#[tokio::test]
async fn test_compare_paths_agree() {
    let server = common::start_server().await;

    let res = reqwest::get(server.url("/compare")).await.expect("server unreachable");
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key(X_REQUEST_ID));

    let body: Comparison = res.json().await.unwrap();
    assert!(!body.direct.is_empty());
    assert!(!body.data_source.is_empty());
    assert_eq!(body.direct, body.data_source);
    assert!(body.direct.contains(DATA_SOURCE_JNDI_NAME));
    assert!(body.direct.contains("driverClassName=sqlite"));
}

#[tokio::test]
async fn test_compare_json_field_names() {
    let server = common::start_server().await;

    let body: serde_json::Value = reqwest::get(server.url("/compare"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert!(object["direct"].is_string());
    assert!(object["dataSource"].is_string());
}

#[tokio::test]
async fn test_customers_empty_table() {
    let server = common::start_server().await;
    common::seed_customers(&server.app, &[]).await;

    let res = reqwest::get(server.url("/customers")).await.unwrap();
    assert_eq!(res.status(), 200);

    let customers: Vec<Customer> = res.json().await.unwrap();
    assert!(customers.is_empty());
}

#[tokio::test]
async fn test_customers_rows() {
    let server = common::start_server().await;
    common::seed_customers(&server.app, &[(1, "Alice"), (2, "Bob")]).await;

    let customers: Vec<Customer> = reqwest::get(server.url("/customers"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        customers,
        vec![
            Customer { id: 1, name: "Alice".into() },
            Customer { id: 2, name: "Bob".into() },
        ]
    );
}

#[tokio::test]
async fn test_customers_json_shape() {
    let server = common::start_server().await;
    common::seed_customers(&server.app, &[(7, "O'Brien")]).await;

    let body: serde_json::Value = reqwest::get(server.url("/customers"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, serde_json::json!([{ "id": 7, "name": "O'Brien" }]));
}
