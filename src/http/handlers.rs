//! Request handlers.
//!
//! - `GET /compare`: direct registry lookup next to the lazy handle's rendering
//! - `GET /customers`: every row of the `customers` table

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::customers::{self, Customer};
use crate::http::ApiError;
use crate::lifecycle::Application;
use crate::naming::DATA_SOURCE_JNDI_NAME;

/// Body of `GET /compare`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Rendering of a fresh registry lookup.
    pub direct: String,
    /// Rendering of the injected lazy handle.
    #[serde(rename = "dataSource")]
    pub data_source: String,
}

pub async fn compare(State(app): State<Application>) -> Result<Json<Comparison>, ApiError> {
    let direct = app.registry.lookup(DATA_SOURCE_JNDI_NAME)?;
    let data_source = app.data_source.describe()?;

    Ok(Json(Comparison {
        direct: direct.to_string(),
        data_source,
    }))
}

pub async fn list_customers(State(app): State<Application>) -> Result<Json<Vec<Customer>>, ApiError> {
    let customers = customers::find_all(&app.template).await?;
    tracing::debug!(count = customers.len(), "Customers loaded");
    Ok(Json(customers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    use crate::config::test_config;
    use crate::lifecycle::bootstrap;
    use crate::naming::NamingRegistry;

    fn router(app: Application) -> Router {
        Router::new()
            .route("/compare", get(compare))
            .route("/customers", get(list_customers))
            .with_state(app)
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_compare_renders_same_resource() {
        let app = bootstrap(&test_config()).unwrap();
        let (status, body) = get_json(router(app), "/compare").await;

        assert_eq!(status, StatusCode::OK);
        let direct = body["direct"].as_str().unwrap();
        let data_source = body["dataSource"].as_str().unwrap();
        assert!(!direct.is_empty());
        assert_eq!(direct, data_source);
        assert!(direct.contains(DATA_SOURCE_JNDI_NAME));
    }

    #[tokio::test]
    async fn test_compare_without_binding_fails() {
        let app = Application::new(NamingRegistry::builder().build());
        let (status, body) = get_json(router(app), "/compare").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "naming");
    }

    #[tokio::test]
    async fn test_customers_without_binding_is_naming_error() {
        let app = Application::new(NamingRegistry::builder().build());
        let (status, body) = get_json(router(app), "/customers").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "naming");
    }

    #[tokio::test]
    async fn test_customers_missing_table() {
        let app = bootstrap(&test_config()).unwrap();
        let (status, body) = get_json(router(app), "/customers").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "data_access");
    }
}
