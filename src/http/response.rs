//! Error responses.
//!
//! # Responsibilities
//! - Map naming and data-access failures to HTTP responses
//! - Log every failure once, at the boundary
//!
//! # Design Decisions
//! - Every failure is a 500; nothing is retried or hidden
//! - Body is JSON: `{"error": <kind>, "message": <text>}`

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::datasource::DataAccessError;
use crate::naming::NamingError;

/// Failure of a request handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Naming(#[from] NamingError),

    #[error(transparent)]
    DataAccess(#[from] DataAccessError),
}

impl ApiError {
    /// Short machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Naming(_) | ApiError::DataAccess(DataAccessError::Naming(_)) => "naming",
            ApiError::DataAccess(_) => "data_access",
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// JSON body of an error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(kind = self.kind(), error = %self, "Request failed");

        let body = ErrorBody {
            error: self.kind().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
