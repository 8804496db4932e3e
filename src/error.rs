//! Error taxonomy shared by the search and delete paths
//!
//! Three kinds, each with a fixed HTTP mapping:
//! - `InvalidInput` -> 400, message returned as-is
//! - `NotFound` -> 404
//! - `Backend` -> 500, original error logged but never leaked to the caller

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Search service error")]
    Backend(#[source] anyhow::Error),
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn backend(source: impl Into<anyhow::Error>) -> Self {
        ApiError::Backend(source.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ApiError::InvalidInput(msg) | ApiError::NotFound(msg) => msg.clone(),
            ApiError::Backend(source) => {
                // diagnostics stay server-side
                tracing::error!("search backend error: {:#}", source);
                "Search service error".to_string()
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
