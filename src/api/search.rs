//! HTTP handlers for search, soft delete and health

use axum::{
    extract::{Path, Query, State},
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::state::AppState;
use streets_backend::error::ApiError;
use streets_backend::search::SearchOutcome;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Raw query string; validated by the service
    pub q: Option<String>,
    /// Raw mode token; anything unrecognized becomes "free"
    pub mode: Option<String>,
}

/// GET /api/search?q=...&mode=...
///
/// Response: `{hits: [{_id, _source}], total, mode}` where `mode` is the
/// effective mode after default coercion.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchOutcome>, ApiError> {
    let outcome = state
        .search
        .search(params.q.as_deref(), params.mode.as_deref())
        .await?;
    Ok(Json(outcome))
}

/// POST /api/delete/:id
///
/// Marks the record as deleted; it is excluded from searches as soon as
/// this returns.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state.search.soft_delete(Some(&id)).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Document marked as deleted",
        "id": id
    })))
}

/// GET /health
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = Utc::now().to_rfc3339();
    if state.search.ping().await {
        (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": "Server is running",
                "elasticsearch": "connected",
                "timestamp": timestamp
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "error",
                "message": "Server is running but Elasticsearch is unavailable",
                "elasticsearch": "disconnected",
                "timestamp": timestamp
            })),
        )
    }
}

/// Fallback for unknown routes
pub async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "message": format!("Route {} {} not found", method, uri.path())
        })),
    )
}
