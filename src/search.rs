//! Search service - validation, query building, execution, result mapping
//!
//! One struct, two entry points:
//! - `search`: validate -> coerce mode -> build query -> execute -> map hits
//! - `soft_delete`: validate id -> tombstone update with forced refresh
//!
//! The backend client is injected; the service itself is stateless and every
//! call is an independent round trip.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::backend::{normalize_total, SearchBackend};
use crate::error::ApiError;
use crate::fields;
use crate::query::{build_search_query, SearchMode};
use crate::validation::{validate_document_id, validate_search_query};

/// Hard cap on hits per search. Not a page size; there is no cursor.
pub const MAX_RESULTS: usize = 100;

/// One mapped hit: backend id plus the returned field subset.
#[derive(Debug, Serialize)]
pub struct SearchHit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_source")]
    pub fields: Map<String, Value>,
}

/// Search outcome handed to the HTTP layer. `mode` is the effective mode
/// after default coercion, not the raw input.
#[derive(Debug, Serialize)]
pub struct SearchOutcome {
    pub hits: Vec<SearchHit>,
    pub total: u64,
    pub mode: &'static str,
}

pub struct SearchService {
    backend: Arc<dyn SearchBackend>,
}

impl SearchService {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    /// Run a search for the raw query/mode pair from the wire.
    pub async fn search(
        &self,
        raw_query: Option<&str>,
        raw_mode: Option<&str>,
    ) -> Result<SearchOutcome, ApiError> {
        let query = validate_search_query(raw_query)?;
        let mode = SearchMode::from_param(raw_mode);

        tracing::debug!("search: mode={} query={:?}", mode.as_str(), query);

        let body = json!({
            "query": build_search_query(&query, mode),
            "_source": fields::RESULT_FIELDS,
            "size": MAX_RESULTS
        });

        let response = self.backend.search(body).await?;

        let total = normalize_total(response.hits.total);
        let hits: Vec<SearchHit> = response
            .hits
            .hits
            .into_iter()
            .take(MAX_RESULTS)
            .map(|hit| SearchHit {
                id: hit.id,
                fields: map_source(hit.source),
            })
            .collect();

        Ok(SearchOutcome {
            hits,
            total,
            mode: mode.as_str(),
        })
    }

    /// Soft-delete one record. Re-deleting an already-deleted record just
    /// reapplies the flag and reports success.
    pub async fn soft_delete(&self, raw_id: Option<&str>) -> Result<String, ApiError> {
        let id = validate_document_id(raw_id)?;

        self.backend.mark_deleted(&id).await?;
        tracing::info!("document {} marked as deleted", id);

        Ok(id)
    }

    pub async fn ping(&self) -> bool {
        self.backend.ping().await
    }
}

/// Restrict a raw `_source` to the returned field set. The backend is asked
/// for that subset already, but the mapper enforces it even for a backend
/// that sends extra fields back.
fn map_source(source: Map<String, Value>) -> Map<String, Value> {
    source
        .into_iter()
        .filter(|(key, _)| fields::RESULT_FIELDS.contains(&key.as_str()))
        .collect()
}
