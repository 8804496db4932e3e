//! Elasticsearch client - the only piece that talks to the search backend
//!
//! The rest of the service goes through the [`SearchBackend`] trait so the
//! executor can be exercised against a test double. The real client wraps a
//! single shared `reqwest::Client` created at process start.

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::ApiError;
use crate::fields;

/// Raw search response as Elasticsearch returns it.
#[derive(Debug, Deserialize)]
pub struct EsSearchResponse {
    pub hits: EsHits,
}

#[derive(Debug, Default, Deserialize)]
pub struct EsHits {
    /// May be a bare integer (older servers), an object with a nested
    /// `value`, or absent entirely.
    #[serde(default)]
    pub total: Option<TotalCount>,
    #[serde(default)]
    pub hits: Vec<EsHit>,
}

#[derive(Debug, Deserialize)]
pub struct EsHit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_source", default)]
    pub source: Map<String, Value>,
}

/// The two wire shapes of `hits.total`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum TotalCount {
    Bare(u64),
    Nested { value: u64 },
}

impl TotalCount {
    pub fn value(self) -> u64 {
        match self {
            TotalCount::Bare(n) => n,
            TotalCount::Nested { value } => value,
        }
    }
}

/// Normalize the optional total to a single unsigned count; absent means 0.
pub fn normalize_total(total: Option<TotalCount>) -> u64 {
    total.map(TotalCount::value).unwrap_or(0)
}

/// Backend seam used by the search service.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run a `_search` request with the given request body.
    async fn search(&self, body: Value) -> Result<EsSearchResponse, ApiError>;

    /// Set the tombstone flag on one document. The update must be visible
    /// to searches before this returns.
    async fn mark_deleted(&self, id: &str) -> Result<(), ApiError>;

    /// Backend liveness check for the health endpoint.
    async fn ping(&self) -> bool;
}

/// HTTP client for a single Elasticsearch index.
pub struct EsClient {
    http: Client,
    base_url: String,
    index: String,
}

impl EsClient {
    pub fn new(http: Client, base_url: &str, index: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            index: index.to_string(),
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }
}

#[async_trait]
impl SearchBackend for EsClient {
    async fn search(&self, body: Value) -> Result<EsSearchResponse, ApiError> {
        let url = format!("{}/{}/_search", self.base_url, self.index);

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::backend)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ApiError::backend(anyhow!(
                "search request failed with {}: {}",
                status,
                detail
            )));
        }

        response.json().await.map_err(ApiError::backend)
    }

    async fn mark_deleted(&self, id: &str) -> Result<(), ApiError> {
        // refresh=true forces the update to be visible to the next search
        let url = format!("{}/{}/_update/{}?refresh=true", self.base_url, self.index, id);
        let body = json!({ "doc": { (fields::DELETED): true } });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::backend)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::not_found("Document not found"));
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ApiError::backend(anyhow!(
                "update request failed with {}: {}",
                status,
                detail
            )));
        }

        Ok(())
    }

    async fn ping(&self) -> bool {
        match self.http.get(&self.base_url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!("elasticsearch ping failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_count_bare_integer() {
        let hits: EsHits = serde_json::from_value(json!({ "total": 42, "hits": [] })).unwrap();
        assert_eq!(normalize_total(hits.total), 42);
    }

    #[test]
    fn test_total_count_nested_object() {
        let hits: EsHits = serde_json::from_value(json!({
            "total": { "value": 7, "relation": "eq" },
            "hits": []
        }))
        .unwrap();
        assert_eq!(normalize_total(hits.total), 7);
    }

    #[test]
    fn test_total_count_missing_is_zero() {
        let hits: EsHits = serde_json::from_value(json!({ "hits": [] })).unwrap();
        assert_eq!(normalize_total(hits.total), 0);
    }

    #[test]
    fn test_hit_parsing() {
        let response: EsSearchResponse = serde_json::from_value(json!({
            "hits": {
                "total": { "value": 1 },
                "hits": [
                    { "_id": "abc-1", "_source": { (fields::MAIN_NAME): "הרצל" } }
                ]
            }
        }))
        .unwrap();
        assert_eq!(response.hits.hits.len(), 1);
        assert_eq!(response.hits.hits[0].id, "abc-1");
        assert_eq!(response.hits.hits[0].source[fields::MAIN_NAME], "הרצל");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = EsClient::new(Client::new(), "http://localhost:9200/", "street-names");
        assert_eq!(client.base_url, "http://localhost:9200");
        assert_eq!(client.index(), "street-names");
    }
}
