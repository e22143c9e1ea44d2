//! Retrieval collaborator boundary.
//!
//! The vector index lives in an external service (the offline ingestion
//! pipeline populates it from the service-public.fr XML dump); this crate
//! only speaks to it through the [`Retriever`] trait. Embedding
//! computation, chunking and index persistence are properties of that
//! collaborator, not of this crate.

use crate::types::{AppError, Passage, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Abstract trait for the retrieval collaborator.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Return the top-`k` passages for `query`, ranked most-to-least
    /// relevant.
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Passage>>;
}

/// HTTP client for the retrieval sidecar service.
pub struct HttpRetriever {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct SearchRequestBody<'a> {
    query: &'a str,
    k: usize,
}

#[derive(Deserialize)]
struct SearchResponseBody {
    passages: Vec<Passage>,
}

impl HttpRetriever {
    /// Create a client for the sidecar at `base_url`.
    pub fn new(base_url: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| AppError::Retrieval(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Retriever for HttpRetriever {
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Passage>> {
        let body = SearchRequestBody { query, k };

        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Retrieval(format!("Retrieval request error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::Retrieval(format!(
                "Retrieval service error ({}): {}",
                status, detail
            )));
        }

        let parsed: SearchResponseBody = response
            .json()
            .await
            .map_err(|e| AppError::Retrieval(format!("Retrieval response decode error: {}", e)))?;

        Ok(parsed.passages)
    }
}
