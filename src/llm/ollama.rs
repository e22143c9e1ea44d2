//! Ollama local inference client.
//!
//! Minimal non-streaming client for the Ollama `/api/chat` endpoint, used
//! as the optional last local tier of the fallback chain.

use crate::llm::client::{ChatModel, ModelOutput};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for a local Ollama server.
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct OllamaMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: OllamaResponseMessage,
}

#[derive(Deserialize)]
struct OllamaResponseMessage {
    content: String,
}

impl OllamaClient {
    /// Create a new client bound to one local model.
    pub fn new(base_url: String, model: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| AppError::Llm(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }
}

#[async_trait]
impl ChatModel for OllamaClient {
    async fn chat(&self, messages: &[(String, String)]) -> Result<ModelOutput> {
        let wire_messages: Vec<OllamaMessage<'_>> = messages
            .iter()
            .map(|(role, content)| OllamaMessage {
                role: role.as_str(),
                content: content.as_str(),
            })
            .collect();

        let body = OllamaChatRequest {
            model: &self.model,
            messages: wire_messages,
            stream: false,
        };

        let response = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Llm(format!("Ollama request error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::Llm(format!(
                "Ollama API error ({}, model {}): {}",
                status, self.model, detail
            )));
        }

        let parsed: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Llm(format!("Ollama response decode error: {}", e)))?;

        // Local models are not schema-constrained; interpretation decides
        // whether the text parses as a structured answer.
        Ok(ModelOutput::RawText(parsed.message.content))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
