//! Mistral chat-completions client.
//!
//! Talks to the Mistral "La Plateforme" `/v1/chat/completions` endpoint
//! with JSON-object response formatting. The client owns its transport
//! retry: rate-limit and server errors are retried a bounded number of
//! times with a short growing delay; auth and payload errors are not.

use crate::llm::client::{ChatModel, ModelOutput};
use crate::types::{AppError, Result, StructuredAnswer};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_RETRIES: u32 = 2;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Client for the Mistral chat-completions API.
pub struct MistralClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl MistralClient {
    /// Create a new client bound to one model.
    pub fn new(api_key: String, api_base: String, model: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| AppError::Llm(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            model,
            temperature: 0.7,
        })
    }

    async fn send(&self, body: &ChatCompletionRequest<'_>) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.api_base);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let result = self
                .http
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(body)
                .send()
                .await;

            let retryable_error = match result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let parsed: ChatCompletionResponse = response
                            .json()
                            .await
                            .map_err(|e| {
                                AppError::Llm(format!("Mistral response decode error: {}", e))
                            })?;
                        let content = parsed
                            .choices
                            .into_iter()
                            .next()
                            .map(|c| c.message.content)
                            .ok_or_else(|| {
                                AppError::Llm("Mistral returned no choices".to_string())
                            })?;
                        return Ok(content);
                    }

                    let detail = response.text().await.unwrap_or_default();
                    let error = AppError::Llm(format!(
                        "Mistral API error ({}, model {}): {}",
                        status, self.model, detail
                    ));
                    // Only rate limits and server-side failures are worth retrying
                    if status.as_u16() == 429 || status.is_server_error() {
                        error
                    } else {
                        return Err(error);
                    }
                }
                Err(e) => AppError::Llm(format!("Mistral request error: {}", e)),
            };

            if attempt > MAX_RETRIES {
                return Err(retryable_error);
            }
            tracing::debug!(
                model = %self.model,
                attempt,
                error = %retryable_error,
                "retrying Mistral request"
            );
            tokio::time::sleep(RETRY_DELAY * attempt).await;
        }
    }
}

#[async_trait]
impl ChatModel for MistralClient {
    async fn chat(&self, messages: &[(String, String)]) -> Result<ModelOutput> {
        let wire_messages: Vec<WireMessage<'_>> = messages
            .iter()
            .map(|(role, content)| WireMessage {
                role: role.as_str(),
                content: content.as_str(),
            })
            .collect();

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: wire_messages,
            temperature: self.temperature,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let content = self.send(&body).await?;

        // JSON mode constrains the output shape; when it validates against
        // the answer schema, hand the structured form downstream directly.
        match serde_json::from_str::<StructuredAnswer>(&content) {
            Ok(structured) if !structured.answer.is_empty() => {
                Ok(ModelOutput::Structured(structured))
            }
            _ => Ok(ModelOutput::RawText(content)),
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
