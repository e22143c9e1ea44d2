//! Chat-model client abstraction and provider management.

use crate::types::{Result, StructuredAnswer};
use async_trait::async_trait;

/// Raw output of one model invocation, normalized at the transport
/// boundary into a single tagged variant.
///
/// Some transports return schema-constrained structured objects, others
/// plain text; downstream code consumes both uniformly through
/// [`crate::llm::interpret`].
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    /// Free-form text, possibly (but not necessarily) JSON.
    RawText(String),
    /// Output already validated against the answer schema.
    Structured(StructuredAnswer),
}

/// Generic chat-model client trait for provider abstraction.
///
/// All model providers implement this trait, allowing the invocation chain
/// to mix providers freely across tiers.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run one chat completion over `(role, content)` message pairs in
    /// conversation order.
    ///
    /// Implementations own their transport-level retry and timeout; a
    /// returned error means the tier attempt failed for this request.
    async fn chat(&self, messages: &[(String, String)]) -> Result<ModelOutput>;

    /// The model name/identifier this client is bound to.
    fn model_name(&self) -> &str;
}

/// Provider enum for runtime selection.
#[derive(Debug, Clone)]
pub enum Provider {
    /// Mistral "La Plateforme" API.
    Mistral {
        /// API key.
        api_key: String,
        /// API base URL (overridable for tests and proxies).
        api_base: String,
        /// Model identifier, e.g. `mistral-large-latest`.
        model: String,
    },

    /// Ollama local inference server.
    Ollama {
        /// Server base URL, e.g. `http://localhost:11434`.
        base_url: String,
        /// Model identifier, e.g. `mistral`.
        model: String,
    },
}

impl Provider {
    /// Create a client instance for this provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn create_client(&self) -> Result<Box<dyn ChatModel>> {
        match self {
            Provider::Mistral {
                api_key,
                api_base,
                model,
            } => Ok(Box::new(super::mistral::MistralClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
            )?)),

            Provider::Ollama { base_url, model } => Ok(Box::new(
                super::ollama::OllamaClient::new(base_url.clone(), model.clone())?,
            )),
        }
    }

    /// Human-readable provider name.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Mistral { .. } => "Mistral",
            Provider::Ollama { .. } => "Ollama",
        }
    }

    /// The model identifier this provider is bound to.
    pub fn model(&self) -> &str {
        match self {
            Provider::Mistral { model, .. } => model,
            Provider::Ollama { model, .. } => model,
        }
    }
}
