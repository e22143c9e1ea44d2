//! Core types (requests, responses, errors).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============= API Request/Response Types =============

/// Inbound chat request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message.
    pub message: String,
    /// Session identifier; a new one is generated when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Outbound chat response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The formatted answer, including the rendered sources section.
    pub answer: String,
    /// Session identifier (echoed or freshly generated).
    pub session_id: String,
    /// Cited sources, most relevant first.
    pub sources: Vec<SourceRef>,
}

/// A cited source in a chat response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceRef {
    /// Canonical citation URL.
    pub url: String,
    /// Document title, when the passage metadata carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Short excerpt from the cited document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

// ============= Retrieval Types =============

/// A retrieved knowledge-base chunk with its metadata.
///
/// Produced by the retrieval collaborator, immutable once returned and
/// never persisted by this crate; its lifetime is a single request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Passage {
    /// Chunk text content.
    pub content: String,
    /// Raw metadata as stored in the index (source identifiers, document
    /// ID, chunk position markers).
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Passage {
    /// Read a metadata field as a string, if present and non-empty.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
    }
}

// ============= Conversation Types =============

/// A single turn in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationTurn {
    /// Who produced the turn.
    pub role: TurnRole,
    /// Turn text.
    pub content: String,
    /// When the turn was recorded.
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    /// Create a user turn timestamped now.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create an assistant turn timestamped now.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Role of a conversation turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// End-user message.
    User,
    /// Assistant answer.
    Assistant,
}

impl TurnRole {
    /// Wire/storage representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }

    /// Parse the storage representation back into a role.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(TurnRole::User),
            "assistant" => Some(TurnRole::Assistant),
            _ => None,
        }
    }
}

// ============= Model Output Types =============

/// The model's output normalized into answer text plus source lists.
///
/// Mutated only by the orchestrator, to prepend the general-knowledge
/// disclaimer and to override empty `sources`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StructuredAnswer {
    /// Answer body.
    pub answer: String,
    /// Primary source URLs, in citation order.
    #[serde(default)]
    pub sources: Vec<String>,
    /// Secondary source URLs, in citation order.
    #[serde(default)]
    pub secondary_sources: Vec<String>,
}

// ============= Error Types =============

/// Crate-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Retrieval collaborator failure.
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// History store failure.
    #[error("History error: {0}")]
    History(String),

    /// Model endpoint failure (auth, rate limit, timeout, bad payload).
    #[error("LLM error: {0}")]
    Llm(String),

    /// Invalid client input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::Config(msg)
            | AppError::Retrieval(msg)
            | AppError::History(msg)
            | AppError::Llm(msg)
            | AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AppError>;
