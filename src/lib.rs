//! # Colbert
//!
//! A retrieval-augmented chatbot server answering questions about French
//! public-administration procedures. Colbert retrieves relevant passages
//! from an externally maintained service-public.fr index, grounds a
//! Mistral model in them, degrades gracefully across model tiers, and
//! returns answers annotated with source citations while preserving
//! per-session conversation history.
//!
//! ## Overview
//!
//! Colbert can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `colbert-server` binary
//! 2. **As a library** - Import the orchestrator into your own project
//!
//! ## Request pipeline
//!
//! ```text
//! retrieve -> resolve/aggregate sources -> assemble context
//!          -> tier fallback chain -> interpret -> format -> persist
//! ```
//!
//! Each request runs the pipeline sequentially in one task; concurrency
//! across sessions is unconstrained. The orchestrator caches nothing
//! across requests: history and passages are re-fetched fresh every time.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use colbert::{
//!     agent::ColbertAgent,
//!     history::LibsqlHistory,
//!     llm::{InvocationChain, Provider},
//!     retrieval::HttpRetriever,
//! };
//! use std::{sync::Arc, time::Duration};
//!
//! let retriever = Arc::new(HttpRetriever::new("http://localhost:8001".into())?);
//! let history = Arc::new(LibsqlHistory::new_memory().await?);
//! let tiers = vec![
//!     Provider::Mistral {
//!         api_key: key.clone(),
//!         api_base: "https://api.mistral.ai".into(),
//!         model: "mistral-large-latest".into(),
//!     }
//!     .create_client()?,
//! ];
//! let chain = InvocationChain::new(tiers, Duration::from_secs(2));
//! let agent = ColbertAgent::new(retriever, history, chain, 10, Duration::from_secs(180));
//!
//! let outcome = agent.ask("Comment obtenir un permis de construire ?", "session-1").await;
//! println!("{}", outcome.answer);
//! ```
//!
//! ## Modules
//!
//! - [`agent`] - session orchestration state machine
//! - [`api`] - REST API handlers and routes
//! - [`llm`] - model clients, tier fallback chain, output interpretation
//! - [`sources`] - citation URL resolution and passage aggregation
//! - [`context`] - prompt context assembly
//! - [`retrieval`] / [`history`] - external collaborator boundaries
//! - [`types`] - common types and error handling

#![warn(missing_docs)]

/// Session orchestration.
pub mod agent;
/// HTTP API handlers and routes.
pub mod api;
/// Process configuration.
pub mod config;
/// Prompt context assembly.
pub mod context;
/// Conversation history store.
pub mod history;
/// LLM clients and the tier fallback chain.
pub mod llm;
/// Prompt texts and fixed user-facing strings.
pub mod prompt;
/// Retrieval collaborator boundary.
pub mod retrieval;
/// Source resolution and aggregation.
pub mod sources;
/// Core types (requests, responses, errors).
pub mod types;

// Re-export commonly used types
pub use agent::{ChatOutcome, ColbertAgent, GENERIC_APOLOGY, MODEL_UNAVAILABLE_APOLOGY};
pub use config::Config;
pub use history::{HistoryStore, LibsqlHistory};
pub use llm::{ChatModel, InvocationChain, ModelOutput, Provider};
pub use retrieval::{HttpRetriever, Retriever};
pub use sources::FALLBACK_ROOT_URL;
pub use types::{AppError, Result};

use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process configuration.
    pub config: Arc<Config>,
    /// Long-lived session orchestrator.
    pub agent: Arc<ColbertAgent>,
}
