//! LLM provider clients and the tier fallback chain.
//!
//! This module abstracts the model endpoints behind a common trait and
//! implements the orchestration that matters for availability: an ordered
//! list of model tiers tried most-capable-first, with per-tier error
//! isolation and a fixed inter-tier backoff.
//!
//! # Architecture
//!
//! - [`ChatModel`] - the core trait every provider client implements
//! - [`Provider`] - runtime provider/model selection with `create_client`
//! - [`InvocationChain`] - the ordered tier fallback loop
//! - [`interpret`] - normalization of model output into a [`crate::types::StructuredAnswer`]
//!
//! # Tiers
//!
//! A tier is one model binding at a given capability/cost level (e.g.
//! `mistral-large-latest` > `mistral-medium-latest` >
//! `mistral-small-latest`). Tier order is static configuration; it is never
//! reordered by runtime feedback.

/// Core chat-model trait and provider selection.
pub mod client;

/// Ordered tier fallback chain.
pub mod chain;

/// Model output parsing and degradation.
pub mod interpret;

/// Mistral chat-completions client.
pub mod mistral;

/// Ollama local inference client.
pub mod ollama;

pub use chain::{InvocationChain, TierFailure};
pub use client::{ChatModel, ModelOutput, Provider};
pub use interpret::interpret;
