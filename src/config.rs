//! Process configuration.
//!
//! One explicit [`Config`] struct built once at startup and passed down by
//! value; nothing reads the environment after boot. Missing required
//! variables fail fast with an error naming the variable.

use crate::types::{AppError, Result};
use std::env;

/// Full process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server binding.
    pub server: ServerConfig,
    /// Model endpoint configuration.
    pub llm: LlmConfig,
    /// Retrieval collaborator configuration.
    pub retrieval: RetrievalConfig,
    /// History store configuration.
    pub history: HistoryConfig,
}

/// HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

/// Model endpoint configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Mistral API key (required).
    pub mistral_api_key: String,
    /// Mistral API base URL.
    pub mistral_api_base: String,
    /// Ordered Mistral model tiers, most capable first.
    pub tiers: Vec<String>,
    /// Optional local Ollama model appended as the last tier.
    pub ollama_fallback_model: Option<String>,
    /// Ollama server URL.
    pub ollama_url: String,
    /// Fixed backoff between tier attempts, in seconds.
    pub tier_backoff_secs: u64,
    /// Overall deadline across all tiers for one request, in seconds.
    pub request_timeout_secs: u64,
}

/// Retrieval collaborator configuration.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Base URL of the retrieval sidecar.
    pub base_url: String,
    /// Passages fetched per request.
    pub top_k: usize,
}

/// History store configuration.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// SQLite database path; in-memory when absent.
    pub database_path: Option<String>,
}

const DEFAULT_TIERS: &str = "mistral-large-latest,mistral-medium-latest,mistral-small-latest";

impl Config {
    /// Build the configuration from the environment (and `.env` if present).
    ///
    /// # Errors
    ///
    /// Fails with a descriptive [`AppError::Config`] when a required
    /// variable is absent or a numeric variable does not parse.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: parse_var("PORT", 8000)?,
            },
            llm: LlmConfig {
                mistral_api_key: required("MISTRAL_API_KEY")?,
                mistral_api_base: env::var("MISTRAL_API_BASE")
                    .unwrap_or_else(|_| "https://api.mistral.ai".to_string()),
                tiers: parse_tiers(
                    &env::var("MISTRAL_TIERS").unwrap_or_else(|_| DEFAULT_TIERS.to_string()),
                )?,
                ollama_fallback_model: env::var("OLLAMA_FALLBACK_MODEL")
                    .ok()
                    .filter(|m| !m.trim().is_empty()),
                ollama_url: env::var("OLLAMA_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
                tier_backoff_secs: parse_var("TIER_BACKOFF_SECS", 2)?,
                request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", 180)?,
            },
            retrieval: RetrievalConfig {
                base_url: env::var("RETRIEVAL_URL")
                    .unwrap_or_else(|_| "http://localhost:8001".to_string()),
                top_k: parse_var("RETRIEVAL_TOP_K", 10)?,
            },
            history: HistoryConfig {
                database_path: env::var("DATABASE_PATH")
                    .ok()
                    .filter(|p| !p.is_empty() && p != ":memory:"),
            },
        })
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Config(format!("{} environment variable is not set", name)))
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {}", name, raw))),
        Err(_) => Ok(default),
    }
}

fn parse_tiers(raw: &str) -> Result<Vec<String>> {
    let tiers: Vec<String> = raw
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    if tiers.is_empty() {
        return Err(AppError::Config(
            "MISTRAL_TIERS must list at least one model".to_string(),
        ));
    }
    Ok(tiers)
}
