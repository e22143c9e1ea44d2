//! Ordered model-tier fallback chain.
//!
//! Tiers are tried most-capable-first against the same prompt. Each tier
//! attempt yields an explicit outcome value; failures never propagate as
//! exceptions between tiers. A tier failure advances the loop to the next
//! tier after a short fixed backoff, so rate-limit pressure on one tier
//! does not immediately hammer the next. The first tier whose invocation
//! succeeds wins, even when interpretation had to degrade to raw text; the
//! chain only fails once the last tier has failed.

use crate::llm::client::ChatModel;
use crate::llm::interpret::interpret;
use crate::prompt::CONTEXT_TURN_PREFIX;
use crate::types::{AppError, ConversationTurn, Result, StructuredAnswer};
use std::time::Duration;

/// Record of one failed tier attempt.
#[derive(Debug, Clone)]
pub struct TierFailure {
    /// Model identifier of the failed tier.
    pub model: String,
    /// Transport-level failure description.
    pub reason: String,
}

impl std::fmt::Display for TierFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.model, self.reason)
    }
}

/// Ordered list of model tiers with fallback-on-failure invocation.
///
/// Long-lived: built once from configuration, shared across requests.
/// Tier order is fixed and never reordered by runtime feedback.
pub struct InvocationChain {
    tiers: Vec<Box<dyn ChatModel>>,
    tier_backoff: Duration,
}

impl InvocationChain {
    /// Create a chain from clients ordered most-capable-first.
    pub fn new(tiers: Vec<Box<dyn ChatModel>>, tier_backoff: Duration) -> Self {
        Self {
            tiers,
            tier_backoff,
        }
    }

    /// Number of configured tiers.
    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    /// Invoke the chain with a fully specified prompt.
    ///
    /// Builds the message sequence (system instructions, output-format
    /// instructions, history, user turn, context turn) once and replays it
    /// against each tier in order until one succeeds.
    ///
    /// # Errors
    ///
    /// Fails only when every tier has failed; the error aggregates the
    /// per-tier failure reasons.
    pub async fn invoke(
        &self,
        system_prompt: &str,
        format_instructions: &str,
        history: &[ConversationTurn],
        user_message: &str,
        context: &str,
    ) -> Result<StructuredAnswer> {
        let messages = build_messages(
            system_prompt,
            format_instructions,
            history,
            user_message,
            context,
        );

        let mut failures: Vec<TierFailure> = Vec::new();

        for tier in &self.tiers {
            if !failures.is_empty() && !self.tier_backoff.is_zero() {
                tokio::time::sleep(self.tier_backoff).await;
            }

            match self.try_tier(tier.as_ref(), &messages).await {
                Ok(answer) => {
                    tracing::info!(model = tier.model_name(), "model tier answered");
                    return Ok(answer);
                }
                Err(failure) => {
                    tracing::warn!(
                        model = %failure.model,
                        reason = %failure.reason,
                        "model tier failed, downgrading"
                    );
                    failures.push(failure);
                }
            }
        }

        let summary = failures
            .iter()
            .map(TierFailure::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(AppError::Llm(format!(
            "All model tiers exhausted: {}",
            summary
        )))
    }

    /// One tier attempt as an explicit success/failure value.
    ///
    /// Interpretation never fails, so a successful invocation always
    /// produces an answer, possibly degraded to raw text.
    async fn try_tier(
        &self,
        tier: &dyn ChatModel,
        messages: &[(String, String)],
    ) -> std::result::Result<StructuredAnswer, TierFailure> {
        match tier.chat(messages).await {
            Ok(output) => Ok(interpret(output)),
            Err(e) => Err(TierFailure {
                model: tier.model_name().to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// Assemble the `(role, content)` message sequence for one request.
fn build_messages(
    system_prompt: &str,
    format_instructions: &str,
    history: &[ConversationTurn],
    user_message: &str,
    context: &str,
) -> Vec<(String, String)> {
    let mut messages: Vec<(String, String)> = Vec::with_capacity(history.len() + 4);
    messages.push(("system".to_string(), system_prompt.to_string()));
    messages.push(("system".to_string(), format_instructions.to_string()));
    for turn in history {
        messages.push((turn.role.as_str().to_string(), turn.content.clone()));
    }
    messages.push(("user".to_string(), user_message.to_string()));
    messages.push((
        "system".to_string(),
        format!("{}\n{}", CONTEXT_TURN_PREFIX, context),
    ));
    messages
}
