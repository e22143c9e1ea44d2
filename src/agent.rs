//! Session orchestrator.
//!
//! One [`ColbertAgent`] instance lives for the whole process and holds
//! only the collaborator handles; per-request state (history, context) is
//! passed as parameters and never stored on the instance. Each request
//! runs the pipeline strictly in order: retrieve, aggregate and assemble,
//! invoke the tier chain, format, persist. Persistence happens only after
//! formatting succeeded, so a partial answer never enters history.

use crate::context::assemble;
use crate::history::HistoryStore;
use crate::llm::InvocationChain;
use crate::prompt::{
    COLBERT_PROMPT, FORMAT_INSTRUCTIONS, GENERAL_KNOWLEDGE_DISCLAIMER, NO_DOCUMENTS_NOTICE,
};
use crate::retrieval::Retriever;
use crate::sources::{aggregate, extract_urls, SourceGroups, FALLBACK_ROOT_URL};
use crate::types::{ConversationTurn, SourceRef, StructuredAnswer};
use std::sync::Arc;
use std::time::Duration;

/// Apology returned when the request failed before the model was reached.
pub const GENERIC_APOLOGY: &str = "Désolé, une erreur est survenue. Veuillez réessayer.";

/// Apology returned when every model tier failed or the deadline expired.
pub const MODEL_UNAVAILABLE_APOLOGY: &str =
    "Désolé, je ne peux pas répondre pour le moment. Veuillez réessayer dans quelques instants.";

/// Metadata key carrying the document title (Dublin Core).
const TITLE_KEY: &str = "title";

/// Maximum excerpt length, in characters.
const EXCERPT_CHARS: usize = 200;

/// Result of one chat request, always well-formed for the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOutcome {
    /// Final display text (answer body plus rendered sources section).
    pub answer: String,
    /// Cited sources with display metadata.
    pub sources: Vec<SourceRef>,
}

/// Long-lived retrieval-and-answer orchestrator.
pub struct ColbertAgent {
    retriever: Arc<dyn Retriever>,
    history: Arc<dyn HistoryStore>,
    chain: InvocationChain,
    top_k: usize,
    request_timeout: Duration,
}

impl ColbertAgent {
    /// Create the orchestrator from its collaborator handles.
    pub fn new(
        retriever: Arc<dyn Retriever>,
        history: Arc<dyn HistoryStore>,
        chain: InvocationChain,
        top_k: usize,
        request_timeout: Duration,
    ) -> Self {
        Self {
            retriever,
            history,
            chain,
            top_k,
            request_timeout,
        }
    }

    /// Answer one user message within a session.
    ///
    /// Never fails from the caller's point of view: internal failures
    /// produce one of the two fixed apology strings, in which case nothing
    /// is persisted to history.
    pub async fn ask(&self, message: &str, session_id: &str) -> ChatOutcome {
        // Retrieval failure is not fatal: answering from general knowledge
        // beats refusing to answer
        let passages = match self.retriever.similarity_search(message, self.top_k).await {
            Ok(passages) => passages,
            Err(e) => {
                tracing::warn!(error = %e, "retrieval failed, treating as zero passages");
                Vec::new()
            }
        };

        let groups = aggregate(&passages);
        let context = if groups.is_empty() {
            NO_DOCUMENTS_NOTICE.to_string()
        } else {
            assemble(&groups)
        };

        let history = match self.history.get_history(session_id).await {
            Ok(history) => history,
            Err(e) => {
                tracing::error!(error = %e, session_id, "history fetch failed");
                return ChatOutcome {
                    answer: GENERIC_APOLOGY.to_string(),
                    sources: Vec::new(),
                };
            }
        };

        let invocation = self.chain.invoke(
            COLBERT_PROMPT,
            FORMAT_INSTRUCTIONS,
            &history,
            message,
            &context,
        );
        let mut answer = match tokio::time::timeout(self.request_timeout, invocation).await {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                tracing::error!(error = %e, session_id, "invocation chain exhausted");
                return ChatOutcome {
                    answer: MODEL_UNAVAILABLE_APOLOGY.to_string(),
                    sources: Vec::new(),
                };
            }
            Err(_) => {
                tracing::error!(
                    timeout_secs = self.request_timeout.as_secs(),
                    session_id,
                    "request deadline exceeded"
                );
                return ChatOutcome {
                    answer: MODEL_UNAVAILABLE_APOLOGY.to_string(),
                    sources: Vec::new(),
                };
            }
        };

        apply_source_policy(&mut answer, &groups);

        let display = format_answer(&answer);
        let sources = source_refs(&answer, &groups);

        self.persist(session_id, message, &display).await;

        ChatOutcome {
            answer: display,
            sources,
        }
    }

    /// Append the user/assistant turn pair. Failures are logged, never
    /// surfaced: the caller already holds a correct answer.
    async fn persist(&self, session_id: &str, message: &str, display: &str) {
        let user_turn = ConversationTurn::user(message);
        if let Err(e) = self.history.append_turn(session_id, &user_turn).await {
            tracing::error!(error = %e, session_id, "failed to persist user turn");
            return;
        }

        let assistant_turn = ConversationTurn::assistant(display);
        if let Err(e) = self.history.append_turn(session_id, &assistant_turn).await {
            tracing::error!(error = %e, session_id, "failed to persist assistant turn");
        }
    }
}

/// Enforce the citation policy structurally instead of trusting the model.
///
/// With zero retrieved groups, the model was instructed to disclose its
/// reliance on general knowledge; since it may ignore that, the disclaimer
/// is prepended here, `sources` is forced to the fallback root URL and the
/// secondary list is cleared. With groups present but an empty `sources`
/// list, the aggregated primary URLs fill it in.
fn apply_source_policy(answer: &mut StructuredAnswer, groups: &SourceGroups) {
    if groups.is_empty() {
        answer.answer = format!("{} {}", GENERAL_KNOWLEDGE_DISCLAIMER, answer.answer.trim());
        answer.sources = vec![FALLBACK_ROOT_URL.to_string()];
        answer.secondary_sources.clear();
    } else if answer.sources.is_empty() {
        let (primary, _) = extract_urls(groups);
        answer.sources = primary;
    }
}

/// Render the final display text: trimmed answer body, then a sources
/// section with one markdown link per URL, omitted when `sources` is
/// empty.
fn format_answer(answer: &StructuredAnswer) -> String {
    let body = answer.answer.trim();
    if answer.sources.is_empty() {
        return body.to_string();
    }

    let links: Vec<String> = answer
        .sources
        .iter()
        .map(|url| format!("- [{}]({})", url, url))
        .collect();
    format!("{}\n\nSources :\n{}", body, links.join("\n"))
}

/// Decorate each cited URL with display metadata from its source group.
fn source_refs(answer: &StructuredAnswer, groups: &SourceGroups) -> Vec<SourceRef> {
    answer
        .sources
        .iter()
        .map(|url| {
            let group = groups.get(url);
            let first_passage = group.and_then(|g| g.passages.first());
            SourceRef {
                url: url.clone(),
                title: first_passage
                    .and_then(|p| p.metadata_str(TITLE_KEY))
                    .map(String::from),
                excerpt: first_passage.map(|p| excerpt(&p.content)),
            }
        })
        .collect()
}

fn excerpt(content: &str) -> String {
    content.chars().take(EXCERPT_CHARS).collect()
}
