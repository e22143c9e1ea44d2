//! Mock implementations for testing.
//!
//! Mock collaborators (chat model, retriever, history store) shared across
//! test files without duplication.

#![allow(dead_code)]

use async_trait::async_trait;
use colbert::llm::{ChatModel, ModelOutput};
use colbert::retrieval::Retriever;
use colbert::types::{AppError, ConversationTurn, Passage, Result};
use colbert::HistoryStore;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock chat model with a fixed output, call counting and message capture.
pub struct MockChatModel {
    name: String,
    output: Option<ModelOutput>,
    delay: Option<std::time::Duration>,
    calls: Arc<AtomicUsize>,
    last_messages: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockChatModel {
    /// A model that always succeeds with `output`.
    pub fn new(name: &str, output: ModelOutput) -> Self {
        Self {
            name: name.to_string(),
            output: Some(output),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
            last_messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A model that always fails.
    pub fn failing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            output: None,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
            last_messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A model that sleeps for `delay` before answering.
    pub fn slow(name: &str, delay: std::time::Duration, output: ModelOutput) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(name, output)
        }
    }

    /// Handle counting how many times `chat` was invoked.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    /// Handle on the messages of the most recent invocation.
    pub fn message_capture(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        self.last_messages.clone()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn chat(&self, messages: &[(String, String)]) -> Result<ModelOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = messages.to_vec();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.output {
            Some(output) => Ok(output.clone()),
            None => Err(AppError::Llm(format!("{}: mock failure", self.name))),
        }
    }

    fn model_name(&self) -> &str {
        &self.name
    }
}

/// Mock retriever returning a fixed passage list or failing.
pub struct MockRetriever {
    passages: Vec<Passage>,
    should_fail: bool,
}

impl MockRetriever {
    /// A retriever that returns the given passages.
    pub fn new(passages: Vec<Passage>) -> Self {
        Self {
            passages,
            should_fail: false,
        }
    }

    /// A retriever that returns no passages.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// A retriever whose index is unreachable.
    pub fn failing() -> Self {
        Self {
            passages: Vec::new(),
            should_fail: true,
        }
    }
}

#[async_trait]
impl Retriever for MockRetriever {
    async fn similarity_search(&self, _query: &str, k: usize) -> Result<Vec<Passage>> {
        if self.should_fail {
            return Err(AppError::Retrieval("mock index unreachable".to_string()));
        }
        Ok(self.passages.iter().take(k).cloned().collect())
    }
}

/// In-memory mock history store with failure switches.
#[derive(Default)]
pub struct MockHistory {
    turns: Mutex<HashMap<String, Vec<ConversationTurn>>>,
    fail_get: bool,
    fail_append: bool,
}

impl MockHistory {
    /// An empty, working store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose reads fail.
    pub fn failing_get() -> Self {
        Self {
            fail_get: true,
            ..Self::default()
        }
    }

    /// A store whose writes fail.
    pub fn failing_append() -> Self {
        Self {
            fail_append: true,
            ..Self::default()
        }
    }

    /// Seed an existing conversation.
    pub fn with_turns(session_id: &str, turns: Vec<ConversationTurn>) -> Self {
        let store = Self::default();
        store
            .turns
            .lock()
            .unwrap()
            .insert(session_id.to_string(), turns);
        store
    }

    /// Snapshot of a session's turns.
    pub fn turns_for(&self, session_id: &str) -> Vec<ConversationTurn> {
        self.turns
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl HistoryStore for MockHistory {
    async fn get_history(&self, session_id: &str) -> Result<Vec<ConversationTurn>> {
        if self.fail_get {
            return Err(AppError::History("mock store unreachable".to_string()));
        }
        Ok(self.turns_for(session_id))
    }

    async fn append_turn(&self, session_id: &str, turn: &ConversationTurn) -> Result<()> {
        if self.fail_append {
            return Err(AppError::History("mock store unreachable".to_string()));
        }
        self.turns
            .lock()
            .unwrap()
            .entry(session_id.to_string())
            .or_default()
            .push(turn.clone());
        Ok(())
    }
}

/// Build a passage with string metadata fields.
pub fn passage(content: &str, fields: &[(&str, &str)]) -> Passage {
    let metadata: HashMap<String, serde_json::Value> = fields
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::json!(v)))
        .collect();
    Passage {
        content: content.to_string(),
        metadata,
    }
}
