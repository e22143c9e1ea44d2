//! Conversation history store.
//!
//! Append-only per-session message log behind the [`HistoryStore`] trait.
//! The core never mutates past turns; it only appends, and assumes the
//! store enforces per-session append ordering under concurrent access.
//!
//! The default implementation is [`LibsqlHistory`], a local or in-memory
//! SQLite database via libsql.

pub mod libsql;

use crate::types::{ConversationTurn, Result};
use async_trait::async_trait;

pub use self::libsql::LibsqlHistory;

/// Abstract trait for the conversation-history collaborator.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// All turns of a session, oldest first. An unknown session yields an
    /// empty history, not an error.
    async fn get_history(&self, session_id: &str) -> Result<Vec<ConversationTurn>>;

    /// Append one turn to a session, creating the session on first use.
    async fn append_turn(&self, session_id: &str, turn: &ConversationTurn) -> Result<()>;
}
