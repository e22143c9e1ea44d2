//! SQLite-backed history store via libsql.

use crate::history::HistoryStore;
use crate::types::{AppError, ConversationTurn, Result, TurnRole};
use async_trait::async_trait;
use chrono::Utc;
use libsql::{Builder, Connection, Database};
use uuid::Uuid;

/// Conversation history persisted in a local or in-memory SQLite database.
pub struct LibsqlHistory {
    // Keep the database handle alive and reuse one connection: for
    // `:memory:` databases every `Database::connect` call opens a
    // fresh, empty database, so the schema must live on a single
    // shared connection.
    _db: Database,
    conn: Connection,
}

impl LibsqlHistory {
    /// Ephemeral in-memory store (development and tests).
    pub async fn new_memory() -> Result<Self> {
        Self::build(":memory:").await
    }

    /// File-backed store at `path`.
    pub async fn new_local(path: &str) -> Result<Self> {
        Self::build(path).await
    }

    async fn build(path: &str) -> Result<Self> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::History(format!("Failed to open database: {}", e)))?;

        let conn = db
            .connect()
            .map_err(|e| AppError::History(format!("Failed to get connection: {}", e)))?;

        let store = Self { _db: db, conn };
        store.initialize_schema().await?;

        Ok(store)
    }

    fn connection(&self) -> Result<Connection> {
        Ok(self.conn.clone())
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS sessions (
                id TEXT PRIMARY KEY,
                created_at INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::History(format!("Failed to create sessions table: {}", e)))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS turns (
                id TEXT PRIMARY KEY,
                session_id TEXT NOT NULL,
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                timestamp INTEGER NOT NULL,
                FOREIGN KEY (session_id) REFERENCES sessions(id)
            )",
            (),
        )
        .await
        .map_err(|e| AppError::History(format!("Failed to create turns table: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl HistoryStore for LibsqlHistory {
    async fn get_history(&self, session_id: &str) -> Result<Vec<ConversationTurn>> {
        let conn = self.connection()?;

        // rowid breaks timestamp ties so a user/assistant pair written in
        // the same millisecond keeps its order
        let mut rows = conn
            .query(
                "SELECT role, content, timestamp FROM turns
                 WHERE session_id = ? ORDER BY timestamp ASC, rowid ASC",
                [session_id],
            )
            .await
            .map_err(|e| AppError::History(format!("Failed to query turns: {}", e)))?;

        let mut turns = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::History(e.to_string()))?
        {
            let role_str: String = row.get(0).map_err(|e| AppError::History(e.to_string()))?;
            let role = TurnRole::parse(&role_str).unwrap_or(TurnRole::User);

            let millis: i64 = row.get(2).map_err(|e| AppError::History(e.to_string()))?;
            turns.push(ConversationTurn {
                role,
                content: row.get(1).map_err(|e| AppError::History(e.to_string()))?,
                timestamp: chrono::DateTime::from_timestamp_millis(millis)
                    .unwrap_or_else(Utc::now),
            });
        }

        Ok(turns)
    }

    async fn append_turn(&self, session_id: &str, turn: &ConversationTurn) -> Result<()> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp_millis();

        conn.execute(
            "INSERT OR IGNORE INTO sessions (id, created_at) VALUES (?, ?)",
            (session_id, now),
        )
        .await
        .map_err(|e| AppError::History(format!("Failed to create session: {}", e)))?;

        let id = Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO turns (id, session_id, role, content, timestamp)
             VALUES (?, ?, ?, ?, ?)",
            (
                id,
                session_id,
                turn.role.as_str(),
                turn.content.as_str(),
                turn.timestamp.timestamp_millis(),
            ),
        )
        .await
        .map_err(|e| AppError::History(format!("Failed to append turn: {}", e)))?;

        Ok(())
    }
}
