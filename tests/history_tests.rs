//! History store tests against real SQLite databases.

use colbert::types::{ConversationTurn, TurnRole};
use colbert::{HistoryStore, LibsqlHistory};

#[tokio::test]
async fn test_unknown_session_has_empty_history() {
    let store = LibsqlHistory::new_memory().await.unwrap();

    let turns = store.get_history("missing").await.unwrap();

    assert!(turns.is_empty());
}

#[tokio::test]
async fn test_turns_come_back_in_append_order() {
    let store = LibsqlHistory::new_memory().await.unwrap();

    store
        .append_turn("s1", &ConversationTurn::user("Bonjour"))
        .await
        .unwrap();
    store
        .append_turn("s1", &ConversationTurn::assistant("Bonjour, que puis-je faire ?"))
        .await
        .unwrap();
    store
        .append_turn("s1", &ConversationTurn::user("Comment obtenir un passeport ?"))
        .await
        .unwrap();

    let turns = store.get_history("s1").await.unwrap();

    assert_eq!(turns.len(), 3);
    assert_eq!(turns[0].role, TurnRole::User);
    assert_eq!(turns[0].content, "Bonjour");
    assert_eq!(turns[1].role, TurnRole::Assistant);
    assert_eq!(turns[2].content, "Comment obtenir un passeport ?");
}

#[tokio::test]
async fn test_same_millisecond_pair_keeps_insert_order() {
    let store = LibsqlHistory::new_memory().await.unwrap();
    let now = chrono::Utc::now();

    let user = ConversationTurn {
        role: TurnRole::User,
        content: "question".to_string(),
        timestamp: now,
    };
    let assistant = ConversationTurn {
        role: TurnRole::Assistant,
        content: "réponse".to_string(),
        timestamp: now,
    };
    store.append_turn("s1", &user).await.unwrap();
    store.append_turn("s1", &assistant).await.unwrap();

    let turns = store.get_history("s1").await.unwrap();

    assert_eq!(turns[0].role, TurnRole::User);
    assert_eq!(turns[1].role, TurnRole::Assistant);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let store = LibsqlHistory::new_memory().await.unwrap();

    store
        .append_turn("s1", &ConversationTurn::user("question de s1"))
        .await
        .unwrap();
    store
        .append_turn("s2", &ConversationTurn::user("question de s2"))
        .await
        .unwrap();

    let s1 = store.get_history("s1").await.unwrap();
    let s2 = store.get_history("s2").await.unwrap();

    assert_eq!(s1.len(), 1);
    assert_eq!(s1[0].content, "question de s1");
    assert_eq!(s2.len(), 1);
    assert_eq!(s2[0].content, "question de s2");
}

#[tokio::test]
async fn test_file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.db");
    let path = path.to_str().unwrap();

    {
        let store = LibsqlHistory::new_local(path).await.unwrap();
        store
            .append_turn("s1", &ConversationTurn::user("persistée"))
            .await
            .unwrap();
    }

    let reopened = LibsqlHistory::new_local(path).await.unwrap();
    let turns = reopened.get_history("s1").await.unwrap();

    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].content, "persistée");
}
