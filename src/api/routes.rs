//! Route table.

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// Build the application router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(crate::api::handlers::chat::root))
        .route("/chat", post(crate::api::handlers::chat::chat))
}
