use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::ConversationHandler;

pub fn conversation_routes(conversation_handler: Arc<ConversationHandler>) -> Router {
    Router::new()
        .route("/conversate", post(ConversationHandler::conversate))
        .with_state(conversation_handler)
}
