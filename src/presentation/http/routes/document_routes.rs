use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::DocumentHandler;

pub fn document_routes(document_handler: Arc<DocumentHandler>) -> Router {
    Router::new()
        .route("/documents/upload", post(DocumentHandler::upload_document))
        .route("/documents", get(DocumentHandler::list_documents))
        .with_state(document_handler)
}
