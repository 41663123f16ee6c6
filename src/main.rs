mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::env;

use tracing_subscriber::EnvFilter;

use infrastructure::AppContainer;
use presentation::http::server::HttpServer;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let container = match AppContainer::new().await {
        Ok(container) => container,
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let port = env::var("PORT").ok().and_then(|v| v.parse::<u16>().ok());

    let server = HttpServer::new(
        container.document_handler.clone(),
        container.conversation_handler.clone(),
        container.booking_handler.clone(),
        port,
    );

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
