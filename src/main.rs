mod error;
mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::llm::LlmChat;
use crate::services::ledger::Ledger;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Initialize LLM client (non-fatal: chat degrades if config missing).
    let llm: Option<Arc<dyn LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured; chat assistant disabled");
            None
        }
    };

    let ledger = Arc::new(RwLock::new(Ledger::new()));
    let stock_levels = services::stock_level::from_env(ledger.clone());
    let state = state::AppState::new(ledger, llm, stock_levels);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "stockpilot listening");
    axum::serve(listener, app).await.expect("server failed");
}
