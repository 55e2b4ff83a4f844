//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the JSON API under `/api` plus a health probe. CORS is wide open
//! (single-user tool, no credentials) and every request is traced.

pub mod chat;
pub mod inventory;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/stock-in", post(inventory::stock_in))
        .route("/api/stock-out", post(inventory::stock_out))
        .route("/api/inventory", get(inventory::list_inventory))
        .route("/api/chat", post(chat::chat))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
