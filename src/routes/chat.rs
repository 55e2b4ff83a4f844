//! Chat route — free-text stock-insights queries.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::services::chat::{self, ChatError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChatBody {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponseBody {
    pub response: String,
}

/// `POST /api/chat` — answer one stock-insights question.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatBody>,
) -> Result<Json<ChatResponseBody>, ApiError> {
    if body.query.trim().is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "E_EMPTY_QUERY", "query must not be empty"));
    }

    let response = chat::handle_query(&state, &body.query)
        .await
        .map_err(chat_error_to_api)?;
    Ok(Json(ChatResponseBody { response }))
}

pub(crate) fn chat_error_to_api(err: ChatError) -> ApiError {
    match &err {
        ChatError::Llm(_) => ApiError::from_error(StatusCode::BAD_GATEWAY, &err),
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
