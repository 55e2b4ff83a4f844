//! Inventory routes — stock-in, stock-out, and the inventory list.
//!
//! Field-level validation lives here, not in the ledger: requests with short
//! names, short supplier/recipient labels, or zero quantities are rejected
//! with a 400 before any service call.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::ledger::{self, InventoryItem, LedgerError};
use crate::state::AppState;

/// Minimum length for name, supplier, and recipient fields.
const MIN_FIELD_CHARS: usize = 2;

// =============================================================================
// BODIES
// =============================================================================

#[derive(Deserialize)]
pub struct StockInBody {
    pub name: String,
    pub quantity: u32,
    pub supplier: String,
}

#[derive(Debug, Serialize)]
pub struct StockInResponse {
    pub item: InventoryItem,
    pub merged: bool,
    pub message: String,
}

#[derive(Deserialize)]
pub struct StockOutBody {
    pub item_id: Uuid,
    pub quantity: u32,
    pub recipient: String,
}

#[derive(Debug, Serialize)]
pub struct StockOutResponse {
    pub item: InventoryItem,
    pub message: String,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/stock-in` — record incoming stock.
pub async fn stock_in(
    State(state): State<AppState>,
    Json(body): Json<StockInBody>,
) -> Result<(StatusCode, Json<StockInResponse>), ApiError> {
    validate_min_chars("name", &body.name)?;
    validate_min_chars("supplier", &body.supplier)?;
    validate_quantity(body.quantity)?;

    let outcome = ledger::stock_in(&state, &body.name, body.quantity, &body.supplier)
        .await
        .map_err(ledger_error_to_api)?;

    let message = format!("Item '{}' was successfully added to the warehouse.", body.name);
    Ok((StatusCode::CREATED, Json(StockInResponse { item: outcome.item, merged: outcome.merged, message })))
}

/// `POST /api/stock-out` — record outgoing stock.
pub async fn stock_out(
    State(state): State<AppState>,
    Json(body): Json<StockOutBody>,
) -> Result<Json<StockOutResponse>, ApiError> {
    validate_min_chars("recipient", &body.recipient)?;
    validate_quantity(body.quantity)?;

    let item = ledger::stock_out(&state, body.item_id, body.quantity, &body.recipient)
        .await
        .map_err(ledger_error_to_api)?;

    let message = format!("{} unit(s) dispatched to {}.", body.quantity, body.recipient);
    Ok(Json(StockOutResponse { item, message }))
}

/// `GET /api/inventory` — ordered snapshot of all items.
pub async fn list_inventory(State(state): State<AppState>) -> Json<Vec<InventoryItem>> {
    Json(ledger::list(&state).await)
}

// =============================================================================
// VALIDATION / ERROR MAPPING
// =============================================================================

fn validate_min_chars(field: &str, value: &str) -> Result<(), ApiError> {
    if value.chars().count() < MIN_FIELD_CHARS {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "E_FIELD_TOO_SHORT",
            format!("{field} must be at least {MIN_FIELD_CHARS} characters"),
        ));
    }
    Ok(())
}

fn validate_quantity(quantity: u32) -> Result<(), ApiError> {
    if quantity == 0 {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "E_INVALID_QUANTITY", "quantity must be a positive integer"));
    }
    Ok(())
}

pub(crate) fn ledger_error_to_api(err: LedgerError) -> ApiError {
    match &err {
        LedgerError::ItemNotFound(_) => ApiError::from_error(StatusCode::NOT_FOUND, &err),
        LedgerError::InvalidQuantity => ApiError::from_error(StatusCode::BAD_REQUEST, &err),
        LedgerError::InsufficientStock { available, .. } => {
            ApiError::from_error(StatusCode::CONFLICT, &err).with_field("available", *available)
        }
    }
}

#[cfg(test)]
#[path = "inventory_test.rs"]
mod tests;
