use super::*;
use crate::state::test_helpers;

async fn call_stock_in(state: &AppState, name: &str, quantity: u32, supplier: &str) -> Result<StockInResponse, ApiError> {
    let body = StockInBody { name: name.into(), quantity, supplier: supplier.into() };
    stock_in(State(state.clone()), Json(body))
        .await
        .map(|(_, Json(response))| response)
}

async fn call_stock_out(
    state: &AppState,
    item_id: Uuid,
    quantity: u32,
    recipient: &str,
) -> Result<StockOutResponse, ApiError> {
    let body = StockOutBody { item_id, quantity, recipient: recipient.into() };
    stock_out(State(state.clone()), Json(body))
        .await
        .map(|Json(response)| response)
}

// =============================================================================
// stock-in
// =============================================================================

#[tokio::test]
async fn stock_in_creates_item() {
    let state = test_helpers::test_app_state();
    let response = call_stock_in(&state, "Mouse", 10, "Supplier A").await.unwrap();
    assert!(!response.merged);
    assert_eq!(response.item.quantity, 10);
    assert!(response.message.contains("Mouse"));
}

#[tokio::test]
async fn stock_in_merges_existing_pair() {
    let state = test_helpers::test_app_state();
    let first = call_stock_in(&state, "Mouse", 10, "Supplier A").await.unwrap();
    let second = call_stock_in(&state, "Mouse", 5, "Supplier A").await.unwrap();
    assert!(second.merged);
    assert_eq!(second.item.id, first.item.id);
    assert_eq!(second.item.quantity, 15);
}

#[tokio::test]
async fn stock_in_rejects_short_name() {
    let state = test_helpers::test_app_state();
    let err = call_stock_in(&state, "M", 10, "Supplier A").await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.code(), "E_FIELD_TOO_SHORT");
    assert!(state.ledger.read().await.is_empty(), "validation failures must not touch the ledger");
}

#[tokio::test]
async fn stock_in_rejects_short_supplier() {
    let state = test_helpers::test_app_state();
    let err = call_stock_in(&state, "Mouse", 10, "S").await.unwrap_err();
    assert_eq!(err.code(), "E_FIELD_TOO_SHORT");
}

#[tokio::test]
async fn stock_in_rejects_zero_quantity() {
    let state = test_helpers::test_app_state();
    let err = call_stock_in(&state, "Mouse", 0, "Supplier A").await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.code(), "E_INVALID_QUANTITY");
}

// =============================================================================
// stock-out
// =============================================================================

#[tokio::test]
async fn stock_out_decrements_and_confirms_recipient() {
    let state = test_helpers::test_app_state();
    let item = call_stock_in(&state, "Monitor", 40, "Supplier C").await.unwrap().item;

    let response = call_stock_out(&state, item.id, 15, "Customer A").await.unwrap();
    assert_eq!(response.item.quantity, 25);
    assert!(response.message.contains("Customer A"));
    assert!(response.message.contains("15"));
}

#[tokio::test]
async fn stock_out_overdraw_maps_to_conflict_with_available() {
    let state = test_helpers::test_app_state();
    let item = call_stock_in(&state, "Mouse", 15, "Supplier A").await.unwrap().item;

    let err = call_stock_out(&state, item.id, 20, "Customer A").await.unwrap_err();
    assert_eq!(err.status(), StatusCode::CONFLICT);
    assert_eq!(err.code(), "E_INSUFFICIENT_STOCK");
    assert_eq!(err.field("available").and_then(serde_json::Value::as_u64), Some(15));

    // The rejection must not have mutated anything.
    let items = state.ledger.read().await.items();
    assert_eq!(items[0].quantity, 15);
}

#[tokio::test]
async fn stock_out_unknown_item_maps_to_not_found() {
    let state = test_helpers::test_app_state();
    let err = call_stock_out(&state, Uuid::new_v4(), 1, "Customer A").await.unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(err.code(), "E_ITEM_NOT_FOUND");
}

#[tokio::test]
async fn stock_out_rejects_short_recipient() {
    let state = test_helpers::test_app_state();
    let item = call_stock_in(&state, "Mouse", 5, "Supplier A").await.unwrap().item;
    let err = call_stock_out(&state, item.id, 1, "C").await.unwrap_err();
    assert_eq!(err.code(), "E_FIELD_TOO_SHORT");
}

// =============================================================================
// list
// =============================================================================

#[tokio::test]
async fn list_reflects_operations_in_order() {
    let state = test_helpers::test_app_state();
    call_stock_in(&state, "Monitor", 40, "Supplier C").await.unwrap();
    call_stock_in(&state, "Keyboard", 75, "Supplier A").await.unwrap();
    let mouse = call_stock_in(&state, "Mouse", 150, "Supplier B").await.unwrap().item;
    call_stock_out(&state, mouse.id, 150, "Customer B").await.unwrap();

    let Json(items) = list_inventory(State(state.clone())).await;
    let summary: Vec<(&str, u32)> = items.iter().map(|i| (i.name.as_str(), i.quantity)).collect();
    assert_eq!(summary, [("Monitor", 40), ("Keyboard", 75), ("Mouse", 0)]);
}

// =============================================================================
// error mapping
// =============================================================================

#[test]
fn ledger_error_to_api_maps_statuses() {
    let not_found = ledger_error_to_api(LedgerError::ItemNotFound(Uuid::nil()));
    assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

    let invalid = ledger_error_to_api(LedgerError::InvalidQuantity);
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    let short = ledger_error_to_api(LedgerError::InsufficientStock { requested: 9, available: 4 });
    assert_eq!(short.status(), StatusCode::CONFLICT);
    assert_eq!(short.field("available").and_then(serde_json::Value::as_u64), Some(4));
}
