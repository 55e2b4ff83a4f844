//! Inventory ledger — stock-in, stock-out, and snapshot queries.
//!
//! DESIGN
//! ======
//! The `Ledger` is the single owner of inventory state: an ordered list of
//! items, insertion order preserved for display. Items are identified by an
//! opaque `Uuid`; the pair `(name, supplier)` acts as a natural key that
//! stock-in merges on. Mutation happens only through `Ledger` methods; the
//! async service functions below take the state lock for exactly one
//! operation and hand cloned snapshots to callers.
//!
//! ERROR HANDLING
//! ==============
//! Stock-out is checked before any mutation: an overdraw request is rejected
//! with the pre-operation quantity and leaves the ledger untouched. Unknown
//! ids and zero quantities are rejected the same way, so no call path can
//! drive a quantity negative.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::state::AppState;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("item not found: {0}")]
    ItemNotFound(Uuid),
    #[error("quantity must be a positive integer")]
    InvalidQuantity,
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
}

impl crate::error::ErrorCode for LedgerError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ItemNotFound(_) => "E_ITEM_NOT_FOUND",
            Self::InvalidQuantity => "E_INVALID_QUANTITY",
            Self::InsufficientStock { .. } => "E_INSUFFICIENT_STOCK",
        }
    }
}

/// A stock-keeping record. `id` is assigned at creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: u32,
    pub supplier: String,
}

/// Result of a stock-in: the affected item and whether an existing
/// `(name, supplier)` record absorbed the quantity.
#[derive(Debug, Clone)]
pub struct StockInOutcome {
    pub item: InventoryItem,
    pub merged: bool,
}

// =============================================================================
// LEDGER
// =============================================================================

/// Owned inventory state. Insertion order is the display order.
#[derive(Debug, Default)]
pub struct Ledger {
    items: Vec<InventoryItem>,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn with_items(items: Vec<InventoryItem>) -> Self {
        Self { items }
    }

    /// Record incoming stock. Merges into the existing item with the same
    /// `(name, supplier)` pair, or appends a new item with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` if `quantity` is zero.
    pub fn stock_in(&mut self, name: &str, quantity: u32, supplier: &str) -> Result<StockInOutcome, LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }

        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.name == name && item.supplier == supplier)
        {
            item.quantity = item.quantity.saturating_add(quantity);
            return Ok(StockInOutcome { item: item.clone(), merged: true });
        }

        let item = InventoryItem {
            id: Uuid::new_v4(),
            name: name.to_string(),
            quantity,
            supplier: supplier.to_string(),
        };
        self.items.push(item.clone());
        Ok(StockInOutcome { item, merged: false })
    }

    /// Record outgoing stock. The overdraw check runs before any mutation;
    /// a rejected call leaves the ledger exactly as it was. Quantity may
    /// reach zero and the item remains listed.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` for an unknown id, `InvalidQuantity` for a zero
    /// quantity, and `InsufficientStock` (with the current available
    /// quantity) when the request exceeds on-hand stock.
    pub fn stock_out(&mut self, item_id: Uuid, quantity: u32) -> Result<InventoryItem, LedgerError> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }

        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or(LedgerError::ItemNotFound(item_id))?;

        if item.quantity < quantity {
            return Err(LedgerError::InsufficientStock { requested: quantity, available: item.quantity });
        }

        item.quantity -= quantity;
        Ok(item.clone())
    }

    /// Ordered snapshot of all items.
    #[must_use]
    pub fn items(&self) -> Vec<InventoryItem> {
        self.items.clone()
    }

    #[must_use]
    pub fn get(&self, item_id: Uuid) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// SERVICE OPERATIONS
// =============================================================================

/// Record incoming stock against the shared ledger.
///
/// # Errors
///
/// Propagates [`LedgerError::InvalidQuantity`].
pub async fn stock_in(
    state: &AppState,
    name: &str,
    quantity: u32,
    supplier: &str,
) -> Result<StockInOutcome, LedgerError> {
    let mut ledger = state.ledger.write().await;
    let outcome = ledger.stock_in(name, quantity, supplier)?;
    info!(
        item_id = %outcome.item.id,
        name,
        supplier,
        quantity,
        on_hand = outcome.item.quantity,
        merged = outcome.merged,
        "stock-in recorded"
    );
    Ok(outcome)
}

/// Record outgoing stock against the shared ledger. The recipient is logged
/// and echoed in the confirmation message only; no movement history is kept.
///
/// # Errors
///
/// Propagates the stock-out rejections of [`Ledger::stock_out`].
pub async fn stock_out(
    state: &AppState,
    item_id: Uuid,
    quantity: u32,
    recipient: &str,
) -> Result<InventoryItem, LedgerError> {
    let mut ledger = state.ledger.write().await;
    let item = ledger.stock_out(item_id, quantity)?;
    info!(%item_id, quantity, recipient, remaining = item.quantity, "stock-out recorded");
    Ok(item)
}

/// Ordered snapshot of the shared ledger.
pub async fn list(state: &AppState) -> Vec<InventoryItem> {
    state.ledger.read().await.items()
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
