//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the inventory ledger behind a single `RwLock`, the optional LLM
//! client, and the stock-level lookup capability used by the chat agent's
//! tool. All inner fields are Arc-wrapped so Clone stays cheap.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::llm::LlmChat;
use crate::services::ledger::Ledger;
use crate::services::stock_level::StockLevelLookup;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    /// Single owning lock over the inventory ledger.
    pub ledger: Arc<RwLock<Ledger>>,
    /// Optional LLM client. `None` if LLM env vars are not configured;
    /// the chat endpoint degrades to a canned reply in that case.
    pub llm: Option<Arc<dyn LlmChat>>,
    /// Stock-level lookup injected into the chat agent's tool.
    pub stock_levels: Arc<dyn StockLevelLookup>,
}

impl AppState {
    #[must_use]
    pub fn new(
        ledger: Arc<RwLock<Ledger>>,
        llm: Option<Arc<dyn LlmChat>>,
        stock_levels: Arc<dyn StockLevelLookup>,
    ) -> Self {
        Self { ledger, llm, stock_levels }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_state_has_empty_ledger() {
        let state = test_helpers::test_app_state();
        assert!(state.ledger.read().await.is_empty());
        assert!(state.llm.is_none());
    }

    #[tokio::test]
    async fn seeded_state_lists_items_in_order() {
        let state = test_helpers::test_app_state();
        test_helpers::seed_items(
            &state,
            vec![test_helpers::dummy_item("Mouse", 10, "Supplier A"), test_helpers::dummy_item("Keyboard", 5, "Supplier B")],
        )
        .await;

        let items = state.ledger.read().await.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Mouse");
        assert_eq!(items[1].name, "Keyboard");
    }
}
