//! Stock-level lookup capability for the chat agent's tool.
//!
//! DESIGN
//! ======
//! The `getStockLevel` tool resolves through this trait rather than touching
//! the ledger directly, so the data source can be swapped without changing
//! the chat contract. Two implementations ship: a uniform random generator
//! (the historical mock) and a ledger-backed lookup that sums on-hand
//! quantity across suppliers for a name match. `STOCK_LEVEL_SOURCE` selects
//! one at startup.

use std::sync::Arc;

use rand::Rng;
use tokio::sync::RwLock;
use tracing::warn;

use crate::services::ledger::Ledger;

/// Resolves an item name to a stock level. `None` means the source has no
/// record for the name.
#[async_trait::async_trait]
pub trait StockLevelLookup: Send + Sync {
    async fn stock_level(&self, item: &str) -> Option<u32>;
}

// =============================================================================
// SOURCES
// =============================================================================

/// Uniform random stock level in `0..100`, unrelated to the live ledger.
pub struct RandomStockLevel;

#[async_trait::async_trait]
impl StockLevelLookup for RandomStockLevel {
    async fn stock_level(&self, _item: &str) -> Option<u32> {
        Some(rand::rng().random_range(0..100))
    }
}

/// Live lookup against the inventory ledger. Sums quantities across all
/// suppliers carrying the named item.
pub struct LedgerStockLevel {
    ledger: Arc<RwLock<Ledger>>,
}

impl LedgerStockLevel {
    #[must_use]
    pub fn new(ledger: Arc<RwLock<Ledger>>) -> Self {
        Self { ledger }
    }
}

#[async_trait::async_trait]
impl StockLevelLookup for LedgerStockLevel {
    async fn stock_level(&self, item: &str) -> Option<u32> {
        let ledger = self.ledger.read().await;
        let matching: Vec<u32> = ledger
            .items()
            .iter()
            .filter(|i| i.name == item)
            .map(|i| i.quantity)
            .collect();
        if matching.is_empty() {
            return None;
        }
        Some(matching.iter().sum())
    }
}

// =============================================================================
// SELECTION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevelSource {
    Random,
    Ledger,
}

impl StockLevelSource {
    /// Parse a `STOCK_LEVEL_SOURCE` value. Unknown values fall back to the
    /// random mock with a warning.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("ledger") => Self::Ledger,
            Some("random") | None => Self::Random,
            Some(other) => {
                warn!(source = other, "unknown STOCK_LEVEL_SOURCE, using random");
                Self::Random
            }
        }
    }
}

/// Build the configured lookup for the given ledger.
#[must_use]
pub fn from_env(ledger: Arc<RwLock<Ledger>>) -> Arc<dyn StockLevelLookup> {
    match StockLevelSource::parse(std::env::var("STOCK_LEVEL_SOURCE").ok().as_deref()) {
        StockLevelSource::Ledger => Arc::new(LedgerStockLevel::new(ledger)),
        StockLevelSource::Random => Arc::new(RandomStockLevel),
    }
}

#[cfg(test)]
#[path = "stock_level_test.rs"]
mod tests;
