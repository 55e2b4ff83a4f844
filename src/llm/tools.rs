//! Tool definitions for the stock-insights agent.

use super::types::Tool;

/// Build the tool set available to the stock-insights agent.
///
/// One tool only: `getStockLevel`, resolving an item name to its current
/// stock level.
#[must_use]
pub fn stock_insight_tools() -> Vec<Tool> {
    vec![Tool {
        name: "getStockLevel".into(),
        description: "Returns the current stock level for a given item.".into(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "item": { "type": "string", "description": "The name of the item to check stock level for." }
            },
            "required": ["item"]
        }),
    }]
}
