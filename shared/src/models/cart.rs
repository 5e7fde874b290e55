//! Cart model

use serde::{Deserialize, Serialize};

/// Cart line joined with live book data for display.
///
/// Prices here are resolved live (current catalog state), never snapshotted;
/// snapshotting happens only at order placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub quantity: i64,
    /// Current list price
    pub price: f64,
    /// Current price after any active sale window
    pub effective_price: f64,
    /// Stock currently available in the catalog
    pub stock: i64,
    pub added_at: i64,
}

/// Payload for adding an item to the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCartItem {
    pub book_id: i64,
    pub quantity: i64,
}
