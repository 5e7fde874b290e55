//! Order model

use serde::{Deserialize, Serialize};

/// Order status
///
/// `Pending` is the initial state; `Completed` and `Cancelled` are terminal.
/// There is no transition out of a terminal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Order entity
///
/// Orders are never physically deleted; cancellation is a status transition.
/// `claim_code` is globally unique and immutable once assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub status: OrderStatus,
    pub claim_code: String,
    /// Total charged, after discount, in currency unit
    pub total_amount: f64,
    /// Order-level discount amount in currency unit
    pub discount_applied: f64,
    pub order_date: i64,
    /// Set on the Completed/Cancelled transition
    pub completed_at: Option<i64>,
}

/// Order line — snapshot of a book at placement time.
///
/// `unit_price` is the price at the time of order and never changes with the
/// catalog; `discount` is this line's share of the order-level discount, kept
/// for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub book_id: i64,
    pub title: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub discount: f64,
}

/// Order together with its lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Result of placing an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: i64,
    pub claim_code: String,
    pub total_amount: f64,
    pub discount_applied: f64,
    /// Total units across all lines
    pub item_count: i64,
}

/// Result of completing an order by claim code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedPickup {
    pub order_id: i64,
    pub user_id: i64,
    pub items: Vec<OrderItem>,
}
