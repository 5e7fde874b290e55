//! Bookmark (wishlist) model

use serde::{Deserialize, Serialize};

/// Wishlist entry joined with live book data for display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BookmarkedBook {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub stock: i64,
    pub bookmarked_at: i64,
}
