//! Review model

use serde::{Deserialize, Serialize};

/// Review entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub comment: String,
    /// Star rating 1-5, optional
    pub rating: Option<i64>,
    pub created_at: i64,
}

/// Review joined with the author's display name for listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReviewWithAuthor {
    pub id: i64,
    pub user_id: i64,
    pub display_name: String,
    pub comment: String,
    pub rating: Option<i64>,
    pub created_at: i64,
}

/// Payload for creating a review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub comment: String,
    pub rating: Option<i64>,
}
