//! Announcement model

use serde::{Deserialize, Serialize};

/// Announcement entity — shown publicly while now ∈ [starts_at, ends_at]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub starts_at: i64,
    pub ends_at: i64,
    pub created_at: i64,
}

/// Payload for creating an announcement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementCreate {
    pub title: String,
    pub body: String,
    pub starts_at: i64,
    pub ends_at: i64,
}

/// Payload for updating an announcement (None fields are left unchanged)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnouncementUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub starts_at: Option<i64>,
    pub ends_at: Option<i64>,
}
