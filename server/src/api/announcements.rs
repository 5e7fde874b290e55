//! Announcement endpoints — public banner feed plus admin management

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{ApiResponse, AppError};
use shared::models::{Announcement, AnnouncementCreate, AnnouncementUpdate};

use crate::db;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, AppError>;

/// GET /api/announcements — currently active only
pub async fn active(State(state): State<AppState>) -> ApiResult<Vec<Announcement>> {
    let announcements = db::announcements::list_active(&state.pool).await?;
    Ok(Json(announcements))
}

/// GET /api/admin/announcements — full history
pub async fn all(State(state): State<AppState>) -> ApiResult<Vec<Announcement>> {
    let announcements = db::announcements::list_all(&state.pool).await?;
    Ok(Json(announcements))
}

/// POST /api/admin/announcements
pub async fn create(
    State(state): State<AppState>,
    Json(data): Json<AnnouncementCreate>,
) -> ApiResult<Announcement> {
    let announcement = db::announcements::create(&state.pool, &data).await?;
    Ok(Json(announcement))
}

/// PATCH /api/admin/announcements/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<AnnouncementUpdate>,
) -> ApiResult<Announcement> {
    let announcement = db::announcements::update(&state.pool, id, &data).await?;
    Ok(Json(announcement))
}

/// DELETE /api/admin/announcements/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    db::announcements::delete(&state.pool, id).await?;
    Ok(Json(ApiResponse::ok()))
}
