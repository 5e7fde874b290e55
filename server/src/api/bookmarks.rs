//! Wishlist endpoints

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError};
use shared::models::BookmarkedBook;

use crate::auth::Identity;
use crate::db;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, AppError>;

#[derive(Debug, Deserialize)]
pub struct AddBookmark {
    pub book_id: i64,
}

/// GET /api/bookmarks
pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Vec<BookmarkedBook>> {
    let bookmarks = db::bookmarks::list(&state.pool, identity.user_id).await?;
    Ok(Json(bookmarks))
}

/// POST /api/bookmarks
pub async fn add(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(data): Json<AddBookmark>,
) -> ApiResult<ApiResponse<()>> {
    db::bookmarks::add(&state.pool, identity.user_id, data.book_id).await?;
    Ok(Json(ApiResponse::ok()))
}

/// DELETE /api/bookmarks/{book_id}
pub async fn remove(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(book_id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    db::bookmarks::remove(&state.pool, identity.user_id, book_id).await?;
    Ok(Json(ApiResponse::ok()))
}
