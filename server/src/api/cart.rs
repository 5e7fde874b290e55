//! Cart endpoints

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{ApiResponse, AppError};
use shared::models::{AddCartItem, CartLine};

use crate::auth::Identity;
use crate::db;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, AppError>;

/// GET /api/cart
pub async fn get(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Vec<CartLine>> {
    let lines = db::cart::get_cart(&state.pool, identity.user_id).await?;
    Ok(Json(lines))
}

/// POST /api/cart
pub async fn add(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(data): Json<AddCartItem>,
) -> ApiResult<Vec<CartLine>> {
    db::cart::add_item(&state.pool, identity.user_id, data.book_id, data.quantity).await?;
    let lines = db::cart::get_cart(&state.pool, identity.user_id).await?;
    Ok(Json(lines))
}

/// DELETE /api/cart/{book_id}
pub async fn remove(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(book_id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    db::cart::remove_item(&state.pool, identity.user_id, book_id).await?;
    Ok(Json(ApiResponse::ok()))
}
