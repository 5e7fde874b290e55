//! Catalog endpoints — public browsing plus admin CRUD

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::error::{ApiResponse, AppError};
use shared::models::{Book, BookCreate, BookQuery, BookUpdate};

use crate::db;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, AppError>;

/// GET /api/books
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> ApiResult<Vec<Book>> {
    let books = db::books::list(&state.pool, &query).await?;
    Ok(Json(books))
}

/// GET /api/books/{id}
pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Book> {
    let book = db::books::get(&state.pool, id).await?;
    Ok(Json(book))
}

/// GET /api/genres
pub async fn genres(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    let genres = db::books::genres(&state.pool).await?;
    Ok(Json(genres))
}

/// POST /api/admin/books
pub async fn create(
    State(state): State<AppState>,
    Json(data): Json<BookCreate>,
) -> ApiResult<Book> {
    let book = db::books::create(&state.pool, &data).await?;
    Ok(Json(book))
}

/// PATCH /api/admin/books/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(data): Json<BookUpdate>,
) -> ApiResult<Book> {
    let book = db::books::update(&state.pool, id, &data).await?;
    Ok(Json(book))
}

/// DELETE /api/admin/books/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    db::books::delete(&state.pool, id).await?;
    Ok(Json(ApiResponse::ok()))
}
