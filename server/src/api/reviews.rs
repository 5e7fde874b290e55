//! Review endpoints

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::error::{ApiResponse, AppError};
use shared::models::{Review, ReviewCreate, ReviewWithAuthor};

use crate::auth::Identity;
use crate::db;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, AppError>;

#[derive(Debug, Deserialize)]
pub struct CreateReview {
    pub book_id: i64,
    pub comment: String,
    pub rating: Option<i64>,
}

/// GET /api/books/{id}/reviews
pub async fn list(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
) -> ApiResult<Vec<ReviewWithAuthor>> {
    let reviews = db::reviews::list_by_book(&state.pool, book_id).await?;
    Ok(Json(reviews))
}

/// POST /api/reviews
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(data): Json<CreateReview>,
) -> ApiResult<Review> {
    let payload = ReviewCreate {
        comment: data.comment,
        rating: data.rating,
    };
    let review = db::reviews::create(&state.pool, identity.user_id, data.book_id, &payload).await?;
    Ok(Json(review))
}

/// DELETE /api/reviews/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(review_id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    db::reviews::delete(&state.pool, review_id, identity.user_id, identity.role).await?;
    Ok(Json(ApiResponse::ok()))
}
