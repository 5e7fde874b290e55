//! Review database operations
//!
//! Review creation is gated by the eligibility check in [`crate::orders`]:
//! only users with a completed order containing the book may review it.

use shared::error::{AppError, ErrorCode};
use shared::models::{Review, ReviewCreate, ReviewWithAuthor, Role};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::error::ServiceResult;
use crate::orders;

pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    book_id: i64,
    data: &ReviewCreate,
) -> ServiceResult<Review> {
    if data.comment.trim().is_empty() {
        return Err(AppError::validation("comment must not be empty")
            .with_detail("field", "comment")
            .into());
    }
    if let Some(rating) = data.rating {
        if !(1..=5).contains(&rating) {
            return Err(ErrorCode::InvalidRating.into());
        }
    }

    let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM books WHERE id = ?1")
        .bind(book_id)
        .fetch_optional(pool)
        .await?;
    if exists.is_none() {
        return Err(ErrorCode::BookNotFound.into());
    }

    if !orders::check_eligibility(pool, user_id, book_id).await? {
        return Err(ErrorCode::ReviewNotEligible.into());
    }

    let now = now_millis();
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO reviews (user_id, book_id, comment, rating, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(book_id)
    .bind(&data.comment)
    .bind(data.rating)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(Review {
        id,
        user_id,
        book_id,
        comment: data.comment.clone(),
        rating: data.rating,
        created_at: now,
    })
}

pub async fn list_by_book(
    pool: &SqlitePool,
    book_id: i64,
) -> ServiceResult<Vec<ReviewWithAuthor>> {
    let reviews: Vec<ReviewWithAuthor> = sqlx::query_as(
        r#"
        SELECT r.id, r.user_id, u.display_name, r.comment, r.rating, r.created_at
        FROM reviews r
        JOIN users u ON u.id = r.user_id
        WHERE r.book_id = ?1
        ORDER BY r.created_at DESC, r.id
        "#,
    )
    .bind(book_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

/// Delete a review. Allowed for the review's owner and for staff.
pub async fn delete(
    pool: &SqlitePool,
    review_id: i64,
    caller_id: i64,
    caller_role: Role,
) -> ServiceResult<()> {
    let owner: Option<i64> = sqlx::query_scalar("SELECT user_id FROM reviews WHERE id = ?1")
        .bind(review_id)
        .fetch_optional(pool)
        .await?;
    let owner = owner.ok_or(ErrorCode::ReviewNotFound)?;

    if owner != caller_id && !caller_role.is_staff() {
        return Err(AppError::forbidden("cannot delete another user's review").into());
    }

    sqlx::query("DELETE FROM reviews WHERE id = ?1")
        .bind(review_id)
        .execute(pool)
        .await?;
    Ok(())
}
