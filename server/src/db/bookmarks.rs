//! Bookmark (wishlist) database operations

use shared::error::ErrorCode;
use shared::models::BookmarkedBook;
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::error::ServiceResult;

/// Bookmark a book. Idempotent: bookmarking twice is a no-op.
pub async fn add(pool: &SqlitePool, user_id: i64, book_id: i64) -> ServiceResult<()> {
    let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM books WHERE id = ?1")
        .bind(book_id)
        .fetch_optional(pool)
        .await?;
    if exists.is_none() {
        return Err(ErrorCode::BookNotFound.into());
    }

    sqlx::query(
        r#"
        INSERT INTO bookmarks (user_id, book_id, bookmarked_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT (user_id, book_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(book_id)
    .bind(now_millis())
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn remove(pool: &SqlitePool, user_id: i64, book_id: i64) -> ServiceResult<()> {
    let rows = sqlx::query("DELETE FROM bookmarks WHERE user_id = ?1 AND book_id = ?2")
        .bind(user_id)
        .bind(book_id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(ErrorCode::BookmarkNotFound.into());
    }
    Ok(())
}

pub async fn list(pool: &SqlitePool, user_id: i64) -> ServiceResult<Vec<BookmarkedBook>> {
    let bookmarks: Vec<BookmarkedBook> = sqlx::query_as(
        r#"
        SELECT b.id AS book_id, b.title, b.author, b.price, b.stock, m.bookmarked_at
        FROM bookmarks m
        JOIN books b ON b.id = m.book_id
        WHERE m.user_id = ?1
        ORDER BY m.bookmarked_at DESC, b.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(bookmarks)
}
