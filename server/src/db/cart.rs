//! Cart database operations
//!
//! The cart never touches stock; stock is reserved only when the order is
//! placed, and availability is re-checked inside the placement transaction.

use shared::error::{AppError, ErrorCode};
use shared::models::{Book, CartLine};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::error::ServiceResult;

/// Joined cart row; book columns flattened for display mapping
#[derive(Debug, sqlx::FromRow)]
struct CartBookRow {
    #[sqlx(flatten)]
    book: Book,
    quantity: i64,
    added_at: i64,
}

/// Add a book to the user's cart, incrementing the quantity when the entry
/// already exists. Rejects quantities the current stock cannot cover (no
/// back-orders).
pub async fn add_item(
    pool: &SqlitePool,
    user_id: i64,
    book_id: i64,
    quantity: i64,
) -> ServiceResult<()> {
    if quantity < 1 {
        return Err(AppError::validation("quantity must be at least 1")
            .with_detail("field", "quantity")
            .into());
    }

    let stock: Option<i64> = sqlx::query_scalar("SELECT stock FROM books WHERE id = ?1")
        .bind(book_id)
        .fetch_optional(pool)
        .await?;
    let stock = stock.ok_or(ErrorCode::BookNotFound)?;

    let existing: Option<i64> = sqlx::query_scalar(
        "SELECT quantity FROM cart_entries WHERE user_id = ?1 AND book_id = ?2",
    )
    .bind(user_id)
    .bind(book_id)
    .fetch_optional(pool)
    .await?;

    if existing.unwrap_or(0) + quantity > stock {
        return Err(AppError::new(ErrorCode::InsufficientStock)
            .with_detail("book_id", book_id)
            .with_detail("available", stock)
            .into());
    }

    sqlx::query(
        r#"
        INSERT INTO cart_entries (user_id, book_id, quantity, added_at)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT (user_id, book_id)
        DO UPDATE SET quantity = quantity + excluded.quantity
        "#,
    )
    .bind(user_id)
    .bind(book_id)
    .bind(quantity)
    .bind(now_millis())
    .execute(pool)
    .await?;

    Ok(())
}

/// The user's cart joined with live book data; prices are resolved at read
/// time, never snapshotted.
pub async fn get_cart(pool: &SqlitePool, user_id: i64) -> ServiceResult<Vec<CartLine>> {
    let rows: Vec<CartBookRow> = sqlx::query_as(
        r#"
        SELECT b.id, b.title, b.author, b.genre, b.isbn, b.description, b.price,
               b.stock, b.on_sale, b.discount_percentage, b.discount_start,
               b.discount_end, b.created_at, b.updated_at,
               c.quantity, c.added_at
        FROM cart_entries c
        JOIN books b ON b.id = c.book_id
        WHERE c.user_id = ?1
        ORDER BY c.added_at, b.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let now = now_millis();
    Ok(rows
        .into_iter()
        .map(|row| CartLine {
            book_id: row.book.id,
            title: row.book.title.clone(),
            author: row.book.author.clone(),
            quantity: row.quantity,
            price: row.book.price,
            effective_price: row.book.effective_price(now),
            stock: row.book.stock,
            added_at: row.added_at,
        })
        .collect())
}

/// Remove a book from the user's cart
pub async fn remove_item(pool: &SqlitePool, user_id: i64, book_id: i64) -> ServiceResult<()> {
    let rows = sqlx::query("DELETE FROM cart_entries WHERE user_id = ?1 AND book_id = ?2")
        .bind(user_id)
        .bind(book_id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(ErrorCode::CartEntryNotFound.into());
    }
    Ok(())
}
