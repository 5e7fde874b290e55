//! Book catalog database operations

use shared::error::{AppError, ErrorCode};
use shared::models::{Book, BookCreate, BookQuery, BookUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::error::{ServiceError, ServiceResult};

const BOOK_COLUMNS: &str = "id, title, author, genre, isbn, description, price, stock, \
     on_sale, discount_percentage, discount_start, discount_end, created_at, updated_at";

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 200;

fn validate_pricing(
    price: f64,
    stock: i64,
    discount_percentage: Option<f64>,
) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::validation("price must be non-negative").with_detail("field", "price"));
    }
    if stock < 0 {
        return Err(AppError::validation("stock must be non-negative").with_detail("field", "stock"));
    }
    if let Some(pct) = discount_percentage {
        if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
            return Err(AppError::validation("discount_percentage must be between 0 and 100")
                .with_detail("field", "discount_percentage"));
        }
    }
    Ok(())
}

pub async fn list(pool: &SqlitePool, query: &BookQuery) -> ServiceResult<Vec<Book>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0).max(0);

    let books: Vec<Book> = sqlx::query_as(&format!(
        r#"
        SELECT {BOOK_COLUMNS} FROM books
        WHERE (?1 IS NULL OR title LIKE '%' || ?1 || '%' OR author LIKE '%' || ?1 || '%')
          AND (?2 IS NULL OR genre = ?2)
        ORDER BY title, id
        LIMIT ?3 OFFSET ?4
        "#
    ))
    .bind(&query.q)
    .bind(&query.genre)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(books)
}

pub async fn get(pool: &SqlitePool, book_id: i64) -> ServiceResult<Book> {
    let book: Option<Book> =
        sqlx::query_as(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?1"))
            .bind(book_id)
            .fetch_optional(pool)
            .await?;
    book.ok_or_else(|| ErrorCode::BookNotFound.into())
}

pub async fn create(pool: &SqlitePool, data: &BookCreate) -> ServiceResult<Book> {
    validate_pricing(data.price, data.stock, data.discount_percentage)?;
    let now = now_millis();

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO books (
            title, author, genre, isbn, description, price, stock,
            on_sale, discount_percentage, discount_start, discount_end,
            created_at, updated_at
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)
        RETURNING id
        "#,
    )
    .bind(&data.title)
    .bind(&data.author)
    .bind(&data.genre)
    .bind(&data.isbn)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.stock)
    .bind(data.on_sale)
    .bind(data.discount_percentage)
    .bind(data.discount_start)
    .bind(data.discount_end)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if super::is_unique_violation(&e) {
            ServiceError::from(ErrorCode::IsbnExists)
        } else {
            e.into()
        }
    })?;

    get(pool, id).await
}

pub async fn update(pool: &SqlitePool, book_id: i64, data: &BookUpdate) -> ServiceResult<Book> {
    validate_pricing(
        data.price.unwrap_or(0.0),
        data.stock.unwrap_or(0),
        data.discount_percentage,
    )?;

    let rows = sqlx::query(
        r#"
        UPDATE books SET
            title = COALESCE(?1, title),
            author = COALESCE(?2, author),
            genre = COALESCE(?3, genre),
            description = COALESCE(?4, description),
            price = COALESCE(?5, price),
            stock = COALESCE(?6, stock),
            on_sale = COALESCE(?7, on_sale),
            discount_percentage = COALESCE(?8, discount_percentage),
            discount_start = COALESCE(?9, discount_start),
            discount_end = COALESCE(?10, discount_end),
            updated_at = ?11
        WHERE id = ?12
        "#,
    )
    .bind(&data.title)
    .bind(&data.author)
    .bind(&data.genre)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.stock)
    .bind(data.on_sale)
    .bind(data.discount_percentage)
    .bind(data.discount_start)
    .bind(data.discount_end)
    .bind(now_millis())
    .bind(book_id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(ErrorCode::BookNotFound.into());
    }
    get(pool, book_id).await
}

/// Delete a book from the catalog.
///
/// Fails with `BookInOrderHistory` when any order item references the book;
/// order history is immutable. Cart entries, bookmarks, and reviews cascade.
pub async fn delete(pool: &SqlitePool, book_id: i64) -> ServiceResult<()> {
    let rows = sqlx::query("DELETE FROM books WHERE id = ?1")
        .bind(book_id)
        .execute(pool)
        .await
        .map_err(|e| {
            if super::is_foreign_key_violation(&e) {
                ServiceError::from(ErrorCode::BookInOrderHistory)
            } else {
                e.into()
            }
        })?;

    if rows.rows_affected() == 0 {
        return Err(ErrorCode::BookNotFound.into());
    }
    Ok(())
}

/// Distinct genres currently in the catalog, for storefront filters
pub async fn genres(pool: &SqlitePool) -> ServiceResult<Vec<String>> {
    let genres: Vec<(String,)> =
        sqlx::query_as("SELECT DISTINCT genre FROM books ORDER BY genre")
            .fetch_all(pool)
            .await?;
    Ok(genres.into_iter().map(|(g,)| g).collect())
}
