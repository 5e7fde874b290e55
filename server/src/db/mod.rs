//! Database access layer
//!
//! SQLite connection pool setup plus per-entity query modules. All queries are
//! runtime `sqlx::query`/`query_as` with raw SQL; write transactions that must
//! serialize (stock checks, status transitions) start with `BEGIN IMMEDIATE`.

pub mod announcements;
pub mod bookmarks;
pub mod books;
pub mod cart;
pub mod reviews;
pub mod users;

use shared::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::str::FromStr;
use std::time::Duration;

/// Open the SQLite pool with WAL mode, foreign keys, and a busy timeout,
/// then apply migrations.
pub async fn connect(db_path: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
        .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        // Wait for the write lock instead of failing immediately
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
    tracing::info!("Database ready (SQLite WAL, busy_timeout=5000ms)");

    Ok(pool)
}

/// Begin a write transaction that takes the write lock up front.
///
/// SQLite's deferred transactions upgrade to a write lock on the first write,
/// which can fail mid-transaction when another writer committed in between.
/// `BEGIN IMMEDIATE` serializes writers at the start, so stock checks inside
/// the transaction always see committed state.
pub async fn begin_immediate(pool: &SqlitePool) -> Result<Transaction<'_, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Whether this sqlx error is a UNIQUE constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Whether this sqlx error is a FOREIGN KEY constraint violation
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
