//! User database operations

use shared::error::ErrorCode;
use shared::models::{Role, User};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::auth::password;
use crate::error::{ServiceError, ServiceResult};

/// User row including credential material; never leaves the db layer
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub role: Role,
    pub created_at: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            display_name: row.display_name,
            role: row.role,
            created_at: row.created_at,
        }
    }
}

pub async fn create(
    pool: &SqlitePool,
    email: &str,
    password: &str,
    display_name: &str,
    role: Role,
) -> ServiceResult<User> {
    let hash = password::hash(password)?;
    let now = now_millis();

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO users (email, password_hash, display_name, role, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING id
        "#,
    )
    .bind(email)
    .bind(&hash)
    .bind(display_name)
    .bind(role)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if super::is_unique_violation(&e) {
            ServiceError::from(ErrorCode::EmailAlreadyRegistered)
        } else {
            e.into()
        }
    })?;

    Ok(User {
        id,
        email: email.to_string(),
        display_name: display_name.to_string(),
        role,
        created_at: now,
    })
}

pub async fn get(pool: &SqlitePool, user_id: i64) -> ServiceResult<User> {
    let user: Option<User> = sqlx::query_as(
        "SELECT id, email, display_name, role, created_at FROM users WHERE id = ?1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    user.ok_or_else(|| ErrorCode::UserNotFound.into())
}

/// Verify credentials, returning the user on success.
///
/// A missing user and a wrong password are indistinguishable to the caller,
/// which prevents email enumeration at login.
pub async fn verify_credentials(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> ServiceResult<User> {
    let row: Option<UserRow> = sqlx::query_as(
        "SELECT id, email, password_hash, display_name, role, created_at
         FROM users WHERE email = ?1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) if password::verify(password, &row.password_hash) => Ok(row.into()),
        _ => Err(ErrorCode::InvalidCredentials.into()),
    }
}

/// Seed the bootstrap admin account when the user table is empty
pub async fn seed_admin(pool: &SqlitePool, email: &str, password: &str) -> ServiceResult<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    create(pool, email, password, "Administrator", Role::Admin).await?;
    tracing::info!(email = email, "Bootstrap admin account created");
    Ok(())
}
