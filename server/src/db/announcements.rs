//! Announcement database operations

use shared::error::{AppError, ErrorCode};
use shared::models::{Announcement, AnnouncementCreate, AnnouncementUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

use crate::error::ServiceResult;

const COLUMNS: &str = "id, title, body, starts_at, ends_at, created_at";

/// Announcements whose display window contains now (storefront view)
pub async fn list_active(pool: &SqlitePool) -> ServiceResult<Vec<Announcement>> {
    let now = now_millis();
    let rows: Vec<Announcement> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM announcements
         WHERE starts_at <= ?1 AND ends_at >= ?1
         ORDER BY starts_at DESC"
    ))
    .bind(now)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// All announcements, including expired and scheduled ones (admin view)
pub async fn list_all(pool: &SqlitePool) -> ServiceResult<Vec<Announcement>> {
    let rows: Vec<Announcement> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM announcements ORDER BY starts_at DESC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: &AnnouncementCreate) -> ServiceResult<Announcement> {
    if data.ends_at < data.starts_at {
        return Err(AppError::validation("ends_at must not precede starts_at").into());
    }

    let now = now_millis();
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO announcements (title, body, starts_at, ends_at, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING id
        "#,
    )
    .bind(&data.title)
    .bind(&data.body)
    .bind(data.starts_at)
    .bind(data.ends_at)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(Announcement {
        id,
        title: data.title.clone(),
        body: data.body.clone(),
        starts_at: data.starts_at,
        ends_at: data.ends_at,
        created_at: now,
    })
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: &AnnouncementUpdate,
) -> ServiceResult<Announcement> {
    let rows = sqlx::query(
        r#"
        UPDATE announcements SET
            title = COALESCE(?1, title),
            body = COALESCE(?2, body),
            starts_at = COALESCE(?3, starts_at),
            ends_at = COALESCE(?4, ends_at)
        WHERE id = ?5
        "#,
    )
    .bind(&data.title)
    .bind(&data.body)
    .bind(data.starts_at)
    .bind(data.ends_at)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(ErrorCode::AnnouncementNotFound.into());
    }

    let row: Announcement =
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM announcements WHERE id = ?1"))
            .bind(id)
            .fetch_one(pool)
            .await?;
    Ok(row)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> ServiceResult<()> {
    let rows = sqlx::query("DELETE FROM announcements WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(ErrorCode::AnnouncementNotFound.into());
    }
    Ok(())
}
