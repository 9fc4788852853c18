//! Booking Repository

use super::{RepoError, RepoResult, cents};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{Booking, BookingQuery, money};
use sqlx::SqliteConnection;

const COLUMNS: &str = "id, user_id, room_id, start_time, end_time, total_price_cents";

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: i64,
    user_id: String,
    room_id: i64,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    total_price_cents: i64,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            user_id: row.user_id,
            room_id: row.room_id,
            start_time: row.start_time,
            end_time: row.end_time,
            total_price: money::from_cents(row.total_price_cents),
        }
    }
}

/// Booking values written by create and update
#[derive(Debug, Clone, Copy)]
pub struct BookingValues<'a> {
    pub user_id: &'a str,
    pub room_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_price: Decimal,
}

pub async fn find_all(conn: &mut SqliteConnection, query: &BookingQuery) -> RepoResult<Vec<Booking>> {
    let rows = sqlx::query_as::<_, BookingRow>(&format!(
        "SELECT {COLUMNS} FROM booking
         WHERE (?1 IS NULL OR room_id = ?1) AND (?2 IS NULL OR user_id = ?2)
         ORDER BY start_time, id"
    ))
    .bind(query.room_id)
    .bind(query.user_id.as_deref())
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows.into_iter().map(Booking::from).collect())
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Booking>> {
    let row = sqlx::query_as::<_, BookingRow>(&format!("SELECT {COLUMNS} FROM booking WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.map(Booking::from))
}

pub async fn create(conn: &mut SqliteConnection, values: BookingValues<'_>) -> RepoResult<Booking> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO booking (user_id, room_id, start_time, end_time, total_price_cents) VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(values.user_id)
    .bind(values.room_id)
    .bind(values.start_time)
    .bind(values.end_time)
    .bind(cents("totalPrice", values.total_price)?)
    .fetch_one(&mut *conn)
    .await?;
    find_by_id(conn, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create booking".into()))
}

/// Overwrite every field; `false` when the row does not exist
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    values: BookingValues<'_>,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE booking SET user_id = ?1, room_id = ?2, start_time = ?3, end_time = ?4, total_price_cents = ?5 WHERE id = ?6",
    )
    .bind(values.user_id)
    .bind(values.room_id)
    .bind(values.start_time)
    .bind(values.end_time)
    .bind(cents("totalPrice", values.total_price)?)
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM booking WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}
