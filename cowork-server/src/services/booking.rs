//! Booking service
//!
//! Plain pass-through CRUD. No availability or price checks.

use shared::models::{Booking, BookingCreate, BookingQuery, BookingUpdate};
use sqlx::SqlitePool;

use crate::db::repository::RepoResult;
use crate::db::repository::booking::{self, BookingValues};

pub async fn list(pool: &SqlitePool, query: &BookingQuery) -> RepoResult<Vec<Booking>> {
    let mut conn = pool.acquire().await?;
    booking::find_all(&mut conn, query).await
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Booking>> {
    let mut conn = pool.acquire().await?;
    booking::find_by_id(&mut conn, id).await
}

pub async fn create(pool: &SqlitePool, data: &BookingCreate) -> RepoResult<Booking> {
    let mut conn = pool.acquire().await?;
    let created = booking::create(
        &mut conn,
        BookingValues {
            user_id: &data.user_id,
            room_id: data.room_id,
            start_time: data.start_time,
            end_time: data.end_time,
            total_price: data.total_price,
        },
    )
    .await?;
    tracing::info!(
        booking_id = created.id,
        room_id = created.room_id,
        user_id = %created.user_id,
        "Booking created"
    );
    Ok(created)
}

/// Overwrite every field; `false` when the booking does not exist
pub async fn update(pool: &SqlitePool, id: i64, data: &BookingUpdate) -> RepoResult<bool> {
    let mut conn = pool.acquire().await?;
    booking::update(
        &mut conn,
        id,
        BookingValues {
            user_id: &data.user_id,
            room_id: data.room_id,
            start_time: data.start_time,
            end_time: data.end_time,
            total_price: data.total_price,
        },
    )
    .await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut conn = pool.acquire().await?;
    booking::delete(&mut conn, id).await
}
