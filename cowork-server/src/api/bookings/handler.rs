//! Booking API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::models::{Booking, BookingCreate, BookingQuery, BookingUpdate};

use crate::api::ensure_path_id;
use crate::core::ServerState;
use crate::services;
use crate::utils::{AppError, AppResult, ErrorCode, ValidatedJson};

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::BookingNotFound, format!("Booking {id} not found"))
}

/// GET /api/bookings?roomId=&userId=
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    let bookings = services::booking::list(&state.pool, &query).await?;
    Ok(Json(bookings))
}

/// GET /api/bookings/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Booking>> {
    let booking = services::booking::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(booking))
}

/// POST /api/bookings
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<BookingCreate>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let booking = services::booking::create(&state.pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// PUT /api/bookings/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<BookingUpdate>,
) -> AppResult<StatusCode> {
    ensure_path_id(id, payload.id)?;
    if services::booking::update(&state.pool, id, &payload).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// DELETE /api/bookings/{id}
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    if services::booking::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
