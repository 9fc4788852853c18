//! Room API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::models::{RoomCreate, RoomQuery, RoomUpdate, RoomView};

use crate::api::ensure_path_id;
use crate::core::ServerState;
use crate::services;
use crate::utils::{AppError, AppResult, ErrorCode, ValidatedJson};

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::RoomNotFound, format!("Room {id} not found"))
}

/// GET /api/rooms?workspaceId= - rooms with their devices
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<RoomQuery>,
) -> AppResult<Json<Vec<RoomView>>> {
    let rooms = services::room::list(&state.pool, &query).await?;
    Ok(Json(rooms))
}

/// GET /api/rooms/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<RoomView>> {
    let room = services::room::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(room))
}

/// POST /api/rooms
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<RoomCreate>,
) -> AppResult<(StatusCode, Json<RoomView>)> {
    let room = services::room::create(&state.pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// PUT /api/rooms/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<RoomUpdate>,
) -> AppResult<StatusCode> {
    ensure_path_id(id, payload.id)?;
    if services::room::update(&state.pool, id, &payload).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// DELETE /api/rooms/{id}
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    if services::room::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
