//! Device API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::models::{Device, DeviceCreate, DeviceQuery, DeviceUpdate};

use crate::api::ensure_path_id;
use crate::core::ServerState;
use crate::services;
use crate::utils::{AppError, AppResult, ErrorCode, ValidatedJson};

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::DeviceNotFound, format!("Device {id} not found"))
}

/// GET /api/devices?roomId=
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<DeviceQuery>,
) -> AppResult<Json<Vec<Device>>> {
    let devices = services::device::list(&state.pool, &query).await?;
    Ok(Json(devices))
}

/// GET /api/devices/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Device>> {
    let device = services::device::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(device))
}

/// POST /api/devices - also marks the room as equipped
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<DeviceCreate>,
) -> AppResult<(StatusCode, Json<Device>)> {
    let device = services::device::create(&state.pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(device)))
}

/// PUT /api/devices/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<DeviceUpdate>,
) -> AppResult<StatusCode> {
    ensure_path_id(id, payload.id)?;
    if services::device::update(&state.pool, id, &payload).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// DELETE /api/devices/{id}
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    if services::device::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
