//! Workspace API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{
    WorkspaceCreate, WorkspaceNestedCreate, WorkspaceNestedUpdate, WorkspaceUpdate, WorkspaceView,
};

use crate::api::ensure_path_id;
use crate::core::ServerState;
use crate::services;
use crate::utils::{AppError, AppResult, ErrorCode, ValidatedJson};

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::WorkspaceNotFound, format!("Workspace {id} not found"))
}

/// GET /api/workspaces - all workspaces with rooms and devices
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<WorkspaceView>>> {
    let workspaces = services::workspace::list(&state.pool).await?;
    Ok(Json(workspaces))
}

/// GET /api/workspaces/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<WorkspaceView>> {
    let workspace = services::workspace::get_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(workspace))
}

/// POST /api/workspaces - scalars only
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<WorkspaceCreate>,
) -> AppResult<(StatusCode, Json<WorkspaceView>)> {
    let workspace = services::workspace::create(&state.pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(workspace)))
}

/// POST /api/workspaces/with-rooms - workspace, rooms and devices at once
pub async fn create_with_rooms(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<WorkspaceNestedCreate>,
) -> AppResult<(StatusCode, Json<WorkspaceView>)> {
    let workspace = services::workspace::create_with_children(&state.pool, &payload).await?;
    Ok((StatusCode::CREATED, Json(workspace)))
}

/// PUT /api/workspaces/{id} - overwrite scalars, children untouched
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<WorkspaceUpdate>,
) -> AppResult<StatusCode> {
    ensure_path_id(id, payload.id)?;
    if services::workspace::update(&state.pool, id, &payload).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// PUT /api/workspaces/{id}/with-rooms - reconcile the whole tree
pub async fn update_with_rooms(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<WorkspaceNestedUpdate>,
) -> AppResult<Json<WorkspaceView>> {
    ensure_path_id(id, payload.id)?;
    let reconciled = services::workspace::update_with_children(&state.pool, id, &payload).await?;
    Ok(Json(reconciled.workspace))
}

/// DELETE /api/workspaces/{id} - cascades to rooms, devices and bookings
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<StatusCode> {
    if services::workspace::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
