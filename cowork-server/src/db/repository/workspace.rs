//! Workspace Repository

use super::{RepoError, RepoResult};
use shared::models::{Workspace, WorkspaceFields};
use sqlx::SqliteConnection;

const COLUMNS: &str = "id, name, description, address, city, latitude, longitude, version";

pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<Workspace>> {
    let workspaces =
        sqlx::query_as::<_, Workspace>(&format!("SELECT {COLUMNS} FROM workspace ORDER BY id"))
            .fetch_all(&mut *conn)
            .await?;
    Ok(workspaces)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Workspace>> {
    let workspace =
        sqlx::query_as::<_, Workspace>(&format!("SELECT {COLUMNS} FROM workspace WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
    Ok(workspace)
}

pub async fn count(conn: &mut SqliteConnection) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM workspace")
        .fetch_one(&mut *conn)
        .await?;
    Ok(n)
}

pub async fn create(conn: &mut SqliteConnection, data: &WorkspaceFields) -> RepoResult<Workspace> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO workspace (name, description, address, city, latitude, longitude) VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.address)
    .bind(&data.city)
    .bind(data.latitude)
    .bind(data.longitude)
    .fetch_one(&mut *conn)
    .await?;
    find_by_id(conn, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create workspace".into()))
}

/// Overwrite scalar fields; `false` when the row does not exist
///
/// Does not touch `version`; callers bump it once per logical write.
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    data: &WorkspaceFields,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE workspace SET name = ?1, description = ?2, address = ?3, city = ?4, latitude = ?5, longitude = ?6 WHERE id = ?7",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.address)
    .bind(&data.city)
    .bind(data.latitude)
    .bind(data.longitude)
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn bump_version(conn: &mut SqliteConnection, id: i64) -> RepoResult<()> {
    sqlx::query("UPDATE workspace SET version = version + 1 WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Bump the version of the workspace owning `room_id`
pub async fn bump_version_for_room(conn: &mut SqliteConnection, room_id: i64) -> RepoResult<()> {
    sqlx::query(
        "UPDATE workspace SET version = version + 1 WHERE id = (SELECT workspace_id FROM room WHERE id = ?)",
    )
    .bind(room_id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Delete a workspace; rooms, devices and bookings cascade
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM workspace WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}
