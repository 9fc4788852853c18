//! Room service

use shared::models::{RoomCreate, RoomQuery, RoomUpdate, RoomView};
use sqlx::SqlitePool;

use super::projection;
use crate::db::repository::room::{self, RoomValues};
use crate::db::repository::{RepoError, RepoResult, workspace};

pub async fn list(pool: &SqlitePool, query: &RoomQuery) -> RepoResult<Vec<RoomView>> {
    let mut tx = pool.begin().await?;
    let list = projection::list_rooms(&mut tx, query.workspace_id).await?;
    tx.commit().await?;
    Ok(list)
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<RoomView>> {
    let mut tx = pool.begin().await?;
    let view = projection::find_room(&mut tx, id).await?;
    tx.commit().await?;
    Ok(view)
}

/// Create a room without devices; the workspace must exist
pub async fn create(pool: &SqlitePool, data: &RoomCreate) -> RepoResult<RoomView> {
    let values = RoomValues {
        name: &data.name,
        capacity: data.capacity,
        price_per_hour: data.price_per_hour,
    };

    let mut tx = pool.begin().await?;
    let id = room::insert(&mut tx, data.workspace_id, values).await?;
    workspace::bump_version(&mut tx, data.workspace_id).await?;
    let view = projection::find_room(&mut tx, id)
        .await?
        .ok_or_else(|| RepoError::Database(format!("Room {id} vanished after insert")))?;
    tx.commit().await?;

    tracing::info!(room_id = id, workspace_id = data.workspace_id, "Room created");
    Ok(view)
}

/// Overwrite scalar fields; `false` when the room does not exist
///
/// Changing `workspace_id` moves the room; both workspaces get a new version.
pub async fn update(pool: &SqlitePool, id: i64, data: &RoomUpdate) -> RepoResult<bool> {
    let values = RoomValues {
        name: &data.name,
        capacity: data.capacity,
        price_per_hour: data.price_per_hour,
    };

    let mut tx = pool.begin().await?;
    let Some(existing) = room::find_by_id(&mut tx, id).await? else {
        return Ok(false);
    };
    room::update(&mut tx, id, data.workspace_id, values).await?;
    workspace::bump_version(&mut tx, existing.workspace_id).await?;
    if existing.workspace_id != data.workspace_id {
        workspace::bump_version(&mut tx, data.workspace_id).await?;
    }
    tx.commit().await?;
    Ok(true)
}

/// Delete a room with its devices and bookings; `false` when already absent
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;
    let Some(existing) = room::find_by_id(&mut tx, id).await? else {
        return Ok(false);
    };
    room::delete(&mut tx, id).await?;
    workspace::bump_version(&mut tx, existing.workspace_id).await?;
    tx.commit().await?;

    tracing::info!(room_id = id, workspace_id = existing.workspace_id, "Room deleted");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;
    use crate::services::workspace as workspace_service;
    use serde_json::json;
    use shared::models::WorkspaceCreate;

    async fn new_workspace(pool: &SqlitePool, name: &str) -> i64 {
        let payload: WorkspaceCreate = serde_json::from_value(json!({"name": name})).unwrap();
        workspace_service::create(pool, &payload).await.unwrap().id
    }

    fn room_create(workspace_id: i64, name: &str) -> RoomCreate {
        serde_json::from_value(json!({
            "workspaceId": workspace_id, "name": name, "capacity": 6, "pricePerHour": 75
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_filter_by_workspace() {
        let pool = test_pool().await;
        let ws1 = new_workspace(&pool, "First").await;
        let ws2 = new_workspace(&pool, "Second").await;

        let created = create(&pool, &room_create(ws1, "Meeting Room A")).await.unwrap();
        assert!(!created.has_devices);
        create(&pool, &room_create(ws2, "Private Office B")).await.unwrap();

        let all = list(&pool, &RoomQuery::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        let first = list(&pool, &RoomQuery { workspace_id: Some(ws1) }).await.unwrap();
        assert_eq!(first, vec![created]);

        let ws = workspace_service::get_by_id(&pool, ws1).await.unwrap().unwrap();
        assert_eq!(ws.version, 2);
    }

    #[tokio::test]
    async fn test_create_in_missing_workspace_is_constraint() {
        let pool = test_pool().await;
        let err = create(&pool, &room_create(99, "Room A")).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_update_moves_room() {
        let pool = test_pool().await;
        let ws1 = new_workspace(&pool, "First").await;
        let ws2 = new_workspace(&pool, "Second").await;
        let room = create(&pool, &room_create(ws1, "Room A")).await.unwrap();

        let payload: RoomUpdate = serde_json::from_value(json!({
            "id": room.id, "workspaceId": ws2, "name": "Room A+", "capacity": 8, "pricePerHour": 80
        }))
        .unwrap();
        assert!(update(&pool, room.id, &payload).await.unwrap());
        assert!(!update(&pool, room.id + 1, &payload).await.unwrap());

        let moved = get_by_id(&pool, room.id).await.unwrap().unwrap();
        assert_eq!(moved.workspace_id, ws2);
        assert_eq!(moved.capacity, 8);
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let pool = test_pool().await;
        assert!(!delete(&pool, 1).await.unwrap());
    }
}
