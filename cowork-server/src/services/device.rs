//! Device service
//!
//! Every write refreshes `has_devices` on the rooms it touches.

use shared::models::{Device, DeviceCreate, DeviceQuery, DeviceUpdate};
use sqlx::SqlitePool;

use crate::db::repository::device::{self, DeviceValues};
use crate::db::repository::{RepoError, RepoResult, room, workspace};

pub async fn list(pool: &SqlitePool, query: &DeviceQuery) -> RepoResult<Vec<Device>> {
    let mut conn = pool.acquire().await?;
    device::find_all(&mut conn, query.room_id).await
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Device>> {
    let mut conn = pool.acquire().await?;
    device::find_by_id(&mut conn, id).await
}

pub async fn create(pool: &SqlitePool, data: &DeviceCreate) -> RepoResult<Device> {
    let values = DeviceValues {
        name: &data.name,
        extra_cost_per_hour: data.extra_cost_per_hour,
    };

    let mut tx = pool.begin().await?;
    let id = device::insert(&mut tx, data.room_id, values).await?;
    room::refresh_has_devices(&mut tx, data.room_id).await?;
    workspace::bump_version_for_room(&mut tx, data.room_id).await?;
    let created = device::find_by_id(&mut tx, id)
        .await?
        .ok_or_else(|| RepoError::Database(format!("Device {id} vanished after insert")))?;
    tx.commit().await?;

    tracing::info!(device_id = id, room_id = data.room_id, "Device created");
    Ok(created)
}

/// Overwrite scalar fields; `false` when the device does not exist
pub async fn update(pool: &SqlitePool, id: i64, data: &DeviceUpdate) -> RepoResult<bool> {
    let values = DeviceValues {
        name: &data.name,
        extra_cost_per_hour: data.extra_cost_per_hour,
    };

    let mut tx = pool.begin().await?;
    let Some(existing) = device::find_by_id(&mut tx, id).await? else {
        return Ok(false);
    };
    device::update(&mut tx, id, data.room_id, values).await?;
    for room_id in touched_rooms(existing.room_id, data.room_id) {
        room::refresh_has_devices(&mut tx, room_id).await?;
        workspace::bump_version_for_room(&mut tx, room_id).await?;
    }
    tx.commit().await?;
    Ok(true)
}

/// Delete a device; `false` when already absent
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;
    let Some(existing) = device::find_by_id(&mut tx, id).await? else {
        return Ok(false);
    };
    device::delete(&mut tx, id).await?;
    room::refresh_has_devices(&mut tx, existing.room_id).await?;
    workspace::bump_version_for_room(&mut tx, existing.room_id).await?;
    tx.commit().await?;

    tracing::info!(device_id = id, room_id = existing.room_id, "Device deleted");
    Ok(true)
}

fn touched_rooms(old: i64, new: i64) -> Vec<i64> {
    if old == new { vec![old] } else { vec![old, new] }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;
    use crate::services::room as room_service;
    use serde_json::json;
    use shared::models::{RoomCreate, WorkspaceCreate};

    async fn two_rooms(pool: &SqlitePool) -> (i64, i64) {
        let ws: WorkspaceCreate = serde_json::from_value(json!({"name": "Hub"})).unwrap();
        let ws = crate::services::workspace::create(pool, &ws).await.unwrap().id;
        let mut ids = Vec::new();
        for name in ["Room A", "Room B"] {
            let payload: RoomCreate = serde_json::from_value(json!({
                "workspaceId": ws, "name": name, "capacity": 4, "pricePerHour": 10
            }))
            .unwrap();
            ids.push(room_service::create(pool, &payload).await.unwrap().id);
        }
        (ids[0], ids[1])
    }

    async fn has_devices(pool: &SqlitePool, room_id: i64) -> bool {
        room_service::get_by_id(pool, room_id)
            .await
            .unwrap()
            .unwrap()
            .has_devices
    }

    async fn stored_flag(pool: &SqlitePool, room_id: i64) -> bool {
        let mut conn = pool.acquire().await.unwrap();
        room::find_by_id(&mut conn, room_id)
            .await
            .unwrap()
            .unwrap()
            .has_devices
    }

    #[tokio::test]
    async fn test_create_sets_has_devices() {
        let pool = test_pool().await;
        let (a, _) = two_rooms(&pool).await;
        assert!(!stored_flag(&pool, a).await);

        let payload: DeviceCreate = serde_json::from_value(json!({
            "roomId": a, "name": "Projector", "extraCostPerHour": 20
        }))
        .unwrap();
        let created = create(&pool, &payload).await.unwrap();
        assert_eq!(created.room_id, a);
        assert!(stored_flag(&pool, a).await);
        assert!(has_devices(&pool, a).await);
    }

    #[tokio::test]
    async fn test_move_refreshes_both_rooms() {
        let pool = test_pool().await;
        let (a, b) = two_rooms(&pool).await;
        let payload: DeviceCreate = serde_json::from_value(json!({
            "roomId": a, "name": "Monitor", "extraCostPerHour": 15
        }))
        .unwrap();
        let monitor = create(&pool, &payload).await.unwrap();

        let moved: DeviceUpdate = serde_json::from_value(json!({
            "roomId": b, "name": "Monitor", "extraCostPerHour": 15
        }))
        .unwrap();
        assert!(update(&pool, monitor.id, &moved).await.unwrap());
        assert!(!stored_flag(&pool, a).await);
        assert!(stored_flag(&pool, b).await);

        let listed = list(&pool, &DeviceQuery { room_id: Some(b) }).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_clears_has_devices() {
        let pool = test_pool().await;
        let (a, _) = two_rooms(&pool).await;
        let payload: DeviceCreate = serde_json::from_value(json!({
            "roomId": a, "name": "Whiteboard", "extraCostPerHour": 10
        }))
        .unwrap();
        let board = create(&pool, &payload).await.unwrap();

        assert!(delete(&pool, board.id).await.unwrap());
        assert!(!stored_flag(&pool, a).await);
        assert!(!delete(&pool, board.id).await.unwrap());
        assert!(get_by_id(&pool, board.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_in_missing_room_is_constraint() {
        let pool = test_pool().await;
        let payload: DeviceCreate = serde_json::from_value(json!({
            "roomId": 12, "name": "Projector", "extraCostPerHour": 20
        }))
        .unwrap();
        let err = create(&pool, &payload).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[test]
    fn test_touched_rooms() {
        assert_eq!(touched_rooms(1, 1), vec![1]);
        assert_eq!(touched_rooms(1, 2), vec![1, 2]);
    }
}
