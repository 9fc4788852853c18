//! Workspace service
//!
//! Plain CRUD plus the nested create/update paths. Each write runs in its
//! own transaction.

use shared::error::ErrorCode;
use shared::models::{
    WorkspaceCreate, WorkspaceNestedCreate, WorkspaceNestedUpdate, WorkspaceUpdate, WorkspaceView,
};
use sqlx::SqlitePool;

use super::projection;
use super::reconcile::{self, ReconcileStats};
use crate::db::repository::{RepoError, RepoResult, workspace};

/// Confirmed result of a nested update
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub workspace: WorkspaceView,
    pub stats: ReconcileStats,
}

/// All workspaces with their trees, read from one snapshot
pub async fn list(pool: &SqlitePool) -> RepoResult<Vec<WorkspaceView>> {
    let mut tx = pool.begin().await?;
    let list = projection::list_workspaces(&mut tx).await?;
    tx.commit().await?;
    Ok(list)
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<WorkspaceView>> {
    let mut tx = pool.begin().await?;
    let view = projection::find_workspace(&mut tx, id).await?;
    tx.commit().await?;
    Ok(view)
}

/// Create a workspace without rooms
pub async fn create(pool: &SqlitePool, data: &WorkspaceCreate) -> RepoResult<WorkspaceView> {
    let mut conn = pool.acquire().await?;
    let ws = workspace::create(&mut conn, &data.fields()).await?;
    tracing::info!(workspace_id = ws.id, name = %ws.name, "Workspace created");
    Ok(WorkspaceView::new(ws, Vec::new()))
}

/// Create a workspace with its rooms and devices in one transaction
pub async fn create_with_children(
    pool: &SqlitePool,
    data: &WorkspaceNestedCreate,
) -> RepoResult<WorkspaceView> {
    let mut tx = pool.begin().await?;
    let (id, stats) = reconcile::apply_nested_create(&mut tx, &data.fields(), &data.rooms).await?;
    let view = projection::find_workspace(&mut tx, id)
        .await?
        .ok_or_else(|| RepoError::Database(format!("Workspace {id} vanished after insert")))?;
    tx.commit().await?;

    tracing::info!(
        workspace_id = id,
        rooms_inserted = stats.rooms_inserted,
        devices_inserted = stats.devices_inserted,
        "Workspace created with children"
    );
    Ok(view)
}

/// Overwrite scalar fields; `false` when the workspace does not exist
pub async fn update(pool: &SqlitePool, id: i64, data: &WorkspaceUpdate) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;
    let updated = workspace::update(&mut tx, id, &data.fields()).await?;
    if updated {
        workspace::bump_version(&mut tx, id).await?;
    }
    tx.commit().await?;
    Ok(updated)
}

/// Reconcile the stored tree with `data` and return the confirmed view
pub async fn update_with_children(
    pool: &SqlitePool,
    id: i64,
    data: &WorkspaceNestedUpdate,
) -> RepoResult<Reconciled> {
    let mut tx = pool.begin().await?;
    let stats = reconcile::apply_nested_update(&mut tx, id, data).await?;
    tx.commit().await?;

    tracing::info!(
        workspace_id = id,
        workspace_updated = stats.workspace_updated,
        rooms_inserted = stats.rooms_inserted,
        rooms_updated = stats.rooms_updated,
        rooms_deleted = stats.rooms_deleted,
        devices_inserted = stats.devices_inserted,
        devices_updated = stats.devices_updated,
        devices_deleted = stats.devices_deleted,
        "Workspace reconciled"
    );

    let workspace = get_by_id(pool, id).await?.ok_or_else(|| {
        RepoError::not_found(ErrorCode::WorkspaceNotFound, format!("Workspace {id} not found"))
    })?;
    Ok(Reconciled { workspace, stats })
}

/// Delete a workspace and its whole tree; `false` when already absent
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut conn = pool.acquire().await?;
    let deleted = workspace::delete(&mut conn, id).await?;
    if deleted {
        tracing::info!(workspace_id = id, "Workspace deleted");
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;
    use crate::services::{device, room};
    use rust_decimal::Decimal;
    use serde_json::json;

    async fn create_hub(pool: &SqlitePool) -> WorkspaceView {
        let payload: WorkspaceNestedCreate = serde_json::from_value(json!({
            "name": "Hub",
            "rooms": [{
                "name": "A", "capacity": 4, "pricePerHour": 50,
                "devices": [{"name": "TV", "extraCostPerHour": 5}]
            }]
        }))
        .unwrap();
        create_with_children(pool, &payload).await.unwrap()
    }

    fn nested(value: serde_json::Value) -> WorkspaceNestedUpdate {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_hub_with_room_and_device() {
        let pool = test_pool().await;
        let hub = create_hub(&pool).await;

        assert_eq!(hub.rooms.len(), 1);
        let room = &hub.rooms[0];
        assert!(room.id > 0);
        assert!(room.has_devices);
        assert_eq!(room.devices.len(), 1);
        assert!(room.devices[0].id > 0);
        assert_eq!(room.devices[0].extra_cost_per_hour, Decimal::from(5));
    }

    #[tokio::test]
    async fn test_update_room_in_place_drops_device() {
        let pool = test_pool().await;
        let hub = create_hub(&pool).await;
        let a = hub.rooms[0].id;

        let result = update_with_children(
            &pool,
            hub.id,
            &nested(json!({
                "name": "Hub",
                "rooms": [{"id": a, "name": "A2", "capacity": 4, "pricePerHour": 60, "devices": []}]
            })),
        )
        .await
        .unwrap();

        let rooms = &result.workspace.rooms;
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, a);
        assert_eq!(rooms[0].name, "A2");
        assert_eq!(rooms[0].price_per_hour, Decimal::from(60));
        assert!(rooms[0].devices.is_empty());
        assert!(!rooms[0].has_devices);
        assert_eq!(result.stats.devices_deleted, 1);

        // stored flag agrees with the view
        let stored = room::get_by_id(&pool, a).await.unwrap().unwrap();
        assert!(!stored.has_devices);
    }

    #[tokio::test]
    async fn test_update_with_empty_rooms_clears_tree() {
        let pool = test_pool().await;
        let hub = create_hub(&pool).await;
        let a = hub.rooms[0].id;
        let tv = hub.rooms[0].devices[0].id;

        let result = update_with_children(
            &pool,
            hub.id,
            &nested(json!({"name": "Hub Central", "city": "Giza", "rooms": []})),
        )
        .await
        .unwrap();

        assert!(result.workspace.rooms.is_empty());
        assert_eq!(result.workspace.name, "Hub Central");
        assert_eq!(result.workspace.city, "Giza");
        assert_eq!(result.workspace.version, hub.version + 1);
        assert!(room::get_by_id(&pool, a).await.unwrap().is_none());
        assert!(device::get_by_id(&pool, tv).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_room_ids_match_payload() {
        let pool = test_pool().await;
        let hub = create_hub(&pool).await;
        let a = hub.rooms[0].id;

        let result = update_with_children(
            &pool,
            hub.id,
            &nested(json!({
                "name": "Hub",
                "rooms": [
                    {"id": a, "name": "A", "capacity": 4, "pricePerHour": 50},
                    {"name": "B", "capacity": 2, "pricePerHour": 20},
                    {"name": "C", "capacity": 3, "pricePerHour": 25}
                ]
            })),
        )
        .await
        .unwrap();

        let ids: Vec<i64> = result.workspace.rooms.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], a);
        assert!(ids[1] > a && ids[2] > ids[1]);
        // devices omitted on an existing room are left alone
        assert!(result.workspace.rooms[0].has_devices);
        for r in &result.workspace.rooms {
            assert_eq!(r.has_devices, !r.devices.is_empty());
        }
    }

    #[tokio::test]
    async fn test_update_missing_workspace_touches_nothing() {
        let pool = test_pool().await;
        let hub = create_hub(&pool).await;

        let err = update_with_children(
            &pool,
            hub.id + 1,
            &nested(json!({"name": "Ghost", "rooms": []})),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            RepoError::NotFound { code: ErrorCode::WorkspaceNotFound, .. }
        ));

        let all = list(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], hub);
    }

    #[tokio::test]
    async fn test_list_matches_single_reads() {
        let pool = test_pool().await;
        let hub = create_hub(&pool).await;
        let bare: WorkspaceCreate = serde_json::from_value(json!({"name": "Annex"})).unwrap();
        let annex = create(&pool, &bare).await.unwrap();

        let all = list(&pool).await.unwrap();
        assert_eq!(all.len(), 2);
        for view in &all {
            let single = get_by_id(&pool, view.id).await.unwrap().unwrap();
            assert_eq!(&single, view);
        }
        assert!(all.iter().any(|w| w.id == annex.id && w.rooms.is_empty()));

        // the read transaction is closed, so writes go through afterwards
        assert!(delete(&pool, hub.id).await.unwrap());
        let all = list(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, annex.id);
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let pool = test_pool().await;
        let hub = create_hub(&pool).await;
        let a = hub.rooms[0].id;
        let tv = hub.rooms[0].devices[0].id;

        assert!(delete(&pool, hub.id).await.unwrap());
        assert!(get_by_id(&pool, hub.id).await.unwrap().is_none());
        assert!(room::get_by_id(&pool, a).await.unwrap().is_none());
        assert!(device::get_by_id(&pool, tv).await.unwrap().is_none());
        assert!(!delete(&pool, hub.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_plain_update() {
        let pool = test_pool().await;
        let hub = create_hub(&pool).await;

        let payload: WorkspaceUpdate =
            serde_json::from_value(json!({"name": "Hub Renamed", "latitude": 30.0})).unwrap();
        assert!(update(&pool, hub.id, &payload).await.unwrap());
        assert!(!update(&pool, hub.id + 1, &payload).await.unwrap());

        let stored = get_by_id(&pool, hub.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Hub Renamed");
        assert_eq!(stored.latitude, Some(30.0));
        assert_eq!(stored.version, hub.version + 1);
        assert_eq!(stored.rooms.len(), 1);
    }
}
