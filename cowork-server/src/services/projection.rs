//! Read projections
//!
//! Loads workspaces and rooms together with their children and assembles the
//! nested views. Absence is `None`, never an error.

use std::collections::HashMap;

use shared::models::{Device, Room, RoomView, WorkspaceView};
use sqlx::SqliteConnection;

use crate::db::repository::{RepoResult, device, room, workspace};

/// Attach devices to their rooms, keeping room order
pub fn assemble_rooms(rooms: Vec<Room>, devices: Vec<Device>) -> Vec<RoomView> {
    let mut by_room: HashMap<i64, Vec<Device>> = HashMap::new();
    for d in devices {
        by_room.entry(d.room_id).or_default().push(d);
    }
    rooms
        .into_iter()
        .map(|r| {
            let devices = by_room.remove(&r.id).unwrap_or_default();
            RoomView::new(r, devices)
        })
        .collect()
}

pub async fn find_workspace(
    conn: &mut SqliteConnection,
    id: i64,
) -> RepoResult<Option<WorkspaceView>> {
    let Some(ws) = workspace::find_by_id(conn, id).await? else {
        return Ok(None);
    };
    let rooms = room::find_by_workspace(conn, id).await?;
    let devices = device::find_by_workspace(conn, id).await?;
    Ok(Some(WorkspaceView::new(ws, assemble_rooms(rooms, devices))))
}

/// Every workspace with its tree, three queries total
pub async fn list_workspaces(conn: &mut SqliteConnection) -> RepoResult<Vec<WorkspaceView>> {
    let workspaces = workspace::find_all(conn).await?;
    let rooms = room::find_all(conn, None).await?;
    let devices = device::find_all(conn, None).await?;

    let mut by_workspace: HashMap<i64, Vec<RoomView>> = HashMap::new();
    for view in assemble_rooms(rooms, devices) {
        by_workspace.entry(view.workspace_id).or_default().push(view);
    }

    Ok(workspaces
        .into_iter()
        .map(|ws| {
            let rooms = by_workspace.remove(&ws.id).unwrap_or_default();
            WorkspaceView::new(ws, rooms)
        })
        .collect())
}

pub async fn find_room(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<RoomView>> {
    let Some(r) = room::find_by_id(conn, id).await? else {
        return Ok(None);
    };
    let devices = device::find_by_room(conn, id).await?;
    Ok(Some(RoomView::new(r, devices)))
}

pub async fn list_rooms(
    conn: &mut SqliteConnection,
    workspace_id: Option<i64>,
) -> RepoResult<Vec<RoomView>> {
    let rooms = room::find_all(conn, workspace_id).await?;
    let devices = match workspace_id {
        Some(id) => device::find_by_workspace(conn, id).await?,
        None => device::find_all(conn, None).await?,
    };
    Ok(assemble_rooms(rooms, devices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn room(id: i64, has_devices: bool) -> Room {
        Room {
            id,
            workspace_id: 1,
            name: format!("Room {id}"),
            capacity: 4,
            price_per_hour: Decimal::from(10),
            has_devices,
        }
    }

    fn device(id: i64, room_id: i64) -> Device {
        Device {
            id,
            room_id,
            name: format!("Device {id}"),
            extra_cost_per_hour: Decimal::ONE,
        }
    }

    #[test]
    fn test_assemble_groups_and_derives_flag() {
        // stored flags are deliberately wrong; the view trusts the devices
        let views = assemble_rooms(
            vec![room(1, false), room(2, true)],
            vec![device(10, 1), device(11, 1)],
        );
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].devices.len(), 2);
        assert!(views[0].has_devices);
        assert!(views[1].devices.is_empty());
        assert!(!views[1].has_devices);
    }

    #[test]
    fn test_assemble_ignores_devices_of_unlisted_rooms() {
        let views = assemble_rooms(vec![room(1, false)], vec![device(10, 7)]);
        assert!(views[0].devices.is_empty());
    }
}
