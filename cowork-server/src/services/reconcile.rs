//! Nested reconciliation of a workspace's room and device tree
//!
//! A desired tree is applied as an explicit two-set diff at each level
//! (workspace → rooms, room → devices): current children missing from the
//! payload are deleted, identified entries are updated in place when their
//! values differ, and entries without an id are inserted. Identified entries
//! that do not belong to the parent abort the whole write.
//!
//! Every function here runs on the connection it is given; callers wrap the
//! call in a transaction so a failure leaves no partial changes.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use shared::error::ErrorCode;
use shared::models::{
    DeviceDraft, DeviceEntry, Room, RoomDraft, RoomEntry, WorkspaceFields, WorkspaceNestedUpdate,
};
use sqlx::SqliteConnection;

use crate::db::repository::device::{self, DeviceValues};
use crate::db::repository::room::{self, RoomValues};
use crate::db::repository::{RepoError, RepoResult, workspace};

/// Result of diffing current child ids against desired entries
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChildDiff {
    /// Current ids absent from the desired entries
    pub delete: Vec<i64>,
    /// `(entry index, id)` for identified entries that are current children
    pub update: Vec<(usize, i64)>,
    /// Indexes of entries without an id
    pub insert: Vec<usize>,
    /// Identified entries that are not current children
    pub unknown: Vec<i64>,
    /// Ids listed more than once
    pub duplicate: Vec<i64>,
}

/// Diff current child ids against the desired entries' optional ids
///
/// Output order follows the inputs, so applying the diff is deterministic.
pub fn diff_children<I>(current: &[i64], desired: I) -> ChildDiff
where
    I: IntoIterator<Item = Option<i64>>,
{
    let existing: HashSet<i64> = current.iter().copied().collect();
    let mut seen = HashSet::new();
    let mut diff = ChildDiff::default();

    for (idx, id) in desired.into_iter().enumerate() {
        match id {
            None => diff.insert.push(idx),
            Some(id) if !seen.insert(id) => diff.duplicate.push(id),
            Some(id) if existing.contains(&id) => diff.update.push((idx, id)),
            Some(id) => diff.unknown.push(id),
        }
    }

    diff.delete = current
        .iter()
        .copied()
        .filter(|id| !seen.contains(id))
        .collect();
    diff
}

/// Row churn produced by one reconcile
///
/// Devices removed through a room delete cascade are not counted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileStats {
    pub workspace_updated: bool,
    pub rooms_inserted: u32,
    pub rooms_updated: u32,
    pub rooms_deleted: u32,
    pub devices_inserted: u32,
    pub devices_updated: u32,
    pub devices_deleted: u32,
}

impl ReconcileStats {
    /// True when nothing was written
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Insert a workspace with its whole tree; returns the new workspace id
pub async fn apply_nested_create(
    conn: &mut SqliteConnection,
    fields: &WorkspaceFields,
    rooms: &[RoomDraft],
) -> RepoResult<(i64, ReconcileStats)> {
    let created = workspace::create(conn, fields).await?;
    let mut stats = ReconcileStats::default();

    for draft in rooms {
        let values = RoomValues {
            name: &draft.name,
            capacity: draft.capacity,
            price_per_hour: draft.price_per_hour,
        };
        let room_id = room::insert(conn, created.id, values).await?;
        stats.rooms_inserted += 1;

        for d in &draft.devices {
            device::insert(conn, room_id, draft_values(d)).await?;
            stats.devices_inserted += 1;
        }
        room::refresh_has_devices(conn, room_id).await?;
    }

    Ok((created.id, stats))
}

/// Bring a stored workspace in line with `payload`
///
/// Fails with `WorkspaceNotFound` for a missing workspace, `VersionConflict`
/// when `payload.version` is stale, and `RoomNotInWorkspace` /
/// `DeviceNotInRoom` for identified entries that belong elsewhere. The
/// workspace version is bumped once when anything changed.
pub async fn apply_nested_update(
    conn: &mut SqliteConnection,
    workspace_id: i64,
    payload: &WorkspaceNestedUpdate,
) -> RepoResult<ReconcileStats> {
    let stored = workspace::find_by_id(conn, workspace_id)
        .await?
        .ok_or_else(|| {
            RepoError::not_found(
                ErrorCode::WorkspaceNotFound,
                format!("Workspace {workspace_id} not found"),
            )
        })?;

    match payload.version {
        Some(expected) if expected != stored.version => {
            return Err(RepoError::Conflict(format!(
                "Workspace {workspace_id} is at version {}, request expected {expected}",
                stored.version
            )));
        }
        _ => {}
    }

    let mut stats = ReconcileStats::default();

    let fields = payload.fields();
    if !fields.matches(&stored) {
        workspace::update(conn, workspace_id, &fields).await?;
        stats.workspace_updated = true;
    }

    if let Some(rooms) = &payload.rooms {
        reconcile_rooms(conn, workspace_id, rooms, &mut stats).await?;
    }

    if !stats.is_noop() {
        workspace::bump_version(conn, workspace_id).await?;
    }
    Ok(stats)
}

async fn reconcile_rooms(
    conn: &mut SqliteConnection,
    workspace_id: i64,
    desired: &[RoomEntry],
    stats: &mut ReconcileStats,
) -> RepoResult<()> {
    let current = room::find_by_workspace(conn, workspace_id).await?;
    let current_ids: Vec<i64> = current.iter().map(|r| r.id).collect();
    let diff = diff_children(&current_ids, desired.iter().map(|r| r.id));

    if let Some(id) = diff.duplicate.first() {
        return Err(RepoError::Validation(format!(
            "Room {id} is listed more than once"
        )));
    }
    if let Some(id) = diff.unknown.first() {
        return Err(RepoError::not_found(
            ErrorCode::RoomNotInWorkspace,
            format!("Room {id} does not belong to workspace {workspace_id}"),
        ));
    }

    for &id in &diff.delete {
        room::delete(conn, id).await?;
        stats.rooms_deleted += 1;
    }

    let stored: HashMap<i64, &Room> = current.iter().map(|r| (r.id, r)).collect();
    for &(idx, id) in &diff.update {
        let entry = &desired[idx];
        let values = room_values(entry);
        if stored.get(&id).is_some_and(|r| !values.matches(r)) {
            room::update(conn, id, workspace_id, values).await?;
            stats.rooms_updated += 1;
        }
        if let Some(devices) = &entry.devices {
            reconcile_devices(conn, id, devices, stats).await?;
        }
        room::refresh_has_devices(conn, id).await?;
    }

    for &idx in &diff.insert {
        let entry = &desired[idx];
        let id = room::insert(conn, workspace_id, room_values(entry)).await?;
        stats.rooms_inserted += 1;
        if let Some(devices) = &entry.devices {
            reconcile_devices(conn, id, devices, stats).await?;
        }
        room::refresh_has_devices(conn, id).await?;
    }

    Ok(())
}

async fn reconcile_devices(
    conn: &mut SqliteConnection,
    room_id: i64,
    desired: &[DeviceEntry],
    stats: &mut ReconcileStats,
) -> RepoResult<()> {
    let current = device::find_by_room(conn, room_id).await?;
    let current_ids: Vec<i64> = current.iter().map(|d| d.id).collect();
    let diff = diff_children(&current_ids, desired.iter().map(|d| d.id));

    if let Some(id) = diff.duplicate.first() {
        return Err(RepoError::Validation(format!(
            "Device {id} is listed more than once"
        )));
    }
    if let Some(id) = diff.unknown.first() {
        return Err(RepoError::not_found(
            ErrorCode::DeviceNotInRoom,
            format!("Device {id} does not belong to room {room_id}"),
        ));
    }

    for &id in &diff.delete {
        device::delete(conn, id).await?;
        stats.devices_deleted += 1;
    }

    let stored: HashMap<i64, _> = current.iter().map(|d| (d.id, d)).collect();
    for &(idx, id) in &diff.update {
        let values = device_values(&desired[idx]);
        if stored.get(&id).is_some_and(|d| !values.matches(d)) {
            device::update(conn, id, room_id, values).await?;
            stats.devices_updated += 1;
        }
    }

    for &idx in &diff.insert {
        device::insert(conn, room_id, device_values(&desired[idx])).await?;
        stats.devices_inserted += 1;
    }

    Ok(())
}

fn room_values(entry: &RoomEntry) -> RoomValues<'_> {
    RoomValues {
        name: &entry.name,
        capacity: entry.capacity,
        price_per_hour: entry.price_per_hour,
    }
}

fn device_values(entry: &DeviceEntry) -> DeviceValues<'_> {
    DeviceValues {
        name: &entry.name,
        extra_cost_per_hour: entry.extra_cost_per_hour,
    }
}

fn draft_values(draft: &DeviceDraft) -> DeviceValues<'_> {
    DeviceValues {
        name: &draft.name,
        extra_cost_per_hour: draft.extra_cost_per_hour,
    }
}
