//! Device Repository

use super::{RepoResult, cents};
use rust_decimal::Decimal;
use shared::models::Device;
use shared::models::money;
use sqlx::SqliteConnection;

#[derive(Debug, sqlx::FromRow)]
struct DeviceRow {
    id: i64,
    room_id: i64,
    name: String,
    extra_cost_per_hour_cents: i64,
}

impl From<DeviceRow> for Device {
    fn from(row: DeviceRow) -> Self {
        Device {
            id: row.id,
            room_id: row.room_id,
            name: row.name,
            extra_cost_per_hour: money::from_cents(row.extra_cost_per_hour_cents),
        }
    }
}

/// Scalar device values written by create and update
#[derive(Debug, Clone, Copy)]
pub struct DeviceValues<'a> {
    pub name: &'a str,
    pub extra_cost_per_hour: Decimal,
}

impl DeviceValues<'_> {
    pub fn matches(&self, device: &Device) -> bool {
        self.name == device.name
            && money::normalize(self.extra_cost_per_hour) == device.extra_cost_per_hour
    }
}

/// All devices, optionally restricted to one room
pub async fn find_all(conn: &mut SqliteConnection, room_id: Option<i64>) -> RepoResult<Vec<Device>> {
    let rows = sqlx::query_as::<_, DeviceRow>(
        "SELECT id, room_id, name, extra_cost_per_hour_cents FROM device WHERE (?1 IS NULL OR room_id = ?1) ORDER BY id",
    )
    .bind(room_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows.into_iter().map(Device::from).collect())
}

pub async fn find_by_room(conn: &mut SqliteConnection, room_id: i64) -> RepoResult<Vec<Device>> {
    find_all(conn, Some(room_id)).await
}

/// Devices of every room in a workspace
pub async fn find_by_workspace(
    conn: &mut SqliteConnection,
    workspace_id: i64,
) -> RepoResult<Vec<Device>> {
    let rows = sqlx::query_as::<_, DeviceRow>(
        "SELECT d.id, d.room_id, d.name, d.extra_cost_per_hour_cents
         FROM device d JOIN room r ON r.id = d.room_id
         WHERE r.workspace_id = ? ORDER BY d.id",
    )
    .bind(workspace_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows.into_iter().map(Device::from).collect())
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Device>> {
    let row = sqlx::query_as::<_, DeviceRow>(
        "SELECT id, room_id, name, extra_cost_per_hour_cents FROM device WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(row.map(Device::from))
}

/// Insert a device; the caller refreshes the room's `has_devices`
pub async fn insert(
    conn: &mut SqliteConnection,
    room_id: i64,
    values: DeviceValues<'_>,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO device (room_id, name, extra_cost_per_hour_cents) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(room_id)
    .bind(values.name)
    .bind(cents("extraCostPerHour", values.extra_cost_per_hour)?)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

/// Overwrite scalar fields (and room); `false` when the row does not exist
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    room_id: i64,
    values: DeviceValues<'_>,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE device SET room_id = ?1, name = ?2, extra_cost_per_hour_cents = ?3 WHERE id = ?4",
    )
    .bind(room_id)
    .bind(values.name)
    .bind(cents("extraCostPerHour", values.extra_cost_per_hour)?)
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM device WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}
