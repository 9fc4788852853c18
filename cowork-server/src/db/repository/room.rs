//! Room Repository

use super::{RepoResult, cents};
use rust_decimal::Decimal;
use shared::models::Room;
use shared::models::money;
use sqlx::SqliteConnection;

const COLUMNS: &str = "id, workspace_id, name, capacity, price_per_hour_cents, has_devices";

#[derive(Debug, sqlx::FromRow)]
struct RoomRow {
    id: i64,
    workspace_id: i64,
    name: String,
    capacity: i32,
    price_per_hour_cents: i64,
    has_devices: bool,
}

impl From<RoomRow> for Room {
    fn from(row: RoomRow) -> Self {
        Room {
            id: row.id,
            workspace_id: row.workspace_id,
            name: row.name,
            capacity: row.capacity,
            price_per_hour: money::from_cents(row.price_per_hour_cents),
            has_devices: row.has_devices,
        }
    }
}

/// Scalar room values written by create and update
#[derive(Debug, Clone, Copy)]
pub struct RoomValues<'a> {
    pub name: &'a str,
    pub capacity: i32,
    pub price_per_hour: Decimal,
}

impl RoomValues<'_> {
    /// True when the stored room already carries these values
    pub fn matches(&self, room: &Room) -> bool {
        self.name == room.name
            && self.capacity == room.capacity
            && money::normalize(self.price_per_hour) == room.price_per_hour
    }
}

/// All rooms, optionally restricted to one workspace
pub async fn find_all(
    conn: &mut SqliteConnection,
    workspace_id: Option<i64>,
) -> RepoResult<Vec<Room>> {
    let rows = sqlx::query_as::<_, RoomRow>(&format!(
        "SELECT {COLUMNS} FROM room WHERE (?1 IS NULL OR workspace_id = ?1) ORDER BY id"
    ))
    .bind(workspace_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows.into_iter().map(Room::from).collect())
}

pub async fn find_by_workspace(
    conn: &mut SqliteConnection,
    workspace_id: i64,
) -> RepoResult<Vec<Room>> {
    find_all(conn, Some(workspace_id)).await
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Room>> {
    let row = sqlx::query_as::<_, RoomRow>(&format!("SELECT {COLUMNS} FROM room WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.map(Room::from))
}

/// Insert a room without devices; returns the new id
pub async fn insert(
    conn: &mut SqliteConnection,
    workspace_id: i64,
    values: RoomValues<'_>,
) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO room (workspace_id, name, capacity, price_per_hour_cents, has_devices) VALUES (?, ?, ?, ?, 0) RETURNING id",
    )
    .bind(workspace_id)
    .bind(values.name)
    .bind(values.capacity)
    .bind(cents("pricePerHour", values.price_per_hour)?)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

/// Overwrite scalar fields (and owner); `false` when the row does not exist
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    workspace_id: i64,
    values: RoomValues<'_>,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE room SET workspace_id = ?1, name = ?2, capacity = ?3, price_per_hour_cents = ?4 WHERE id = ?5",
    )
    .bind(workspace_id)
    .bind(values.name)
    .bind(values.capacity)
    .bind(cents("pricePerHour", values.price_per_hour)?)
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Recompute `has_devices` from the device table; writes only on change
pub async fn refresh_has_devices(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE room SET has_devices = EXISTS (SELECT 1 FROM device WHERE room_id = ?1)
         WHERE id = ?1 AND has_devices != EXISTS (SELECT 1 FROM device WHERE room_id = ?1)",
    )
    .bind(id)
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Delete a room; devices and bookings cascade
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM room WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::RepoError;
    use crate::db::repository::test_support::test_pool;

    async fn seed_workspace(conn: &mut SqliteConnection) -> i64 {
        sqlx::query_scalar::<_, i64>("INSERT INTO workspace (name) VALUES ('Hub') RETURNING id")
            .fetch_one(conn)
            .await
            .unwrap()
    }

    fn values(name: &str) -> RoomValues<'_> {
        RoomValues {
            name,
            capacity: 4,
            price_per_hour: Decimal::new(5000, 2),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let ws = seed_workspace(&mut conn).await;

        let id = insert(&mut conn, ws, values("Room A")).await.unwrap();
        let room = find_by_id(&mut conn, id).await.unwrap().unwrap();
        assert_eq!(room.workspace_id, ws);
        assert_eq!(room.price_per_hour, Decimal::new(5000, 2));
        assert!(!room.has_devices);
        assert!(values("Room A").matches(&room));
        assert!(!values("Room B").matches(&room));

        assert_eq!(find_by_workspace(&mut conn, ws).await.unwrap().len(), 1);
        assert!(find_by_workspace(&mut conn, ws + 1).await.unwrap().is_empty());
        assert_eq!(find_all(&mut conn, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_into_missing_workspace_is_constraint() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let err = insert(&mut conn, 77, values("Room A")).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_refresh_has_devices_writes_only_on_change() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let ws = seed_workspace(&mut conn).await;
        let id = insert(&mut conn, ws, values("Room A")).await.unwrap();

        assert!(!refresh_has_devices(&mut conn, id).await.unwrap());

        sqlx::query("INSERT INTO device (room_id, name, extra_cost_per_hour_cents) VALUES (?, 'TV', 500)")
            .bind(id)
            .execute(&mut *conn)
            .await
            .unwrap();
        assert!(refresh_has_devices(&mut conn, id).await.unwrap());
        assert!(find_by_id(&mut conn, id).await.unwrap().unwrap().has_devices);
        assert!(!refresh_has_devices(&mut conn, id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_cascades_devices() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let ws = seed_workspace(&mut conn).await;
        let id = insert(&mut conn, ws, values("Room A")).await.unwrap();
        sqlx::query("INSERT INTO device (room_id, name, extra_cost_per_hour_cents) VALUES (?, 'TV', 500)")
            .bind(id)
            .execute(&mut *conn)
            .await
            .unwrap();

        assert!(delete(&mut conn, id).await.unwrap());
        let devices: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM device")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(devices, 0);
    }
}
