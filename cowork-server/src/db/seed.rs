//! Demo data
//!
//! Seeds one workspace with two rooms, three devices and two bookings when
//! the database holds no workspace yet.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use shared::models::{BookingCreate, DeviceDraft, RoomDraft, WorkspaceNestedCreate};
use sqlx::SqlitePool;

use crate::db::repository::{RepoResult, workspace};
use crate::services;

fn demo_workspace() -> WorkspaceNestedCreate {
    let device = |name: &str, cost: i64| DeviceDraft {
        name: name.into(),
        extra_cost_per_hour: Decimal::from(cost),
    };

    WorkspaceNestedCreate {
        name: "Downtown Cowork Space".into(),
        description: "Cozy workspace in Cairo Downtown with modern amenities.".into(),
        address: "123 Tahrir Street".into(),
        city: "Cairo".into(),
        latitude: None,
        longitude: None,
        rooms: vec![
            RoomDraft {
                name: "Meeting Room A".into(),
                capacity: 6,
                price_per_hour: Decimal::from(75),
                devices: vec![device("Projector", 20), device("Whiteboard", 10)],
            },
            RoomDraft {
                name: "Private Office B".into(),
                capacity: 2,
                price_per_hour: Decimal::from(120),
                devices: vec![device("Monitor", 15)],
            },
        ],
    }
}

/// Insert the demo data; returns `false` when workspaces already exist
pub async fn seed_demo_data(pool: &SqlitePool) -> RepoResult<bool> {
    let existing = {
        let mut conn = pool.acquire().await?;
        workspace::count(&mut conn).await?
    };
    if existing > 0 {
        tracing::debug!(existing, "Skipping demo seed");
        return Ok(false);
    }

    let ws = services::workspace::create_with_children(pool, &demo_workspace()).await?;

    let now = Utc::now();
    let tomorrow = now + Duration::days(1);
    let bookings = ws.rooms.iter().zip([
        ("test-user-1", now + Duration::hours(1), now + Duration::hours(3), 150),
        (
            "test-user-2",
            tomorrow + Duration::hours(9),
            tomorrow + Duration::hours(12),
            360,
        ),
    ]);
    for (room, (user_id, start_time, end_time, price)) in bookings {
        let booking = BookingCreate {
            user_id: user_id.into(),
            room_id: room.id,
            start_time,
            end_time,
            total_price: Decimal::from(price),
        };
        services::booking::create(pool, &booking).await?;
    }

    tracing::info!(workspace_id = ws.id, "Demo data seeded");
    Ok(true)
}
