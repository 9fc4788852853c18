//! Room Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::device::Device;

/// Room entity
///
/// `has_devices` is derived from the room's devices and kept in sync by
/// every writer that touches devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub workspace_id: i64,
    pub name: String,
    pub capacity: i32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price_per_hour: Decimal,
    pub has_devices: bool,
}

/// Room with its devices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    pub id: i64,
    pub workspace_id: i64,
    pub name: String,
    pub capacity: i32,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price_per_hour: Decimal,
    pub has_devices: bool,
    pub devices: Vec<Device>,
}

impl RoomView {
    /// Build the view; `has_devices` always reflects `devices`
    pub fn new(room: Room, devices: Vec<Device>) -> Self {
        Self {
            id: room.id,
            workspace_id: room.workspace_id,
            name: room.name,
            capacity: room.capacity,
            price_per_hour: room.price_per_hour,
            has_devices: !devices.is_empty(),
            devices,
        }
    }
}

/// Create room payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreate {
    pub workspace_id: i64,
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: String,
    #[validate(range(min = 1, max = 1000, message = "capacity must be between 1 and 1000"))]
    pub capacity: i32,
    #[validate(custom(function = "super::money::validate_money"))]
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price_per_hour: Decimal,
}

/// Update room payload (overwrites every scalar)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    pub id: Option<i64>,
    pub workspace_id: i64,
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: String,
    #[validate(range(min = 1, max = 1000, message = "capacity must be between 1 and 1000"))]
    pub capacity: i32,
    #[validate(custom(function = "super::money::validate_money"))]
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price_per_hour: Decimal,
}

/// Query filter for room lists
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomQuery {
    pub workspace_id: Option<i64>,
}
