//! Workspace Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::device::{DeviceDraft, DeviceEntry};
use super::room::RoomView;
use rust_decimal::Decimal;

/// Workspace entity (a bookable site that owns rooms)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Bumped on every write that changes the workspace or its children
    pub version: i64,
}

/// Workspace with its rooms and their devices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub version: i64,
    pub rooms: Vec<RoomView>,
}

impl WorkspaceView {
    pub fn new(workspace: Workspace, rooms: Vec<RoomView>) -> Self {
        Self {
            id: workspace.id,
            name: workspace.name,
            description: workspace.description,
            address: workspace.address,
            city: workspace.city,
            latitude: workspace.latitude,
            longitude: workspace.longitude,
            version: workspace.version,
            rooms,
        }
    }
}

/// Scalar workspace fields shared by every write payload
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceFields {
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl WorkspaceFields {
    /// True when a stored row already carries these values
    pub fn matches(&self, ws: &Workspace) -> bool {
        self.name == ws.name
            && self.description == ws.description
            && self.address == ws.address
            && self.city == ws.city
            && self.latitude == ws.latitude
            && self.longitude == ws.longitude
    }
}

/// Create workspace payload (scalars only)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceCreate {
    #[validate(length(min = 3, message = "name must be at least 3 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,
}

impl WorkspaceCreate {
    pub fn fields(&self) -> WorkspaceFields {
        WorkspaceFields {
            name: self.name.clone(),
            description: self.description.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Update workspace payload
///
/// Overwrites every scalar. `id` is optional in the body; when present it
/// must equal the id in the path.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceUpdate {
    pub id: Option<i64>,
    #[validate(length(min = 3, message = "name must be at least 3 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,
}

impl WorkspaceUpdate {
    pub fn fields(&self) -> WorkspaceFields {
        WorkspaceFields {
            name: self.name.clone(),
            description: self.description.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Create a workspace together with its rooms and devices
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceNestedCreate {
    #[validate(length(min = 3, message = "name must be at least 3 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,
    #[serde(default)]
    #[validate(nested)]
    pub rooms: Vec<RoomDraft>,
}

impl WorkspaceNestedCreate {
    pub fn fields(&self) -> WorkspaceFields {
        WorkspaceFields {
            name: self.name.clone(),
            description: self.description.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// New room inside a nested create
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomDraft {
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: String,
    #[validate(range(min = 1, max = 1000, message = "capacity must be between 1 and 1000"))]
    pub capacity: i32,
    #[validate(custom(function = "super::money::validate_money"))]
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price_per_hour: Decimal,
    #[serde(default)]
    #[validate(nested)]
    pub devices: Vec<DeviceDraft>,
}

/// Desired state of a workspace and, optionally, its whole room tree
///
/// `rooms: None` leaves the stored rooms untouched; `Some(vec![])` removes
/// them all. Entries with an `id` are reconciled in place, entries without
/// one are inserted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceNestedUpdate {
    pub id: Option<i64>,
    /// Expected stored version; a mismatch fails the write
    pub version: Option<i64>,
    #[validate(length(min = 3, message = "name must be at least 3 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,
    #[validate(nested)]
    pub rooms: Option<Vec<RoomEntry>>,
}

impl WorkspaceNestedUpdate {
    pub fn fields(&self) -> WorkspaceFields {
        WorkspaceFields {
            name: self.name.clone(),
            description: self.description.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Room entry inside a nested update
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomEntry {
    pub id: Option<i64>,
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: String,
    #[validate(range(min = 1, max = 1000, message = "capacity must be between 1 and 1000"))]
    pub capacity: i32,
    #[validate(custom(function = "super::money::validate_money"))]
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price_per_hour: Decimal,
    /// `None` leaves the room's devices untouched
    #[validate(nested)]
    pub devices: Option<Vec<DeviceEntry>>,
}
