//! Device Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Device entity (an add-on attached to exactly one room)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i64,
    pub room_id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub extra_cost_per_hour: Decimal,
}

/// Create device payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCreate {
    pub room_id: i64,
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: String,
    #[validate(custom(function = "super::money::validate_money"))]
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub extra_cost_per_hour: Decimal,
}

/// Update device payload (overwrites every scalar, may move the device)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeviceUpdate {
    pub id: Option<i64>,
    pub room_id: i64,
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: String,
    #[validate(custom(function = "super::money::validate_money"))]
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub extra_cost_per_hour: Decimal,
}

/// New device inside a nested create
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDraft {
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: String,
    #[validate(custom(function = "super::money::validate_money"))]
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub extra_cost_per_hour: Decimal,
}

/// Device entry inside a nested update; no `id` means insert
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DeviceEntry {
    pub id: Option<i64>,
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: String,
    #[validate(custom(function = "super::money::validate_money"))]
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub extra_cost_per_hour: Decimal,
}

/// Query filter for device lists
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceQuery {
    pub room_id: Option<i64>,
}
