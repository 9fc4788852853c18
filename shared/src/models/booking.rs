//! Booking Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Validation code reported when start time does not precede end time
pub const BOOKING_WINDOW_CODE: &str = "booking_window";

/// Booking entity
///
/// `user_id` is issued by an external identity provider and is not a
/// foreign key. `total_price` is quoted by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub user_id: String,
    pub room_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_price: Decimal,
}

/// Create booking payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_window", skip_on_field_errors = false))]
pub struct BookingCreate {
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    pub room_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[validate(custom(function = "super::money::validate_money"))]
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_price: Decimal,
}

/// Update booking payload (overwrites every scalar)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_window", skip_on_field_errors = false))]
pub struct BookingUpdate {
    pub id: Option<i64>,
    #[validate(length(min = 1, message = "userId is required"))]
    pub user_id: String,
    pub room_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[validate(custom(function = "super::money::validate_money"))]
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_price: Decimal,
}

/// Query filter for booking lists
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuery {
    pub room_id: Option<i64>,
    pub user_id: Option<String>,
}

fn check_window(start: &DateTime<Utc>, end: &DateTime<Utc>) -> Result<(), ValidationError> {
    if start < end {
        Ok(())
    } else {
        Err(ValidationError::new(BOOKING_WINDOW_CODE)
            .with_message(Cow::Borrowed("startTime must be before endTime")))
    }
}

fn validate_create_window(b: &BookingCreate) -> Result<(), ValidationError> {
    check_window(&b.start_time, &b.end_time)
}

fn validate_update_window(b: &BookingUpdate) -> Result<(), ValidationError> {
    check_window(&b.start_time, &b.end_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_booking_window_enforced() {
        let ok: BookingCreate = serde_json::from_value(json!({
            "userId": "test-user-1",
            "roomId": 1,
            "startTime": "2026-03-01T09:00:00Z",
            "endTime": "2026-03-01T11:00:00Z",
            "totalPrice": 150
        }))
        .unwrap();
        assert!(ok.validate().is_ok());

        let reversed: BookingCreate = serde_json::from_value(json!({
            "userId": "test-user-1",
            "roomId": 1,
            "startTime": "2026-03-01T11:00:00Z",
            "endTime": "2026-03-01T11:00:00Z",
            "totalPrice": 150
        }))
        .unwrap();
        let errors = reversed.validate().unwrap_err();
        let all = errors.field_errors();
        assert_eq!(all["__all__"][0].code, BOOKING_WINDOW_CODE);
    }

    #[test]
    fn test_booking_update_requires_user() {
        let bad: BookingUpdate = serde_json::from_value(json!({
            "userId": "",
            "roomId": 1,
            "startTime": "2026-03-01T09:00:00Z",
            "endTime": "2026-03-01T10:00:00Z",
            "totalPrice": 0
        }))
        .unwrap();
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("user_id"));
    }
}
