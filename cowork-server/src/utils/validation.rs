//! Request body validation
//!
//! [`ValidatedJson`] deserializes a JSON body and runs its `validator` rules
//! before the handler sees it. Field errors are flattened into
//! `details: { "rooms[0].name": ["..."] }` with camelCase paths.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::error::{AppError, ErrorCode};
use shared::models::booking::BOOKING_WINDOW_CODE;
use std::collections::BTreeMap;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Key used by `validator` for struct-level (schema) errors
const SCHEMA_FIELD: &str = "__all__";

/// JSON body extractor that rejects invalid payloads with an [`AppError`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_error)?;
        value.validate().map_err(validation_error)?;
        Ok(Self(value))
    }
}

fn rejection_error(rejection: JsonRejection) -> AppError {
    AppError::invalid_request(rejection.body_text())
}

fn friendly_message(code: &str) -> Option<&'static str> {
    match code {
        "length" => Some("has invalid length"),
        "range" => Some("is out of range"),
        "money_negative" => Some("must not be negative"),
        "money_precision" => Some("has too many digits"),
        _ => None,
    }
}

fn camel_case(field: &str) -> String {
    if field == SCHEMA_FIELD {
        return "_schema".to_string();
    }
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn join_path(prefix: &str, field: &str) -> String {
    let field = camel_case(field);
    if prefix.is_empty() {
        field
    } else {
        format!("{prefix}.{field}")
    }
}

fn collect(
    out: &mut BTreeMap<String, Vec<String>>,
    window: &mut bool,
    prefix: &str,
    errs: &ValidationErrors,
) {
    for (field, kind) in errs.errors() {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let key = join_path(prefix, field);
                for e in field_errors {
                    if e.code == BOOKING_WINDOW_CODE {
                        *window = true;
                    }
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .or_else(|| friendly_message(&e.code).map(str::to_string))
                        .unwrap_or_else(|| e.code.to_string());
                    out.entry(key.clone()).or_default().push(msg);
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect(out, window, &join_path(prefix, field), nested);
            }
            ValidationErrorsKind::List(items) => {
                let base = join_path(prefix, field);
                for (idx, nested) in items {
                    collect(out, window, &format!("{base}[{idx}]"), nested);
                }
            }
        }
    }
}

/// Convert `validator` errors into a 400 [`AppError`]
///
/// A failing booking window reports `InvalidBookingWindow`; every other
/// failure reports `ValidationFailed`.
pub fn validation_error(errs: ValidationErrors) -> AppError {
    let mut fields = BTreeMap::new();
    let mut window = false;
    collect(&mut fields, &mut window, "", &errs);

    let (code, message) = if window {
        (ErrorCode::InvalidBookingWindow, ErrorCode::InvalidBookingWindow.message())
    } else {
        (ErrorCode::ValidationFailed, "Validation failed")
    };

    fields
        .into_iter()
        .fold(AppError::with_message(code, message), |err, (path, msgs)| {
            err.with_detail(path, Value::from(msgs))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{BookingCreate, RoomDraft, WorkspaceNestedCreate};

    fn nested(rooms: Vec<RoomDraft>) -> WorkspaceNestedCreate {
        WorkspaceNestedCreate {
            name: "Hub".into(),
            description: String::new(),
            address: String::new(),
            city: String::new(),
            latitude: None,
            longitude: None,
            rooms,
        }
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("price_per_hour"), "pricePerHour");
        assert_eq!(camel_case("name"), "name");
        assert_eq!(camel_case("__all__"), "_schema");
    }

    #[test]
    fn test_nested_paths_are_indexed() {
        let payload = nested(vec![RoomDraft {
            name: "X".into(),
            capacity: 0,
            price_per_hour: Decimal::new(-1, 0),
            devices: vec![],
        }]);
        let err = validation_error(payload.validate().unwrap_err());

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert!(details.contains_key("rooms[0].name"));
        assert!(details.contains_key("rooms[0].capacity"));
        assert!(details.contains_key("rooms[0].pricePerHour"));
        assert!(details.get("rooms[0].name").unwrap().is_array());
    }

    #[test]
    fn test_booking_window_code() {
        let now = chrono::Utc::now();
        let booking = BookingCreate {
            user_id: "u-1".into(),
            room_id: 1,
            start_time: now,
            end_time: now,
            total_price: Decimal::from(10),
        };
        let err = validation_error(booking.validate().unwrap_err());

        assert_eq!(err.code, ErrorCode::InvalidBookingWindow);
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
        assert!(err.details.unwrap().contains_key("_schema"));
    }
}
