//! Error codes and the error type shared by server and clients
//!
//! Codes are grouped by their thousands digit: 0xxx general, 1xxx
//! workspaces/rooms/devices, 2xxx bookings, 9xxx system.
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::validation("Validation failed")
//!     .with_detail("rooms[0].name", vec!["name must be at least 2 characters"]);
//!
//! let body = ApiResponse::from(&err);
//! assert_eq!(body.code, ErrorCode::ValidationFailed);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
