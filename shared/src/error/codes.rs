//! Numeric error codes
//!
//! The thousands digit groups codes by area (see [`super::ErrorCategory`]).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code carried in every error body
///
/// Serialized as a bare u16 so the admin UI can switch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // 0xxx
    ValidationFailed = 2,
    /// Row lookup failed without a more specific resource
    NotFound = 3,
    /// Body could not be read as JSON, or disagrees with the path
    InvalidRequest = 5,
    /// Stored row changed since the caller read it
    VersionConflict = 9,
    /// Store rejected the write (foreign key, check, unique)
    ConstraintViolation = 10,

    // 1xxx
    WorkspaceNotFound = 1001,
    RoomNotFound = 1101,
    /// Room id in a nested payload does not belong to the workspace
    RoomNotInWorkspace = 1102,
    DeviceNotFound = 1201,
    /// Device id in a nested payload does not belong to the room
    DeviceNotInRoom = 1202,

    // 2xxx
    BookingNotFound = 2001,
    InvalidBookingWindow = 2002,

    // 9xxx
    DatabaseError = 9002,
    /// Startup settings are unusable (bad `DATABASE_URL`)
    ConfigError = 9005,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default message when the caller supplies none
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::VersionConflict => "Resource was modified by another request",
            ErrorCode::ConstraintViolation => "Data constraint violated",
            ErrorCode::WorkspaceNotFound => "Workspace not found",
            ErrorCode::RoomNotFound => "Room not found",
            ErrorCode::RoomNotInWorkspace => "Room does not belong to this workspace",
            ErrorCode::DeviceNotFound => "Device not found",
            ErrorCode::DeviceNotInRoom => "Device does not belong to this room",
            ErrorCode::BookingNotFound => "Booking not found",
            ErrorCode::InvalidBookingWindow => "Booking start time must precede end time",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A u16 that names no [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            5 => ErrorCode::InvalidRequest,
            9 => ErrorCode::VersionConflict,
            10 => ErrorCode::ConstraintViolation,
            1001 => ErrorCode::WorkspaceNotFound,
            1101 => ErrorCode::RoomNotFound,
            1102 => ErrorCode::RoomNotInWorkspace,
            1201 => ErrorCode::DeviceNotFound,
            1202 => ErrorCode::DeviceNotInRoom,
            2001 => ErrorCode::BookingNotFound,
            2002 => ErrorCode::InvalidBookingWindow,
            9002 => ErrorCode::DatabaseError,
            9005 => ErrorCode::ConfigError,
            _ => return Err(InvalidErrorCode(value)),
        };
        Ok(code)
    }
}
