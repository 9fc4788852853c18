use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::NotFound
            | Self::WorkspaceNotFound
            | Self::RoomNotFound
            | Self::RoomNotInWorkspace
            | Self::DeviceNotFound
            | Self::DeviceNotInRoom
            | Self::BookingNotFound => StatusCode::NOT_FOUND,

            Self::VersionConflict => StatusCode::CONFLICT,

            Self::DatabaseError | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::ConstraintViolation
            | Self::InvalidBookingWindow => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_per_code() {
        let cases = [
            (ErrorCode::RoomNotInWorkspace, StatusCode::NOT_FOUND),
            (ErrorCode::DeviceNotInRoom, StatusCode::NOT_FOUND),
            (ErrorCode::VersionConflict, StatusCode::CONFLICT),
            (ErrorCode::ConstraintViolation, StatusCode::BAD_REQUEST),
            (ErrorCode::InvalidBookingWindow, StatusCode::BAD_REQUEST),
            (ErrorCode::ConfigError, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (code, status) in cases {
            assert_eq!(code.http_status(), status, "code {code}");
        }
    }
}
