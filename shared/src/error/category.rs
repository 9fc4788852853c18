use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Area an [`ErrorCode`] belongs to, taken from its thousands digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    /// Workspaces, rooms and devices
    Workspace,
    Booking,
    /// Anything the caller cannot fix; logged when returned
    System,
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            0..1000 => ErrorCategory::General,
            1000..2000 => ErrorCategory::Workspace,
            2000..3000 => ErrorCategory::Booking,
            _ => ErrorCategory::System,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_follows_thousands_digit() {
        assert_eq!(ErrorCode::ConstraintViolation.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::DeviceNotInRoom.category(), ErrorCategory::Workspace);
        assert_eq!(ErrorCode::InvalidBookingWindow.category(), ErrorCategory::Booking);
        assert_eq!(ErrorCode::ConfigError.category(), ErrorCategory::System);
        assert_eq!(
            serde_json::to_string(&ErrorCategory::Workspace).unwrap(),
            "\"workspace\""
        );
    }
}
