//! Error codes for the Quizroom HTTP surface.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that appear
//! in problem+json responses.

use core::fmt;

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Room identifier is empty or malformed
    InvalidRoomId,
    /// General validation error
    ValidationError,

    // Resource Not Found
    /// No session exists for the room
    RoomNotFound,

    // System Errors
    /// Room actor did not answer (mailbox closed)
    RoomUnavailable,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRoomId => "INVALID_ROOM_ID",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::RoomNotFound => "ROOM_NOT_FOUND",

            Self::RoomUnavailable => "ROOM_UNAVAILABLE",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
