use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::domain::RoomId;
use crate::error::AppError;
use crate::errors::ErrorCode;

pub const MAX_ROOM_ID_LEN: usize = 64;

/// Room id taken from the `{room_id}` path segment.
///
/// Only shape is checked here; whether the room exists is up to the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomIdPath(pub RoomId);

impl RoomIdPath {
    pub fn into_inner(self) -> RoomId {
        self.0
    }
}

/// Non-empty, at most 64 chars, ASCII alphanumerics plus `-` and `_`.
pub fn parse_room_id(raw: &str) -> Result<RoomId, AppError> {
    if raw.is_empty() {
        return Err(AppError::bad_request(
            ErrorCode::InvalidRoomId,
            "Room id must not be empty",
        ));
    }
    if raw.len() > MAX_ROOM_ID_LEN {
        return Err(AppError::bad_request(
            ErrorCode::InvalidRoomId,
            format!("Room id must be at most {MAX_ROOM_ID_LEN} characters"),
        ));
    }
    if !raw
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            ErrorCode::InvalidRoomId,
            format!("Invalid room id: {raw}"),
        ));
    }
    Ok(RoomId::new(raw))
}

impl FromRequest for RoomIdPath {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("room_id") {
            Some(raw) => parse_room_id(raw).map(RoomIdPath),
            None => Err(AppError::bad_request(
                ErrorCode::InvalidRoomId,
                "Missing room_id parameter",
            )),
        };
        ready(result)
    }
}
