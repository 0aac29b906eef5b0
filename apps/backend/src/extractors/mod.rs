pub mod room_id;

pub use room_id::{parse_room_id, RoomIdPath};
