pub mod dispatcher;

pub use dispatcher::{RoomDispatcher, RoomHandle};
