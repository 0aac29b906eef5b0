pub mod protocol;
pub mod session;

pub use session::{upgrade, Role, WsSession};
