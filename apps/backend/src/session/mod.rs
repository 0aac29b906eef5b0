//! Room sessions: the pure state machine, its roster, and the actor that runs it.

pub mod actor;
pub mod effect;
pub mod event;
pub mod handle;
pub mod machine;
pub mod registry;

pub use actor::{GetSnapshot, RoomActor, RoomEvent};
pub use effect::Effect;
pub use event::SessionEvent;
pub use handle::{ConnectionHandle, Deliver, DeliveryError};
pub use machine::{Phase, RoomSnapshot, Session, CORRECT_ANSWER_POINTS};
pub use registry::ConnectionRegistry;
