use crate::ws::protocol::ServerMsg;

/// Side effect requested by a transition. Executed by the room actor.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect<H> {
    /// Deliver one message to one connection.
    Send { to: H, message: ServerMsg },
    /// Ask the question source for this room's question set.
    LoadQuestions,
}

impl<H> Effect<H> {
    pub fn send(to: H, message: ServerMsg) -> Self {
        Effect::Send { to, message }
    }
}
