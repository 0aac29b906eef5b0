use std::fmt;

use actix::prelude::*;
use thiserror::Error;
use uuid::Uuid;

use crate::ws::protocol::ServerMsg;

/// Outbound message pushed from a room to a connection actor.
#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub struct Deliver(pub ServerMsg);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("connection {0} is closed")]
    Closed(Uuid),
    #[error("connection {0} mailbox is full")]
    Full(Uuid),
}

/// Send handle for one live connection.
///
/// Two handles are equal when they point at the same connection, which is what
/// the session uses to reject answers from a superseded connection.
#[derive(Clone)]
pub struct ConnectionHandle {
    conn_id: Uuid,
    recipient: Recipient<Deliver>,
}

impl ConnectionHandle {
    pub fn new(conn_id: Uuid, recipient: Recipient<Deliver>) -> Self {
        Self { conn_id, recipient }
    }

    pub fn conn_id(&self) -> Uuid {
        self.conn_id
    }

    /// Fire-and-forget delivery.
    pub fn deliver(&self, message: ServerMsg) -> Result<(), DeliveryError> {
        self.recipient
            .try_send(Deliver(message))
            .map_err(|err| match err {
                SendError::Full(_) => DeliveryError::Full(self.conn_id),
                SendError::Closed(_) => DeliveryError::Closed(self.conn_id),
            })
    }
}

impl PartialEq for ConnectionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.conn_id == other.conn_id
    }
}

impl Eq for ConnectionHandle {}

impl fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("conn_id", &self.conn_id)
            .finish()
    }
}
