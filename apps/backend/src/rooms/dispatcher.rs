use std::sync::Arc;

use actix::prelude::*;
use dashmap::{DashMap, DashSet};
use tracing::{debug, info};

use crate::domain::{PlayerId, RoomId};
use crate::questions::QuestionSource;
use crate::session::{ConnectionHandle, RoomActor, RoomEvent, SessionEvent};

pub type RoomHandle = Addr<RoomActor>;

/// Room id → running room actor, plus the player ids issued in each room.
///
/// Rooms are created on first contact and live until the process exits.
pub struct RoomDispatcher {
    rooms: DashMap<RoomId, RoomHandle>,
    issued: DashSet<(RoomId, PlayerId)>,
    source: Arc<dyn QuestionSource>,
}

impl RoomDispatcher {
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self {
            rooms: DashMap::new(),
            issued: DashSet::new(),
            source,
        }
    }

    /// Existing room actor, or a freshly started one.
    ///
    /// Must be called from inside an actix system. Creation happens under the
    /// map's entry lock, so concurrent first contacts for one id agree on a
    /// single actor.
    pub fn resolve(&self, room_id: &RoomId) -> RoomHandle {
        if let Some(existing) = self.rooms.get(room_id) {
            return existing.value().clone();
        }

        self.rooms
            .entry(room_id.clone())
            .or_insert_with(|| {
                info!(room_id = %room_id, "Creating room");
                RoomActor::new(room_id.clone(), Arc::clone(&self.source)).start()
            })
            .value()
            .clone()
    }

    /// Identity for a connection's first attach in `room_id`.
    ///
    /// A claimed id is kept only if this dispatcher issued it for the same
    /// room; anything else gets a freshly minted id.
    pub fn player_identity(&self, room_id: &RoomId, claimed: Option<PlayerId>) -> PlayerId {
        if let Some(claimed) = claimed {
            if self.issued.contains(&(room_id.clone(), claimed.clone())) {
                return claimed;
            }
            debug!(room_id = %room_id, claimed = %claimed, "Unknown player id claimed; issuing a new one");
        }

        let player_id = PlayerId::generate();
        self.issued.insert((room_id.clone(), player_id.clone()));
        player_id
    }

    /// Lookup without creation.
    pub fn get(&self, room_id: &RoomId) -> Option<RoomHandle> {
        self.rooms.get(room_id).map(|entry| entry.value().clone())
    }

    /// Route an event to its room, creating the room if needed.
    pub fn dispatch(&self, room_id: &RoomId, event: SessionEvent<ConnectionHandle>) {
        self.resolve(room_id).do_send(RoomEvent(event));
    }

    pub fn room_ids(&self) -> Vec<RoomId> {
        let mut ids: Vec<RoomId> = self.rooms.iter().map(|entry| entry.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
