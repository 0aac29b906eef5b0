//! Per-room roster storage.

use indexmap::IndexMap;

use crate::domain::{ConnectedPlayer, Player, PlayerId};

/// Player id → connected player record, iterated in insertion order.
///
/// Rebinding an existing player keeps its original position.
#[derive(Debug, Clone)]
pub struct ConnectionRegistry<H> {
    players: IndexMap<PlayerId, ConnectedPlayer<H>>,
}

impl<H> Default for ConnectionRegistry<H> {
    fn default() -> Self {
        Self {
            players: IndexMap::new(),
        }
    }
}

impl<H> ConnectionRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record or replace the existing one in place.
    pub fn upsert(&mut self, player: ConnectedPlayer<H>) {
        self.players.insert(player.id().clone(), player);
    }

    pub fn get(&self, id: &PlayerId) -> Option<&ConnectedPlayer<H>> {
        self.players.get(id)
    }

    pub fn get_mut(&mut self, id: &PlayerId) -> Option<&mut ConnectedPlayer<H>> {
        self.players.get_mut(id)
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.players.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConnectedPlayer<H>> {
        self.players.values()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }

    /// Client-facing roster in registry order.
    pub fn roster(&self) -> Vec<Player> {
        self.iter().map(ConnectedPlayer::strip).collect()
    }
}
