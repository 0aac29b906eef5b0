//! Players and their per-room connection records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ids::{AnswerId, PlayerId, QuestionId};

/// Client-facing player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub score: u32,
}

/// Server-side roster entry: a player, the handle their messages go to, and
/// the answers they submitted.
///
/// Generic over the handle type so the session machine can be driven in tests
/// without live connections.
#[derive(Debug, Clone)]
pub struct ConnectedPlayer<H> {
    player: Player,
    handle: H,
    answers: HashMap<QuestionId, AnswerId>,
}

impl<H> ConnectedPlayer<H> {
    pub fn new(player: Player, handle: H) -> Self {
        Self {
            player,
            handle,
            answers: HashMap::new(),
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.player.id
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn score(&self) -> u32 {
        self.player.score
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Point this player's outbound traffic at a new connection.
    pub fn rebind(&mut self, handle: H) {
        self.handle = handle;
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&AnswerId> {
        self.answers.get(question_id)
    }

    pub fn has_answered(&self, question_id: &str) -> bool {
        self.answers.contains_key(question_id)
    }

    /// Record an answer. First answer wins; returns `false` if one was
    /// already recorded for this question.
    pub fn record_answer(&mut self, question_id: QuestionId, answer_id: AnswerId) -> bool {
        if self.answers.contains_key(&question_id) {
            return false;
        }
        self.answers.insert(question_id, answer_id);
        true
    }

    /// Add points and return the new score.
    pub fn award(&mut self, points: u32) -> u32 {
        self.player.score = self.player.score.saturating_add(points);
        self.player.score
    }

    /// Stripped projection sent to clients.
    pub fn strip(&self) -> Player {
        self.player.clone()
    }
}
