//! Per-room quiz state machine.
//!
//! `Session` is pure: it owns the roster and progress for one room, consumes
//! `SessionEvent`s and returns the `Effect`s the caller must execute. It never
//! touches a connection itself, so it can be driven in tests with plain
//! integers as handles.

use std::collections::VecDeque;
use std::mem;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::effect::Effect;
use super::event::SessionEvent;
use super::registry::ConnectionRegistry;
use crate::domain::{
    strip_questions, AnswerId, AnsweredQuestion, ConnectedPlayer, Player, PlayerId, QuestionId,
    RoomId,
};
use crate::questions::QuestionSourceError;
use crate::ws::protocol::ServerMsg;

/// Points awarded for a correct answer.
pub const CORRECT_ANSWER_POINTS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Initializing,
    Waiting,
    Playing,
    Leaderboard,
    Final,
    Error,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Error)
    }
}

/// Read-only view of a room for the admin surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub phase: Phase,
    pub question_index: usize,
    pub question_count: usize,
    pub organizer_attached: bool,
    pub players: Vec<Player>,
}

#[derive(Debug)]
pub struct Session<H> {
    room_id: RoomId,
    phase: Phase,
    organizer: Option<H>,
    players: ConnectionRegistry<H>,
    questions: Vec<AnsweredQuestion>,
    question_index: usize,
    pending: VecDeque<SessionEvent<H>>,
}

impl<H: Clone + PartialEq> Session<H> {
    pub fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            phase: Phase::Initializing,
            organizer: None,
            players: ConnectionRegistry::new(),
            questions: Vec::new(),
            question_index: 0,
            pending: VecDeque::new(),
        }
    }

    /// Effects of entering the initial state.
    pub fn begin(&self) -> Vec<Effect<H>> {
        vec![Effect::LoadQuestions]
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn questions(&self) -> &[AnsweredQuestion] {
        &self.questions
    }

    pub fn players(&self) -> &ConnectionRegistry<H> {
        &self.players
    }

    pub fn organizer(&self) -> Option<&H> {
        self.organizer.as_ref()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            room_id: self.room_id.clone(),
            phase: self.phase,
            question_index: self.question_index,
            question_count: self.questions.len(),
            organizer_attached: self.organizer.is_some(),
            players: self.players.roster(),
        }
    }

    /// Feed the outcome of a question fetch back into the machine.
    ///
    /// Only meaningful while initializing; a late result is dropped.
    pub fn questions_loaded(
        &mut self,
        result: Result<Vec<AnsweredQuestion>, QuestionSourceError>,
    ) -> Vec<Effect<H>> {
        if self.phase != Phase::Initializing {
            warn!(room_id = %self.room_id, phase = ?self.phase, "Question load result arrived outside initialization");
            return Vec::new();
        }

        match result {
            Ok(questions) => {
                info!(room_id = %self.room_id, count = questions.len(), "Questions loaded");
                self.questions = questions;
                self.phase = Phase::Waiting;

                let mut effects = Vec::new();
                for event in mem::take(&mut self.pending) {
                    effects.extend(self.handle(event));
                }
                effects
            }
            Err(err) => {
                error!(room_id = %self.room_id, error = %err, dropped = self.pending.len(), "Question load failed; room unusable");
                self.phase = Phase::Error;
                self.pending.clear();
                Vec::new()
            }
        }
    }

    /// Apply one inbound event.
    pub fn handle(&mut self, event: SessionEvent<H>) -> Vec<Effect<H>> {
        let mut effects = Vec::new();

        match self.phase {
            Phase::Initializing => {
                debug!(room_id = %self.room_id, event = event.name(), "Queued until questions load");
                self.pending.push_back(event);
                return effects;
            }
            Phase::Error => {
                debug!(room_id = %self.room_id, event = event.name(), "Room in error state; event dropped");
                return effects;
            }
            Phase::Playing => self.check_exhausted(),
            _ => {}
        }

        match (self.phase, event) {
            (Phase::Waiting, SessionEvent::OrganizerAttach { handle }) => {
                self.attach_organizer(handle, &mut effects);
            }
            (Phase::Waiting, SessionEvent::PlayerAttach { player_id, handle }) => {
                self.attach_player(player_id, handle, &mut effects);
            }
            (Phase::Waiting, SessionEvent::OrganizerStart) => {
                info!(room_id = %self.room_id, players = self.players.len(), "Game started");
                self.broadcast(ServerMsg::GameStarted, &mut effects);
                self.enter_playing();
            }
            (
                Phase::Playing,
                SessionEvent::PlayerAnswer {
                    player_id,
                    question_id,
                    answer_id,
                    handle,
                },
            ) => {
                self.record_answer(&player_id, question_id, answer_id, &handle, &mut effects);
            }
            (Phase::Playing, SessionEvent::OrganizerAdvance) => {
                self.question_index += 1;
                self.broadcast(ServerMsg::QuestionCompleted, &mut effects);
                self.phase = Phase::Leaderboard;
            }
            (Phase::Playing | Phase::Leaderboard, SessionEvent::OrganizerFinish) => {
                self.broadcast(ServerMsg::GameFinished, &mut effects);
                self.phase = Phase::Final;
            }
            (Phase::Leaderboard, SessionEvent::OrganizerContinue) => {
                self.broadcast(ServerMsg::GameContinued, &mut effects);
                self.enter_playing();
            }
            (Phase::Final, SessionEvent::OrganizerRestart) => {
                info!(room_id = %self.room_id, "Game restarted");
                self.broadcast(ServerMsg::GameRestarted, &mut effects);
                self.players.clear();
                self.questions.clear();
                self.question_index = 0;
                self.phase = Phase::Initializing;
                effects.push(Effect::LoadQuestions);
            }
            (phase, event) => {
                debug!(room_id = %self.room_id, phase = ?phase, event = event.name(), "Event not valid in current phase; ignored");
            }
        }

        effects
    }

    fn enter_playing(&mut self) {
        self.phase = Phase::Playing;
        self.check_exhausted();
    }

    /// Playing with no current question means the game is over.
    fn check_exhausted(&mut self) {
        if self.phase == Phase::Playing && self.question_index >= self.questions.len() {
            debug!(room_id = %self.room_id, index = self.question_index, "No questions left");
            self.phase = Phase::Final;
        }
    }

    fn attach_organizer(&mut self, handle: H, effects: &mut Vec<Effect<H>>) {
        if self.organizer.is_some() {
            debug!(room_id = %self.room_id, "Organizer replaced");
        }
        self.organizer = Some(handle.clone());

        effects.push(Effect::send(
            handle.clone(),
            ServerMsg::ServerReady { player_id: None },
        ));
        effects.push(Effect::send(
            handle.clone(),
            ServerMsg::SetQuestions {
                questions: strip_questions(&self.questions),
            },
        ));
        effects.push(Effect::send(
            handle,
            ServerMsg::SetPlayers {
                players: self.players.roster(),
            },
        ));
    }

    fn attach_player(&mut self, player_id: PlayerId, handle: H, effects: &mut Vec<Effect<H>>) {
        match self.players.get_mut(&player_id) {
            Some(existing) => {
                debug!(room_id = %self.room_id, player_id = %player_id, "Player rebound to new connection");
                existing.rebind(handle.clone());
            }
            None => {
                let player = Player {
                    id: player_id.clone(),
                    display_name: format!("Player {}", self.players.len() + 1),
                    score: 0,
                };
                info!(room_id = %self.room_id, player_id = %player_id, name = %player.display_name, "Player joined");
                self.players
                    .upsert(ConnectedPlayer::new(player, handle.clone()));
            }
        }

        let Some(joined) = self.players.get(&player_id).map(ConnectedPlayer::strip) else {
            return;
        };

        effects.push(Effect::send(
            handle.clone(),
            ServerMsg::ServerReady {
                player_id: Some(player_id.clone()),
            },
        ));
        effects.push(Effect::send(
            handle.clone(),
            ServerMsg::SetQuestions {
                questions: strip_questions(&self.questions),
            },
        ));
        effects.push(Effect::send(
            handle,
            ServerMsg::SetPlayers {
                players: self.players.roster(),
            },
        ));

        for other in self.players.iter().filter(|p| p.id() != &player_id) {
            effects.push(Effect::send(
                other.handle().clone(),
                ServerMsg::PlayerJoined {
                    player: joined.clone(),
                },
            ));
        }
        if let Some(organizer) = &self.organizer {
            effects.push(Effect::send(
                organizer.clone(),
                ServerMsg::PlayerJoined { player: joined },
            ));
        }
    }

    fn record_answer(
        &mut self,
        player_id: &PlayerId,
        question_id: QuestionId,
        answer_id: AnswerId,
        handle: &H,
        effects: &mut Vec<Effect<H>>,
    ) {
        let Some(current) = self.questions.get(self.question_index) else {
            return;
        };
        if current.id() != question_id {
            debug!(room_id = %self.room_id, player_id = %player_id, question_id = %question_id, "Answer for non-current question ignored");
            return;
        }
        let correct = current.is_correct(&answer_id);

        let Some(player) = self.players.get_mut(player_id) else {
            debug!(room_id = %self.room_id, player_id = %player_id, "Answer from unknown player ignored");
            return;
        };
        if player.handle() != handle {
            debug!(room_id = %self.room_id, player_id = %player_id, "Answer from stale connection ignored");
            return;
        }
        if !player.record_answer(question_id, answer_id) {
            debug!(room_id = %self.room_id, player_id = %player_id, "Duplicate answer ignored");
            return;
        }
        if !correct {
            return;
        }

        let score = player.award(CORRECT_ANSWER_POINTS);
        self.broadcast(
            ServerMsg::PlayerScoreUpdated {
                player_id: player_id.clone(),
                score,
            },
            effects,
        );
    }

    /// One send per player in registry order, then the organizer if attached.
    fn broadcast(&self, message: ServerMsg, effects: &mut Vec<Effect<H>>) {
        for player in self.players.iter() {
            effects.push(Effect::send(player.handle().clone(), message.clone()));
        }
        if let Some(organizer) = &self.organizer {
            effects.push(Effect::send(organizer.clone(), message));
        }
    }
}
