use serde::{Deserialize, Serialize};

use crate::domain::{AnswerId, Player, PlayerId, Question, QuestionId};

/// Frames accepted on a player connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerMsg {
    /// Join the room, or rebind with a previously issued id.
    Attach {
        #[serde(default)]
        player_id: Option<PlayerId>,
    },
    Answer {
        question_id: QuestionId,
        answer_id: AnswerId,
    },
}

/// Frames accepted on the organizer connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrganizerMsg {
    Attach,
    Start,
    Advance,
    Continue,
    Finish,
    Restart,
}

/// Everything the server ever sends to a participant.
///
/// Only client-facing projections (`Question`, `Player`) can appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    ServerReady {
        /// Identity issued to a player connection; absent for the organizer.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        player_id: Option<PlayerId>,
    },
    SetQuestions {
        questions: Vec<Question>,
    },
    SetPlayers {
        players: Vec<Player>,
    },
    PlayerJoined {
        player: Player,
    },
    GameStarted,
    PlayerScoreUpdated {
        player_id: PlayerId,
        score: u32,
    },
    QuestionCompleted,
    GameContinued,
    GameFinished,
    GameRestarted,
}

impl ServerMsg {
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMsg::ServerReady { .. } => "server_ready",
            ServerMsg::SetQuestions { .. } => "set_questions",
            ServerMsg::SetPlayers { .. } => "set_players",
            ServerMsg::PlayerJoined { .. } => "player_joined",
            ServerMsg::GameStarted => "game_started",
            ServerMsg::PlayerScoreUpdated { .. } => "player_score_updated",
            ServerMsg::QuestionCompleted => "question_completed",
            ServerMsg::GameContinued => "game_continued",
            ServerMsg::GameFinished => "game_finished",
            ServerMsg::GameRestarted => "game_restarted",
        }
    }
}
