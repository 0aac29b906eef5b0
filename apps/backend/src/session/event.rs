use crate::domain::{AnswerId, PlayerId, QuestionId};

/// Inbound event for one room, already tagged with the sending connection.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent<H> {
    OrganizerAttach {
        handle: H,
    },
    PlayerAttach {
        player_id: PlayerId,
        handle: H,
    },
    OrganizerStart,
    PlayerAnswer {
        player_id: PlayerId,
        question_id: QuestionId,
        answer_id: AnswerId,
        handle: H,
    },
    OrganizerAdvance,
    OrganizerFinish,
    OrganizerContinue,
    OrganizerRestart,
}

impl<H> SessionEvent<H> {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::OrganizerAttach { .. } => "organizer_attach",
            SessionEvent::PlayerAttach { .. } => "player_attach",
            SessionEvent::OrganizerStart => "organizer_start",
            SessionEvent::PlayerAnswer { .. } => "player_answer",
            SessionEvent::OrganizerAdvance => "organizer_advance",
            SessionEvent::OrganizerFinish => "organizer_finish",
            SessionEvent::OrganizerContinue => "organizer_continue",
            SessionEvent::OrganizerRestart => "organizer_restart",
        }
    }
}
