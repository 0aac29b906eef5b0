use async_trait::async_trait;

use super::{QuestionSource, QuestionSourceError};
use crate::domain::{AnsweredQuestion, QuestionFixtures, RoomId};

/// Serves the built-in demo bank to every room.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleQuestionSource;

#[async_trait]
impl QuestionSource for SampleQuestionSource {
    async fn load(&self, _room_id: &RoomId) -> Result<Vec<AnsweredQuestion>, QuestionSourceError> {
        Ok(QuestionFixtures::capitals())
    }
}
