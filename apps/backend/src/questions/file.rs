use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{ensure_unique_ids, QuestionSource, QuestionSourceError};
use crate::domain::{AnsweredQuestion, RoomId};

/// Reads a JSON array of answered questions from disk.
///
/// The file is re-read on every load, so restarting a room picks up edits.
/// Every room shares the same bank.
#[derive(Debug, Clone)]
pub struct JsonFileQuestionSource {
    path: PathBuf,
}

impl JsonFileQuestionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionSource for JsonFileQuestionSource {
    async fn load(&self, room_id: &RoomId) -> Result<Vec<AnsweredQuestion>, QuestionSourceError> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|source| QuestionSourceError::Io {
                path: self.path.clone(),
                source,
            })?;

        let questions: Vec<AnsweredQuestion> =
            serde_json::from_slice(&raw).map_err(|source| QuestionSourceError::Parse {
                path: self.path.clone(),
                source,
            })?;
        ensure_unique_ids(&questions)?;

        debug!(
            room_id = %room_id,
            path = %self.path.display(),
            count = questions.len(),
            "loaded question bank"
        );
        Ok(questions)
    }
}
