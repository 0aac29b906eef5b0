//! Question sources: where a room's authoritative question set comes from.
//!
//! A source is consulted once when a room starts and again after every
//! restart. Loading is the only asynchronous step in a room's lifecycle.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{AnsweredQuestion, RoomId};
use crate::errors::DomainError;

pub mod file;
pub mod sample;

pub use file::JsonFileQuestionSource;
pub use sample::SampleQuestionSource;

#[derive(Debug, Error)]
pub enum QuestionSourceError {
    #[error("question bank {path} could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("question bank {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("question bank is inconsistent: {0}")]
    Invalid(#[from] DomainError),
    #[error("question source unavailable: {0}")]
    Unavailable(String),
}

/// Provides the answered question set for a room.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn load(&self, room_id: &RoomId) -> Result<Vec<AnsweredQuestion>, QuestionSourceError>;
}

/// Reject banks with duplicate question ids: answers are keyed by question id,
/// so two questions sharing one would share a recorded answer.
pub(crate) fn ensure_unique_ids(questions: &[AnsweredQuestion]) -> Result<(), QuestionSourceError> {
    let mut seen = std::collections::HashSet::new();
    for question in questions {
        if !seen.insert(question.id()) {
            return Err(DomainError::validation(format!(
                "duplicate question id {}",
                question.id()
            ))
            .into());
        }
    }
    Ok(())
}
