//! Questions and answers.
//!
//! [`AnsweredQuestion`] is the server-side record carrying the correct answer.
//! It deliberately does not implement `Serialize`: the only way to put a
//! question on the wire is through its stripped [`Question`] projection.

use serde::{Deserialize, Serialize};

use super::ids::{AnswerId, QuestionId};
use crate::errors::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub text: String,
}

impl Answer {
    pub fn new(id: impl Into<AnswerId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Client-facing question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Time budget in milliseconds. Carried for clients; not enforced server-side.
    pub time_ms: u64,
    pub answers: Vec<Answer>,
}

impl Question {
    pub fn has_answer(&self, answer_id: &str) -> bool {
        self.answers.iter().any(|answer| answer.id == answer_id)
    }
}

/// Question plus the identifier of its correct answer.
///
/// Invariant: `correct_answer_id` names one of `question.answers`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "AnsweredQuestionRecord")]
pub struct AnsweredQuestion {
    question: Question,
    correct_answer_id: AnswerId,
}

/// On-disk shape of an answered question (question fields flattened).
#[derive(Debug, Deserialize)]
struct AnsweredQuestionRecord {
    #[serde(flatten)]
    question: Question,
    correct_answer_id: AnswerId,
}

impl TryFrom<AnsweredQuestionRecord> for AnsweredQuestion {
    type Error = DomainError;

    fn try_from(record: AnsweredQuestionRecord) -> Result<Self, Self::Error> {
        Self::new(record.question, record.correct_answer_id)
    }
}

impl AnsweredQuestion {
    pub fn new(question: Question, correct_answer_id: impl Into<AnswerId>) -> Result<Self, DomainError> {
        let correct_answer_id = correct_answer_id.into();
        if !question.has_answer(&correct_answer_id) {
            return Err(DomainError::validation(format!(
                "question {} has no answer {correct_answer_id}",
                question.id
            )));
        }
        Ok(Self {
            question,
            correct_answer_id,
        })
    }

    pub fn id(&self) -> &str {
        &self.question.id
    }

    pub fn correct_answer_id(&self) -> &str {
        &self.correct_answer_id
    }

    pub fn is_correct(&self, answer_id: &str) -> bool {
        self.correct_answer_id == answer_id
    }

    /// Stripped projection sent to clients.
    pub fn strip(&self) -> Question {
        self.question.clone()
    }
}

pub fn strip_questions(questions: &[AnsweredQuestion]) -> Vec<Question> {
    questions.iter().map(AnsweredQuestion::strip).collect()
}
