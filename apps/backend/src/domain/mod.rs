//! Domain layer: quiz value types and client-facing projections.

pub mod fixtures;
pub mod ids;
pub mod player;
pub mod question;

// Re-exports for ergonomics
pub use fixtures::QuestionFixtures;
pub use ids::{AnswerId, PlayerId, QuestionId, RoomId};
pub use player::{ConnectedPlayer, Player};
pub use question::{strip_questions, Answer, AnsweredQuestion, Question};
