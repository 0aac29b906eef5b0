//! Quizroom test support utilities
//!
//! Shared helpers for unit and integration tests: one-time logging setup,
//! collision-free room identifiers, and assertions on the problem+json
//! error contract.

pub mod logging;
pub mod problem_details;
pub mod unique;

pub use unique::unique_room;
