#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod questions;
pub mod rooms;
pub mod routes;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod ws;

// Re-exports for public API
pub use config::{QuestionSourceConfig, ServerConfig};
pub use error::AppError;
pub use errors::ErrorCode;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use rooms::RoomDispatcher;
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    quizroom_test_support::logging::init();
}
