pub mod server;

pub use server::{QuestionSourceConfig, ServerConfig};
