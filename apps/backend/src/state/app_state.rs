use std::sync::Arc;

use crate::config::ServerConfig;
use crate::rooms::RoomDispatcher;

/// Shared across workers: the room table and process configuration.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<RoomDispatcher>,
    pub config: ServerConfig,
}

impl AppState {
    /// Build state with a dispatcher over the configured question source.
    pub fn new(config: ServerConfig) -> Self {
        let dispatcher = Arc::new(RoomDispatcher::new(config.questions.build()));
        Self { dispatcher, config }
    }
}
