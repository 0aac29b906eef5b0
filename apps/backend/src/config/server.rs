use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::AppError;
use crate::questions::{JsonFileQuestionSource, QuestionSource, SampleQuestionSource};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_HEARTBEAT_SECS: u64 = 20;
const DEFAULT_CLIENT_TIMEOUT_SECS: u64 = 40;

/// Where rooms get their questions from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSourceConfig {
    /// Built-in capitals quiz
    Sample,
    /// JSON question bank, re-read on every load
    File(PathBuf),
}

impl QuestionSourceConfig {
    pub fn build(&self) -> Arc<dyn QuestionSource> {
        match self {
            QuestionSourceConfig::Sample => Arc::new(SampleQuestionSource),
            QuestionSourceConfig::File(path) => Arc::new(JsonFileQuestionSource::new(path.clone())),
        }
    }
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub heartbeat_interval: Duration,
    pub client_timeout: Duration,
    pub questions: QuestionSourceConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            heartbeat_interval: Duration::from_secs(DEFAULT_HEARTBEAT_SECS),
            client_timeout: Duration::from_secs(DEFAULT_CLIENT_TIMEOUT_SECS),
            questions: QuestionSourceConfig::Sample,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("QUIZROOM_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = parsed_var("QUIZROOM_PORT", DEFAULT_PORT)?;
        let heartbeat_secs = parsed_var("QUIZROOM_HEARTBEAT_SECS", DEFAULT_HEARTBEAT_SECS)?;
        let timeout_secs = parsed_var("QUIZROOM_CLIENT_TIMEOUT_SECS", DEFAULT_CLIENT_TIMEOUT_SECS)?;

        if heartbeat_secs == 0 {
            return Err(AppError::config(
                "QUIZROOM_HEARTBEAT_SECS must be greater than zero",
            ));
        }
        if timeout_secs <= heartbeat_secs {
            return Err(AppError::config(format!(
                "QUIZROOM_CLIENT_TIMEOUT_SECS ({timeout_secs}) must exceed QUIZROOM_HEARTBEAT_SECS ({heartbeat_secs})"
            )));
        }

        let questions = match env::var("QUIZROOM_QUESTIONS_FILE") {
            Ok(path) if !path.trim().is_empty() => QuestionSourceConfig::File(PathBuf::from(path)),
            _ => QuestionSourceConfig::Sample,
        };

        Ok(Self {
            host,
            port,
            heartbeat_interval: Duration::from_secs(heartbeat_secs),
            client_timeout: Duration::from_secs(timeout_secs),
            questions,
        })
    }

    /// Short heartbeat settings for tests that exercise connection timeouts.
    pub fn with_heartbeat(mut self, interval: Duration, timeout: Duration) -> Self {
        self.heartbeat_interval = interval;
        self.client_timeout = timeout;
        self
    }
}

/// Optional environment variable parsed as `T`, falling back to `default`.
fn parsed_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::config(format!("{name} must be a valid number, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}
