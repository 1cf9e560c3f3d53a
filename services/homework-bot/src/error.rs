//! Error types for the homework bot

/// Errors that can occur while watching homework statuses
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("endpoint unavailable, status {0}")]
    HttpStatus(u16),

    #[error("API reported an error: {0}")]
    ApiEnvelope(String),

    #[error("malformed response: {0}")]
    Shape(String),

    #[error("response has no '{0}' key")]
    MissingKey(&'static str),

    #[error("homework record has no '{0}' field")]
    MissingField(&'static str),

    #[error("unknown homework status '{0}'")]
    UnknownStatus(String),

    #[error("chat delivery failed: {0}")]
    FatalNotify(String),

    #[error("startup failed: {0}")]
    Startup(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BotError {
    /// Whether the poll loop handles this error in place and keeps running.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            BotError::Transport(_)
                | BotError::HttpStatus(_)
                | BotError::ApiEnvelope(_)
                | BotError::Shape(_)
                | BotError::MissingKey(_)
                | BotError::MissingField(_)
                | BotError::UnknownStatus(_)
        )
    }
}

/// Result type alias for homework bot operations
pub type Result<T> = std::result::Result<T, BotError>;
