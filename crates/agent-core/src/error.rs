//! Error Types

use thiserror::Error;

/// Result type alias for substrate operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Messaging substrate error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// Malformed inbound envelope
    #[error("Parse error: {0}")]
    Parse(String),

    /// Session not found or in an invalid state
    #[error("Session error: {0}")]
    Session(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AgentError::Parse(_) | AgentError::Json(_) => {
                "I couldn't understand that message. Please send plain text.".into()
            }
            AgentError::Session(_) => {
                "This session is no longer active. Please start a new one.".into()
            }
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for AgentError {
    fn from(err: anyhow::Error) -> Self {
        AgentError::Other(err.to_string())
    }
}
