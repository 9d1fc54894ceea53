//! Error Types

use thiserror::Error;

/// Result type alias for agent definition operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// Definition failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tool referenced by a definition is not registered with the host
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Instruction template could not be rendered
    #[error("Template error: {0}")]
    Template(String),

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
            Self::Config(msg) => format!("The agent is misconfigured: {msg}"),
            Self::ToolNotFound(name) => format!("The tool '{name}' is not available."),
            Self::Template(_) => "The agent instructions could not be prepared.".into(),
            _ => "An unexpected error occurred.".into(),
        }
    }
}

impl From<anyhow::Error> for AgentError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
