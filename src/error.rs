// Error types module

use std::fmt;

/// Centralized error type for the studio core
///
/// Categorizes errors into 4 main types so the API layer can map them
/// to an HTTP status without inspecting messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudioError {
    /// Configuration errors (invalid YAML, missing env vars, etc.)
    Config(String),

    /// Authentication/authorization failures (invalid JWT, missing role, etc.)
    Auth(String),

    /// Payload validation failures (empty title, too many watermarks, etc.)
    Validation(String),

    /// Internal errors (serialization, unexpected state)
    Internal(String),
}

impl fmt::Display for StudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudioError::Config(msg) => write!(f, "Configuration error: {}", msg),
            StudioError::Auth(msg) => write!(f, "Authentication error: {}", msg),
            StudioError::Validation(msg) => write!(f, "Validation error: {}", msg),
            StudioError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for StudioError {}

impl From<serde_json::Error> for StudioError {
    fn from(err: serde_json::Error) -> Self {
        StudioError::Internal(err.to_string())
    }
}
