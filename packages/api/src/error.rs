//! Errors returned by backend clients.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend URL or key missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure before a response was received.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response carrying the backend's own message.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    /// Failure reported by a backend that has no HTTP status (the in-memory backend).
    #[error("{0}")]
    Backend(String),
}

impl ApiError {
    /// Human-readable text suitable for inline display.
    pub fn message(&self) -> String {
        match self {
            ApiError::Status { message, .. } | ApiError::Backend(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the backend rejected the caller's credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ApiError::NotAuthenticated | ApiError::Status { status: 401 | 403, .. }
        )
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}
