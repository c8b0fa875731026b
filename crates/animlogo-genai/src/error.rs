//! GenAI client error types.

use serde::Deserialize;
use thiserror::Error;

pub type GenAiResult<T> = Result<T, GenAiError>;

#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Server error {0}: {1}")]
    ServerError(u16, String),

    #[error("Request failed with status {0}: {1}")]
    RequestFailed(u16, String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Google API error envelope: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

impl GenAiError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Classify a non-success HTTP response.
    ///
    /// The API's own message is pulled out of the error envelope when the
    /// body has one, so callers can match on it.
    pub fn from_http_status(status: u16, body: &str) -> Self {
        let message = Self::extract_message(body);
        match status {
            400 => Self::InvalidRequest(message),
            401 | 403 => Self::PermissionDenied(message),
            404 => Self::NotFound(message),
            429 => Self::RateLimited(message),
            500..=599 => Self::ServerError(status, message),
            _ => Self::RequestFailed(status, message),
        }
    }

    fn extract_message(body: &str) -> String {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => match envelope.error.status {
                Some(status) if !envelope.error.message.is_empty() => {
                    format!("{} ({})", envelope.error.message, status)
                }
                Some(status) => status,
                None => envelope.error.message,
            },
            Err(_) => body.trim().to_string(),
        }
    }

    /// Check if error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenAiError::Network(_) | GenAiError::RateLimited(_) | GenAiError::ServerError(_, _)
        )
    }
}
