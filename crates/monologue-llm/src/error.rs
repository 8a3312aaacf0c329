//! LLM backend error types, split into the three kinds the scheduler
//! pattern-matches on.

use thiserror::Error;

/// Errors that can occur talking to the LLM backend.
///
/// The scheduler folds all three variants into the same
/// single-message-terminate behavior, but keeps them distinct for
/// telemetry and for the stable `[LLM … Error: …]` prefixes.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The backend is unreachable or the transport failed outright.
    #[error("Connection Error: {0}")]
    Connect(String),

    /// The requested model is unknown or not pulled on the backend.
    #[error("Model Error: {0}")]
    ModelNotFound(String),

    /// Any other backend failure (bad response shape, server-side error, …).
    #[error("Error: {0}")]
    Other(String),
}

impl LlmError {
    /// The stable, user-visible bracketed failure string for this error,
    /// e.g. `"[LLM Connection Error: …]"`.
    #[must_use]
    pub fn as_bracketed(&self) -> String {
        format!("[LLM {self}]")
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(source: reqwest::Error) -> Self {
        if source.is_connect() || source.is_timeout() {
            return Self::Connect(source.to_string());
        }
        if source.status() == Some(reqwest::StatusCode::NOT_FOUND) {
            return Self::ModelNotFound(source.to_string());
        }
        Self::Other(source.to_string())
    }
}

/// Result type for LLM operations.
pub type LlmResult<T> = Result<T, LlmError>;
