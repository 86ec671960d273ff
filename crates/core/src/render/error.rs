//! Error types for the render module.

use thiserror::Error;

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The request was rejected before a job was created.
    #[error("Invalid render request: {reason}")]
    InvalidRequest { reason: String },

    /// The provider reported a failure.
    #[error("Render provider error: {reason}")]
    Provider { reason: String },

    /// Transport failure talking to the provider.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider did not answer in time.
    #[error("Render timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },
}

impl RenderError {
    /// Creates a new invalid request error.
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Creates a new provider error.
    pub fn provider(reason: impl Into<String>) -> Self {
        Self::Provider {
            reason: reason.into(),
        }
    }

    /// Whether this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Http(_))
    }
}
