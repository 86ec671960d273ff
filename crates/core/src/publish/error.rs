//! Error types for the publish module.

use thiserror::Error;

/// Errors that can occur while publishing.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Title, media location or other metadata is unusable.
    #[error("Invalid metadata: {reason}")]
    InvalidMetadata { reason: String },

    /// The platform rejected or aborted the upload.
    #[error("Upload failed: {reason}")]
    Upload { reason: String },

    /// The platform asked us to slow down.
    #[error("Rate limited by platform")]
    RateLimited,

    /// Credentials were missing or refused.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Transport failure talking to the platform.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl PublishError {
    /// Creates a new invalid metadata error.
    pub fn invalid_metadata(reason: impl Into<String>) -> Self {
        Self::InvalidMetadata {
            reason: reason.into(),
        }
    }

    /// Creates a new upload error.
    pub fn upload(reason: impl Into<String>) -> Self {
        Self::Upload {
            reason: reason.into(),
        }
    }

    /// Whether this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited | Self::Http(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            PublishError::invalid_metadata("title is empty").to_string(),
            "Invalid metadata: title is empty"
        );
        assert_eq!(PublishError::RateLimited.to_string(), "Rate limited by platform");
    }

    #[test]
    fn test_retryable() {
        assert!(PublishError::RateLimited.is_retryable());
        assert!(PublishError::Http("timeout".to_string()).is_retryable());
        assert!(!PublishError::upload("quota exceeded").is_retryable());
        assert!(!PublishError::Unauthorized("token expired".to_string()).is_retryable());
    }
}
