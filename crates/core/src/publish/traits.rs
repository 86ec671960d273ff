//! Trait definitions for the publish module.

use async_trait::async_trait;

use super::error::PublishError;
use super::types::{PublishArtifact, PublishRequest};

/// A video platform that accepts uploads.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Returns the name of this publisher implementation.
    fn name(&self) -> &str;

    /// Upload a clip. Returns the platform receipt on success.
    async fn publish(&self, request: PublishRequest) -> Result<PublishArtifact, PublishError>;
}
