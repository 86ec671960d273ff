//! Trait definitions for the render module.

use async_trait::async_trait;

use super::error::RenderError;
use super::types::{RenderArtifact, RenderRequest};

/// A video generation backend.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Returns the name of this renderer implementation.
    fn name(&self) -> &str;

    /// Submit a render and wait for the provider's answer.
    ///
    /// The returned artifact may still be `processing`; callers decide what
    /// to do with a job that has not completed.
    async fn render(&self, request: RenderRequest) -> Result<RenderArtifact, RenderError>;

    /// Look up the current state of a previously submitted job.
    async fn check_status(&self, job_id: &str) -> Result<RenderArtifact, RenderError>;
}
