//! Simulated renderer.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use super::error::RenderError;
use super::traits::Renderer;
use super::types::{RenderArtifact, RenderRequest};

/// Renderer that pretends to call a video model.
///
/// Every request completes after a fixed delay with media and thumbnail
/// locations under `base_url` derived from the job id.
#[derive(Debug, Clone)]
pub struct SimulatedRenderer {
    base_url: String,
    delay: Duration,
}

impl SimulatedRenderer {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            delay: Duration::from_millis(2000),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn artifact_for(&self, job_id: &str) -> RenderArtifact {
        RenderArtifact::completed(
            job_id,
            format!("{}/videos/generated_{}.mp4", self.base_url, job_id),
            format!("{}/thumbnails/thumb_{}.jpg", self.base_url, job_id),
        )
    }
}

#[async_trait]
impl Renderer for SimulatedRenderer {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn render(&self, request: RenderRequest) -> Result<RenderArtifact, RenderError> {
        if request.prompt.trim().is_empty() {
            return Err(RenderError::invalid_request("prompt is empty"));
        }

        let job_id = format!("video_{}", uuid::Uuid::new_v4().simple());
        debug!(
            "Simulated render {} ({}s, {})",
            job_id, request.duration_secs, request.aspect_ratio
        );

        tokio::time::sleep(self.delay).await;

        info!("Render {} completed", job_id);
        Ok(self.artifact_for(&job_id))
    }

    async fn check_status(&self, job_id: &str) -> Result<RenderArtifact, RenderError> {
        if job_id.trim().is_empty() {
            return Err(RenderError::invalid_request("job id is empty"));
        }
        Ok(self.artifact_for(job_id))
    }
}
