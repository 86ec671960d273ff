//! Mock renderer for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::render::{RenderArtifact, RenderError, RenderRequest, RenderState, Renderer};

/// Scripted response for one render call.
#[derive(Debug)]
pub enum MockRenderResult {
    /// Completed with media and thumbnail.
    Complete,
    /// Still processing, no media.
    Processing,
    /// Provider reported failure, no media.
    Failed,
    /// Completed but without a media location (malformed response).
    CompletedWithoutMedia,
    /// The call itself fails.
    Error(RenderError),
}

/// Mock implementation of the Renderer trait.
///
/// Calls complete successfully unless a scripted result is queued.
#[derive(Debug)]
pub struct MockRenderer {
    requests: Arc<RwLock<Vec<RenderRequest>>>,
    script: Arc<RwLock<VecDeque<MockRenderResult>>>,
    delay: Arc<RwLock<Duration>>,
    next_job: AtomicUsize,
}

impl Default for MockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRenderer {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(RwLock::new(Vec::new())),
            script: Arc::new(RwLock::new(VecDeque::new())),
            delay: Arc::new(RwLock::new(Duration::ZERO)),
            next_job: AtomicUsize::new(1),
        }
    }

    /// Queue the result of the next unscripted call.
    pub async fn push_result(&self, result: MockRenderResult) {
        self.script.write().await.push_back(result);
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: RenderError) {
        self.push_result(MockRenderResult::Error(error)).await;
    }

    /// Set the simulated render time.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }

    /// Get all recorded requests.
    pub async fn recorded_requests(&self) -> Vec<RenderRequest> {
        self.requests.read().await.clone()
    }

    /// Number of render calls.
    pub async fn call_count(&self) -> usize {
        self.requests.read().await.len()
    }

    fn completed(job_id: &str) -> RenderArtifact {
        RenderArtifact::completed(
            job_id,
            format!("https://mock.render/videos/{}.mp4", job_id),
            format!("https://mock.render/thumbnails/{}.jpg", job_id),
        )
    }
}

#[async_trait]
impl Renderer for MockRenderer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn render(&self, request: RenderRequest) -> Result<RenderArtifact, RenderError> {
        self.requests.write().await.push(request);

        let delay = *self.delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let job_id = format!("mock_job_{}", self.next_job.fetch_add(1, Ordering::SeqCst));
        let scripted = self.script.write().await.pop_front();

        match scripted.unwrap_or(MockRenderResult::Complete) {
            MockRenderResult::Complete => Ok(Self::completed(&job_id)),
            MockRenderResult::Processing => Ok(RenderArtifact::pending(job_id, RenderState::Processing)),
            MockRenderResult::Failed => Ok(RenderArtifact::pending(job_id, RenderState::Failed)),
            MockRenderResult::CompletedWithoutMedia => {
                Ok(RenderArtifact::pending(job_id, RenderState::Completed))
            }
            MockRenderResult::Error(err) => Err(err),
        }
    }

    async fn check_status(&self, job_id: &str) -> Result<RenderArtifact, RenderError> {
        Ok(Self::completed(job_id))
    }
}
