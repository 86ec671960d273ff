//! Mock prompt generator for testing.

use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::prompt::{GenerationError, PromptArtifact, PromptGenerator, PromptRequest};

/// Mock implementation of the PromptGenerator trait.
///
/// Provides controllable behavior for testing:
/// - Record every request
/// - Fail for specific titles, or with queued errors
/// - Simulate slow generation
#[derive(Debug)]
pub struct MockPromptGenerator {
    requests: Arc<RwLock<Vec<PromptRequest>>>,
    /// Errors returned by the next calls, in order.
    queued_errors: Arc<RwLock<VecDeque<GenerationError>>>,
    /// Titles that always fail.
    failing_titles: Arc<RwLock<HashSet<String>>>,
    delay: Arc<RwLock<Duration>>,
}

impl Default for MockPromptGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPromptGenerator {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(RwLock::new(Vec::new())),
            queued_errors: Arc::new(RwLock::new(VecDeque::new())),
            failing_titles: Arc::new(RwLock::new(HashSet::new())),
            delay: Arc::new(RwLock::new(Duration::ZERO)),
        }
    }

    /// The artifact produced for a request.
    pub fn artifact_for(request: &PromptRequest) -> PromptArtifact {
        PromptArtifact {
            video_prompt: format!("Mock video about {}", request.title),
            title: format!("{}: {}", request.category, request.title),
            description: format!("Inspired by {}", request.description),
            tags: vec![request.category.clone(), "mock".to_string()],
            duration: "30s".to_string(),
        }
    }

    /// Get all recorded requests.
    pub async fn recorded_requests(&self) -> Vec<PromptRequest> {
        self.requests.read().await.clone()
    }

    /// Number of generate calls.
    pub async fn call_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Always fail for candidates with this title.
    pub async fn fail_on_title(&self, title: impl Into<String>) {
        self.failing_titles.write().await.insert(title.into());
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: GenerationError) {
        self.queued_errors.write().await.push_back(error);
    }

    /// Set the simulated generation time.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }
}

#[async_trait]
impl PromptGenerator for MockPromptGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &PromptRequest) -> Result<PromptArtifact, GenerationError> {
        self.requests.write().await.push(request.clone());

        let delay = *self.delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.queued_errors.write().await.pop_front() {
            return Err(err);
        }
        if self.failing_titles.read().await.contains(&request.title) {
            return Err(GenerationError::Malformed(format!(
                "mock failure for '{}'",
                request.title
            )));
        }

        Ok(Self::artifact_for(request))
    }
}
