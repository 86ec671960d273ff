//! Mock publisher for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::publish::{PublishArtifact, PublishError, PublishRequest, Publisher};

/// Mock implementation of the Publisher trait.
///
/// Every successful call gets a distinct id and URL.
#[derive(Debug)]
pub struct MockPublisher {
    requests: Arc<RwLock<Vec<PublishRequest>>>,
    queued_errors: Arc<RwLock<VecDeque<PublishError>>>,
    delay: Arc<RwLock<Duration>>,
    next_id: AtomicUsize,
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPublisher {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(RwLock::new(Vec::new())),
            queued_errors: Arc::new(RwLock::new(VecDeque::new())),
            delay: Arc::new(RwLock::new(Duration::ZERO)),
            next_id: AtomicUsize::new(1),
        }
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: PublishError) {
        self.queued_errors.write().await.push_back(error);
    }

    /// Set the simulated upload time.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }

    /// Get all recorded requests.
    pub async fn recorded_requests(&self) -> Vec<PublishRequest> {
        self.requests.read().await.clone()
    }

    /// Number of publish calls.
    pub async fn call_count(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn publish(&self, request: PublishRequest) -> Result<PublishArtifact, PublishError> {
        self.requests.write().await.push(request);

        let delay = *self.delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.queued_errors.write().await.pop_front() {
            return Err(err);
        }

        let video_id = format!("MOCK_{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        Ok(PublishArtifact {
            url: format!("https://youtube.com/watch?v={}", video_id),
            video_id,
            state: "uploaded".to_string(),
        })
    }
}
