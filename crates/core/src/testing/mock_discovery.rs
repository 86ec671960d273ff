//! Mock discovery source for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::discovery::{Candidate, Discovery, DiscoveryError};

/// Mock implementation of the Discovery trait.
///
/// Returns whatever candidates were configured, in order.
#[derive(Debug)]
pub struct MockDiscovery {
    candidates: Arc<RwLock<Vec<Candidate>>>,
    next_error: Arc<RwLock<Option<DiscoveryError>>>,
    fetch_count: Arc<RwLock<usize>>,
    delay: Arc<RwLock<Duration>>,
}

impl Default for MockDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDiscovery {
    /// Create a mock with no candidates.
    pub fn new() -> Self {
        Self::with_candidates(Vec::new())
    }

    /// Create a mock returning the given candidates.
    pub fn with_candidates(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates: Arc::new(RwLock::new(candidates)),
            next_error: Arc::new(RwLock::new(None)),
            fetch_count: Arc::new(RwLock::new(0)),
            delay: Arc::new(RwLock::new(Duration::ZERO)),
        }
    }

    /// Replace the configured candidates.
    pub async fn set_candidates(&self, candidates: Vec<Candidate>) {
        *self.candidates.write().await = candidates;
    }

    /// Configure the next fetch to fail with the given error.
    pub async fn set_next_error(&self, error: DiscoveryError) {
        *self.next_error.write().await = Some(error);
    }

    /// Set the simulated fetch time.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = delay;
    }

    /// Number of fetches performed.
    pub async fn fetch_count(&self) -> usize {
        *self.fetch_count.read().await
    }
}

#[async_trait]
impl Discovery for MockDiscovery {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_candidates(&self) -> Result<Vec<Candidate>, DiscoveryError> {
        *self.fetch_count.write().await += 1;

        let delay = *self.delay.read().await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        Ok(self.candidates.read().await.clone())
    }
}
