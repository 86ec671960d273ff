//! Shutdown coordination between the HTTP server and the agent.

use std::future::Future;
use std::sync::Arc;

use reelsmith_core::AutomationAgent;
use tracing::{info, warn};

/// Wait for `signal`, then cancel any in-flight run.
///
/// Pass this to `with_graceful_shutdown`: the server drains open requests
/// after it resolves, so a pending `/agent/run` returns its cancelled
/// records instead of holding shutdown until every candidate is processed.
pub async fn cancel_on_shutdown<F>(agent: Arc<AutomationAgent>, signal: F)
where
    F: Future<Output = ()>,
{
    signal.await;
    info!("Shutdown signal received");
    if agent.cancel() {
        warn!("Run in flight at shutdown; cancellation requested");
    }
}
