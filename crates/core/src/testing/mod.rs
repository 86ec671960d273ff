//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of every collaborator trait,
//! so the agent and the HTTP layer can be exercised without model access,
//! network or disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use reelsmith_core::testing::{fixtures, MockDiscovery, MockRenderer, MockRenderResult};
//!
//! let discovery = MockDiscovery::with_candidates(fixtures::candidates(3));
//! let renderer = MockRenderer::new();
//!
//! // The second render reports a job that is still processing
//! renderer.push_result(MockRenderResult::Complete).await;
//! renderer.push_result(MockRenderResult::Processing).await;
//! ```

mod mock_audit;
mod mock_discovery;
mod mock_prompt;
mod mock_publisher;
mod mock_renderer;

pub use mock_audit::MockAuditLog;
pub use mock_discovery::MockDiscovery;
pub use mock_prompt::MockPromptGenerator;
pub use mock_publisher::MockPublisher;
pub use mock_renderer::{MockRenderResult, MockRenderer};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::discovery::Candidate;

    /// Create a test candidate with reasonable defaults.
    pub fn candidate(title: &str, category: &str) -> Candidate {
        let slug = title.to_lowercase().replace(' ', "-");
        Candidate {
            title: title.to_string(),
            channel: format!("{} Channel", category),
            views: "1.2M".to_string(),
            url: format!("https://youtube.com/watch?v={}", slug),
            description: format!("All about {}", title.to_lowercase()),
            category: category.to_string(),
        }
    }

    /// Create `n` distinct candidates titled "Video 1", "Video 2", ...
    pub fn candidates(n: usize) -> Vec<Candidate> {
        const CATEGORIES: [&str; 3] = ["Technology", "Science", "Health"];
        (1..=n)
            .map(|i| candidate(&format!("Video {}", i), CATEGORIES[(i - 1) % CATEGORIES.len()]))
            .collect()
    }
}
