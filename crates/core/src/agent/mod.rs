//! Automation agent.
//!
//! The agent fetches trending candidates and pushes each one through the
//! stage chain:
//! - **Prompt**: generate a render directive and publishing metadata
//! - **Log**: record that the prompt exists
//! - **Render**: turn the directive into a clip
//! - **Publish**: upload the clip, then log the published location
//!
//! Candidates are processed strictly one after another. A failing candidate
//! never stops the batch; it is recorded and the next one starts.

mod config;
mod guard;
mod runner;
mod types;

pub use config::{AgentConfig, LogFailurePolicy, RetryConfig};
pub use guard::RunGuard;
pub use runner::AutomationAgent;
pub use types::{
    AgentError, AgentStatus, Outcome, OutcomeRecord, OutcomeStatus, RunSummary, Stage,
    StageError, CANCELLED_MESSAGE, INCOMPLETE_RENDER_MESSAGE,
};
