//! Types for the automation agent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audit::LoggingError;
use crate::discovery::{Candidate, DiscoveryError};
use crate::prompt::{GenerationError, PromptArtifact};
use crate::publish::PublishError;
use crate::render::{RenderError, RenderState};

/// Error message recorded for candidates skipped by a cancelled run.
pub const CANCELLED_MESSAGE: &str = "run cancelled";

/// Error message recorded when a render job did not yield media.
pub const INCOMPLETE_RENDER_MESSAGE: &str = "video generation incomplete";

/// Errors that escape the agent. Everything else is recorded per candidate.
#[derive(Debug, Error)]
pub enum AgentError {
    /// A run is already in flight on this agent.
    #[error("agent is already running")]
    AlreadyRunning,

    /// The requested limit is not usable.
    #[error("invalid limit: {0} (must be at least 1)")]
    InvalidLimit(usize),

    /// Candidates could not be fetched.
    #[error("discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    /// `process_single` was given an index past the end of the discovery list.
    #[error("no candidate at index {index} ({available} available)")]
    CandidateNotFound { index: usize, available: usize },
}

/// One step of the per-candidate chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Prompt,
    Log,
    Render,
    Publish,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prompt => "prompt",
            Self::Log => "log",
            Self::Render => "render",
            Self::Publish => "publish",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single stage call.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("{stage} stage timed out after {timeout_secs}s")]
    Timeout { stage: Stage, timeout_secs: u64 },

    #[error("run cancelled")]
    Cancelled { stage: Stage },
}

impl StageError {
    /// The stage this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Generation(_) => Stage::Prompt,
            Self::Render(_) => Stage::Render,
            Self::Publish(_) => Stage::Publish,
            Self::Logging(_) => Stage::Log,
            Self::Timeout { stage, .. } | Self::Cancelled { stage } => *stage,
        }
    }

    /// Whether the stage may be attempted again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Generation(e) => e.is_retryable(),
            Self::Render(e) => e.is_retryable(),
            Self::Publish(e) => e.is_retryable(),
            Self::Logging(_) => false,
            Self::Timeout { .. } => true,
            Self::Cancelled { .. } => false,
        }
    }

    /// Label used for failure metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Cancelled { .. } => "cancelled",
            _ => "error",
        }
    }
}

/// Final status of one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    Partial,
    Failed,
}

impl OutcomeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Partial => "partial",
            Self::Failed => "failed",
        }
    }
}

/// What happened to a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Published.
    Success {
        prompt: PromptArtifact,
        media_url: String,
        published_url: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        warnings: Vec<String>,
    },
    /// Rendering did not produce media; nothing was published.
    Partial {
        prompt: PromptArtifact,
        render_job_id: String,
        render_state: RenderState,
        error: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        warnings: Vec<String>,
    },
    /// A stage failed. Fields reached before the failure are kept.
    Failed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prompt: Option<PromptArtifact>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        media_url: Option<String>,
        failed_stage: Stage,
        error: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        warnings: Vec<String>,
    },
}

impl Outcome {
    pub fn status(&self) -> OutcomeStatus {
        match self {
            Self::Success { .. } => OutcomeStatus::Success,
            Self::Partial { .. } => OutcomeStatus::Partial,
            Self::Failed { .. } => OutcomeStatus::Failed,
        }
    }
}

/// Result of processing one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub candidate: Candidate,
    #[serde(flatten)]
    pub outcome: Outcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl OutcomeRecord {
    pub fn status(&self) -> OutcomeStatus {
        self.outcome.status()
    }

    /// Error message, if the candidate did not succeed.
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success { .. } => None,
            Outcome::Partial { error, .. } | Outcome::Failed { error, .. } => Some(error),
        }
    }

    /// Published location, only present on success.
    pub fn published_url(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Success { published_url, .. } => Some(published_url),
            Outcome::Partial { .. } | Outcome::Failed { .. } => None,
        }
    }

    pub fn warnings(&self) -> &[String] {
        match &self.outcome {
            Outcome::Success { warnings, .. }
            | Outcome::Partial { warnings, .. }
            | Outcome::Failed { warnings, .. } => warnings,
        }
    }
}

/// Counts per status for a batch of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub success: usize,
    pub partial: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn from_records(records: &[OutcomeRecord]) -> Self {
        records.iter().fold(
            Self {
                total: records.len(),
                ..Self::default()
            },
            |mut summary, record| {
                match record.status() {
                    OutcomeStatus::Success => summary.success += 1,
                    OutcomeStatus::Partial => summary.partial += 1,
                    OutcomeStatus::Failed => summary.failed += 1,
                }
                summary
            },
        )
    }
}

/// Snapshot of the agent's run state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStatus {
    pub running: bool,
}
