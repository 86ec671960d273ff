//! Types for prompt generation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::llm::LlmError;

/// Errors that can occur while generating a prompt.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The language model call failed.
    #[error("LLM request failed: {0}")]
    Llm(#[from] LlmError),

    /// The model answered with nothing.
    #[error("No content generated")]
    EmptyResponse,

    /// The model output was not the expected JSON document.
    #[error("Malformed model output: {0}")]
    Malformed(String),

    /// A required field was missing or blank in the model output.
    #[error("Model output missing required field: {0}")]
    MissingField(&'static str),
}

impl GenerationError {
    /// Whether a repeated request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Llm(e) => e.is_retryable(),
            Self::EmptyResponse | Self::Malformed(_) | Self::MissingField(_) => false,
        }
    }
}

/// Input for a prompt generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRequest {
    /// Title of the trending video the idea is based on.
    pub title: String,
    /// Category of the trending video.
    pub category: String,
    /// Description of the trending video.
    pub description: String,
    /// Optional audience hint passed to the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
}

impl PromptRequest {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            description: description.into(),
            target_audience: None,
        }
    }

    pub fn with_target_audience(mut self, audience: impl Into<String>) -> Self {
        self.target_audience = Some(audience.into());
        self
    }
}

/// Generated directive and publishing metadata for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptArtifact {
    /// Directive text handed to the renderer.
    pub video_prompt: String,
    /// Title used when publishing.
    pub title: String,
    /// Description used when publishing.
    pub description: String,
    /// Tags used when publishing. Never empty.
    pub tags: Vec<String>,
    /// Duration label (e.g. "30s").
    pub duration: String,
}

/// Generates render directives and publishing metadata.
#[async_trait]
pub trait PromptGenerator: Send + Sync {
    /// Name of this generator for logging.
    fn name(&self) -> &str;

    /// Generate a prompt for a single trending item.
    async fn generate(&self, request: &PromptRequest) -> Result<PromptArtifact, GenerationError>;
}

/// Generate prompts for several requests concurrently.
///
/// Fails with the first error encountered.
pub async fn generate_many(
    generator: &dyn PromptGenerator,
    requests: &[PromptRequest],
) -> Result<Vec<PromptArtifact>, GenerationError> {
    futures::future::try_join_all(requests.iter().map(|request| generator.generate(request))).await
}
