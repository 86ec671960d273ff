//! Offline prompt generator built from fixed templates.

use async_trait::async_trait;

use super::types::{GenerationError, PromptArtifact, PromptGenerator, PromptRequest};

/// Duration label attached to templated prompts.
const TEMPLATE_DURATION: &str = "30s";

/// Deterministic generator that needs no model access.
///
/// Useful for demos and for running the pipeline without API credentials.
#[derive(Debug, Clone, Default)]
pub struct TemplatePromptGenerator;

impl TemplatePromptGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PromptGenerator for TemplatePromptGenerator {
    fn name(&self) -> &str {
        "template"
    }

    async fn generate(&self, request: &PromptRequest) -> Result<PromptArtifact, GenerationError> {
        let category = request.category.trim();

        Ok(PromptArtifact {
            video_prompt: format!(
                "Create a cinematic {} video about {}. Use dramatic lighting, smooth camera movements, and engaging visuals.",
                category.to_lowercase(),
                request.title
            ),
            title: format!("{}: {}", category, request.title),
            description: format!(
                "An AI-generated video inspired by trending content in {}.",
                category
            ),
            tags: vec![
                category.to_string(),
                "AI".to_string(),
                "trending".to_string(),
                "automation".to_string(),
            ],
            duration: TEMPLATE_DURATION.to_string(),
        })
    }
}
