//! LLM-backed prompt generator.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::llm::{CompletionRequest, LlmClient};
use super::types::{GenerationError, PromptArtifact, PromptGenerator, PromptRequest};
use crate::metrics;

const SYSTEM_PROMPT: &str = "You are an expert video content creator and prompt engineer.
Generate detailed video prompts for AI video generation tools like Veo3 or Sora.
The prompts should be cinematic, detailed, and include camera movements, lighting, and atmosphere.";

/// Duration label used when the model omits one.
const DEFAULT_DURATION: &str = "30s";

/// Shape of the JSON document the model is asked to return.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelPrompt {
    #[serde(default)]
    video_prompt: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    duration: Option<String>,
}

/// Prompt generator that asks a language model for a JSON answer.
pub struct LlmPromptGenerator {
    client: Box<dyn LlmClient>,
    temperature: f32,
    max_tokens: u32,
}

impl LlmPromptGenerator {
    pub fn new(client: Box<dyn LlmClient>) -> Self {
        Self {
            client,
            temperature: 0.8,
            max_tokens: 1024,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn build_user_prompt(request: &PromptRequest) -> String {
        let audience = request
            .target_audience
            .as_deref()
            .map(|a| format!("Target audience: {}\n", a))
            .unwrap_or_default();

        format!(
            "Based on this trending video concept:
Title: {}
Category: {}
Description: {}
{}
Create a unique video idea inspired by this trend, and generate:
1. A detailed video generation prompt (for AI tools like Veo3/Sora)
2. An engaging title
3. A compelling description
4. 5-10 relevant tags

Format your response as JSON with keys: videoPrompt, title, description, tags (array), duration",
            request.title, request.category, request.description, audience
        )
    }
}

/// Parse and validate the model's JSON answer.
pub(crate) fn parse_model_output(text: &str) -> Result<PromptArtifact, GenerationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    let raw: ModelPrompt =
        serde_json::from_str(text).map_err(|e| GenerationError::Malformed(e.to_string()))?;

    let video_prompt = non_blank(raw.video_prompt).ok_or(GenerationError::MissingField("videoPrompt"))?;
    let title = non_blank(raw.title).ok_or(GenerationError::MissingField("title"))?;

    let tags: Vec<String> = raw
        .tags
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if tags.is_empty() {
        return Err(GenerationError::MissingField("tags"));
    }

    Ok(PromptArtifact {
        video_prompt,
        title,
        description: raw.description.unwrap_or_default(),
        tags,
        duration: non_blank(raw.duration).unwrap_or_else(|| DEFAULT_DURATION.to_string()),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl PromptGenerator for LlmPromptGenerator {
    fn name(&self) -> &str {
        self.client.provider()
    }

    async fn generate(&self, request: &PromptRequest) -> Result<PromptArtifact, GenerationError> {
        let completion = CompletionRequest::new(Self::build_user_prompt(request))
            .with_system(SYSTEM_PROMPT)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
            .with_json_output();

        let response = self.client.complete(completion).await?;

        metrics::LLM_TOKENS
            .with_label_values(&[self.client.provider(), "input"])
            .inc_by(response.usage.input_tokens as u64);
        metrics::LLM_TOKENS
            .with_label_values(&[self.client.provider(), "output"])
            .inc_by(response.usage.output_tokens as u64);

        debug!(
            "Prompt generated by {} ({} output tokens)",
            response.model, response.usage.output_tokens
        );

        parse_model_output(&response.text).inspect_err(|e| {
            warn!("Unusable prompt output for '{}': {}", request.title, e);
        })
    }
}
