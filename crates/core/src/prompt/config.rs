//! Prompt generation configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::generator::LlmPromptGenerator;
use super::llm::{LlmError, OllamaClient, OpenAiClient};
use super::template::TemplatePromptGenerator;
use super::types::PromptGenerator;

/// Which prompt generator backs the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptProvider {
    /// Fixed templates, no model access.
    #[default]
    Template,
    /// OpenAI chat completions (or a compatible endpoint).
    #[serde(alias = "openai")]
    OpenAi,
    /// Local Ollama instance.
    Ollama,
}

/// Prompt generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Generator backend.
    #[serde(default)]
    pub provider: PromptProvider,
    /// Model name/identifier (LLM providers only).
    #[serde(default = "default_model")]
    pub model: String,
    /// API key (OpenAI only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Custom API base URL (for proxies or self-hosted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens for completions.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_model() -> String {
    "gpt-4-turbo-preview".to_string()
}

fn default_temperature() -> f32 {
    0.8
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout() -> u32 {
    60
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            provider: PromptProvider::default(),
            model: default_model(),
            api_key: None,
            api_base: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Build the prompt generator described by the configuration.
pub fn create_prompt_generator(
    config: &PromptConfig,
) -> Result<Box<dyn PromptGenerator>, LlmError> {
    let timeout = Duration::from_secs(config.timeout_secs as u64);

    let client: Box<dyn super::llm::LlmClient> = match config.provider {
        PromptProvider::Template => return Ok(Box::new(TemplatePromptGenerator::new())),
        PromptProvider::OpenAi => {
            let api_key = config.api_key.clone().ok_or(LlmError::NotConfigured)?;
            let mut client = OpenAiClient::new(api_key, config.model.clone(), timeout)?;
            if let Some(api_base) = &config.api_base {
                client = client.with_api_base(api_base.clone());
            }
            Box::new(client)
        }
        PromptProvider::Ollama => {
            let mut client = OllamaClient::new(config.model.clone(), timeout)?;
            if let Some(api_base) = &config.api_base {
                client = client.with_api_base(api_base.clone());
            }
            Box::new(client)
        }
    };

    Ok(Box::new(
        LlmPromptGenerator::new(client)
            .with_temperature(config.temperature)
            .with_max_tokens(config.max_tokens),
    ))
}
