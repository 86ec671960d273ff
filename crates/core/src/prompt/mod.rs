//! Prompt generation for the render stage.
//!
//! A [`PromptGenerator`] turns one trending item into a render directive plus
//! the title, description and tags used when publishing. Two generators ship:
//!
//! - [`TemplatePromptGenerator`]: fixed templates, works offline
//! - [`LlmPromptGenerator`]: asks an [`LlmClient`] (OpenAI or Ollama) for JSON
//!
//! # Example
//!
//! ```ignore
//! use reelsmith_core::prompt::{create_prompt_generator, PromptConfig, PromptRequest};
//!
//! let generator = create_prompt_generator(&PromptConfig::default())?;
//! let prompt = generator
//!     .generate(&PromptRequest::new("Title", "Science", "Description"))
//!     .await?;
//! println!("{}", prompt.video_prompt);
//! ```

mod config;
mod generator;
mod llm;
mod template;
mod types;

pub use config::{create_prompt_generator, PromptConfig, PromptProvider};
pub use generator::LlmPromptGenerator;
pub use llm::{
    CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage, OllamaClient,
    OpenAiClient,
};
pub use template::TemplatePromptGenerator;
pub use types::{generate_many, GenerationError, PromptArtifact, PromptGenerator, PromptRequest};
