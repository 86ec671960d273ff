//! Render stage configuration.

use serde::{Deserialize, Serialize};

use super::simulated::SimulatedRenderer;
use super::traits::Renderer;

/// Which renderer backs the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderProvider {
    /// Fake renderer that waits and returns synthetic URLs.
    #[default]
    Simulated,
}

/// Render configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub provider: RenderProvider,
    /// Base URL for generated media locations.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Artificial delay of the simulated renderer, in milliseconds.
    #[serde(default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,
}

fn default_base_url() -> String {
    "https://example.com".to_string()
}

fn default_simulated_delay_ms() -> u64 {
    2000
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            provider: RenderProvider::default(),
            base_url: default_base_url(),
            simulated_delay_ms: default_simulated_delay_ms(),
        }
    }
}

/// Build the renderer described by the configuration.
pub fn create_renderer(config: &RenderConfig) -> Box<dyn Renderer> {
    match config.provider {
        RenderProvider::Simulated => Box::new(
            SimulatedRenderer::new(config.base_url.clone())
                .with_delay(std::time::Duration::from_millis(config.simulated_delay_ms)),
        ),
    }
}
