//! Publish stage configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::simulated::SimulatedPublisher;
use super::traits::Publisher;
use super::types::DEFAULT_CATEGORY_ID;

/// Which publisher backs the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishProvider {
    #[default]
    Simulated,
}

/// Publish configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    #[serde(default)]
    pub provider: PublishProvider,
    /// Platform category id attached to uploads that do not carry one.
    #[serde(default = "default_category_id")]
    pub category_id: String,
    /// Artificial delay of the simulated publisher, in milliseconds.
    #[serde(default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,
}

fn default_category_id() -> String {
    DEFAULT_CATEGORY_ID.to_string()
}

fn default_simulated_delay_ms() -> u64 {
    2000
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            provider: PublishProvider::default(),
            category_id: default_category_id(),
            simulated_delay_ms: default_simulated_delay_ms(),
        }
    }
}

/// Build the publisher described by the configuration.
pub fn create_publisher(config: &PublishConfig) -> Box<dyn Publisher> {
    match config.provider {
        PublishProvider::Simulated => Box::new(
            SimulatedPublisher::new()
                .with_delay(Duration::from_millis(config.simulated_delay_ms))
                .with_default_category(config.category_id.clone()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: PublishConfig = toml::from_str("").unwrap();
        assert_eq!(config.provider, PublishProvider::Simulated);
        assert_eq!(config.category_id, "22");
        assert_eq!(config.simulated_delay_ms, 2000);
    }

    #[test]
    fn test_create_simulated() {
        assert_eq!(create_publisher(&PublishConfig::default()).name(), "simulated");
    }
}
