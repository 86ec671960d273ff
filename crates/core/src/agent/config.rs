//! Orchestrator configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::publish::Visibility;

/// What to do when appending to the run log fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFailurePolicy {
    /// The candidate fails at the log stage.
    #[default]
    Fail,
    /// The error becomes a warning and the chain continues.
    Warn,
}

/// Retry behavior for stages that fail with a retryable error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per stage, including the first. 1 disables retries.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

fn default_max_attempts() -> u32 {
    1
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

impl RetryConfig {
    /// Delay before the given retry (1 = first retry), capped at `max_delay_ms`.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1) as i32;
        let delay = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(exponent);
        Duration::from_millis(delay.min(self.max_delay_ms as f64) as u64)
    }
}

/// Orchestrator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Candidates processed when a run does not specify a limit.
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Largest limit accepted from callers.
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    /// Requested clip length in seconds.
    #[serde(default = "default_render_duration_secs")]
    pub render_duration_secs: u32,
    /// Requested aspect ratio, "W:H".
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    /// Visibility of published videos.
    #[serde(default)]
    pub visibility: Visibility,
    /// Upper bound for a single stage call. 0 disables the timeout.
    #[serde(default = "default_stage_timeout_secs")]
    pub stage_timeout_secs: u64,
    #[serde(default)]
    pub log_failure_policy: LogFailurePolicy,
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_limit() -> usize {
    3
}

fn default_max_limit() -> usize {
    10
}

fn default_render_duration_secs() -> u32 {
    30
}

fn default_aspect_ratio() -> String {
    "16:9".to_string()
}

fn default_stage_timeout_secs() -> u64 {
    300
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            render_duration_secs: default_render_duration_secs(),
            aspect_ratio: default_aspect_ratio(),
            visibility: Visibility::default(),
            stage_timeout_secs: default_stage_timeout_secs(),
            log_failure_policy: LogFailurePolicy::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl AgentConfig {
    pub fn stage_timeout(&self) -> Option<Duration> {
        (self.stage_timeout_secs > 0).then(|| Duration::from_secs(self.stage_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_toml() {
        let config: AgentConfig = toml::from_str("").unwrap();
        assert_eq!(config.default_limit, 3);
        assert_eq!(config.max_limit, 10);
        assert_eq!(config.render_duration_secs, 30);
        assert_eq!(config.aspect_ratio, "16:9");
        assert_eq!(config.visibility, Visibility::Public);
        assert_eq!(config.stage_timeout_secs, 300);
        assert_eq!(config.log_failure_policy, LogFailurePolicy::Fail);
        assert_eq!(config.retry.max_attempts, 1);
    }

    #[test]
    fn test_deserialize_overrides() {
        let toml = r#"
            default_limit = 5
            visibility = "unlisted"
            log_failure_policy = "warn"
            stage_timeout_secs = 0

            [retry]
            max_attempts = 3
            initial_delay_ms = 100
        "#;
        let config: AgentConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.default_limit, 5);
        assert_eq!(config.visibility, Visibility::Unlisted);
        assert_eq!(config.log_failure_policy, LogFailurePolicy::Warn);
        assert_eq!(config.stage_timeout(), None);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.initial_delay_ms, 100);
        assert_eq!(config.retry.max_delay_ms, 10_000);
    }

    #[test]
    fn test_backoff_delays() {
        let retry = RetryConfig {
            max_attempts: 5,
            initial_delay_ms: 100,
            max_delay_ms: 350,
            backoff_multiplier: 2.0,
        };
        assert_eq!(retry.delay_for(1), Duration::from_millis(100));
        assert_eq!(retry.delay_for(2), Duration::from_millis(200));
        assert_eq!(retry.delay_for(3), Duration::from_millis(350));
    }

    #[test]
    fn test_stage_timeout() {
        assert_eq!(
            AgentConfig::default().stage_timeout(),
            Some(Duration::from_secs(300))
        );
    }
}
