use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::agent::AgentConfig;
use crate::prompt::{PromptConfig, PromptProvider};
use crate::publish::PublishConfig;
use crate::render::RenderConfig;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub publish: PublishConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("reelsmith.db")
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub agent: AgentConfig,
    pub prompt: SanitizedPromptConfig,
    pub render: RenderConfig,
    pub publish: PublishConfig,
}

/// Sanitized prompt config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedPromptConfig {
    pub provider: PromptProvider,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    pub api_key_configured: bool,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            database: config.database.clone(),
            agent: config.agent.clone(),
            prompt: SanitizedPromptConfig {
                provider: config.prompt.provider,
                model: config.prompt.model.clone(),
                api_base: config.prompt.api_base.clone(),
                api_key_configured: config
                    .prompt
                    .api_key
                    .as_deref()
                    .is_some_and(|k| !k.is_empty()),
                temperature: config.prompt.temperature,
                max_tokens: config.prompt.max_tokens,
                timeout_secs: config.prompt.timeout_secs,
            },
            render: config.render.clone(),
            publish: config.publish.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::LogFailurePolicy;

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.database.path.to_str().unwrap(), "reelsmith.db");
        assert_eq!(config.agent.default_limit, 3);
        assert_eq!(config.prompt.provider, PromptProvider::Template);
        assert_eq!(config.render.simulated_delay_ms, 2000);
        assert_eq!(config.publish.category_id, "22");
    }

    #[test]
    fn test_deserialize_sections() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000

[database]
path = "/data/runs.sqlite"

[agent]
max_limit = 20
log_failure_policy = "warn"

[agent.retry]
max_attempts = 4

[prompt]
provider = "ollama"
model = "llama3"

[render]
base_url = "https://cdn.example.org"
simulated_delay_ms = 0
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.path.to_str().unwrap(), "/data/runs.sqlite");
        assert_eq!(config.agent.max_limit, 20);
        assert_eq!(config.agent.log_failure_policy, LogFailurePolicy::Warn);
        assert_eq!(config.agent.retry.max_attempts, 4);
        assert_eq!(config.prompt.provider, PromptProvider::Ollama);
        assert_eq!(config.render.base_url, "https://cdn.example.org");
        assert_eq!(config.render.simulated_delay_ms, 0);
    }

    #[test]
    fn test_sanitized_config_hides_api_key() {
        let mut config = Config::default();
        config.prompt.provider = PromptProvider::OpenAi;
        config.prompt.api_key = Some("sk-secret".to_string());

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.prompt.api_key_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("sk-secret"));
        assert!(json.contains("\"api_key_configured\":true"));
    }

    #[test]
    fn test_sanitized_config_without_key() {
        let sanitized = SanitizedConfig::from(&Config::default());
        assert!(!sanitized.prompt.api_key_configured);
        assert_eq!(sanitized.server.port, 8080);
    }
}
