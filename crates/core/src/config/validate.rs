use super::{types::Config, ConfigError};
use crate::prompt::PromptProvider;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let fail = |msg: String| Err(ConfigError::ValidationError(msg));

    if config.server.port == 0 {
        return fail("server.port cannot be 0".to_string());
    }

    let agent = &config.agent;
    if agent.default_limit == 0 {
        return fail("agent.default_limit must be at least 1".to_string());
    }
    if agent.default_limit > agent.max_limit {
        return fail(format!(
            "agent.default_limit ({}) exceeds agent.max_limit ({})",
            agent.default_limit, agent.max_limit
        ));
    }
    if agent.render_duration_secs == 0 {
        return fail("agent.render_duration_secs must be positive".to_string());
    }
    if !is_valid_aspect_ratio(&agent.aspect_ratio) {
        return fail(format!(
            "agent.aspect_ratio '{}' must look like W:H",
            agent.aspect_ratio
        ));
    }
    if agent.retry.max_attempts == 0 {
        return fail("agent.retry.max_attempts must be at least 1".to_string());
    }
    if !(agent.retry.backoff_multiplier >= 1.0) {
        return fail("agent.retry.backoff_multiplier must be >= 1.0".to_string());
    }

    let prompt = &config.prompt;
    if !(0.0..=2.0).contains(&prompt.temperature) {
        return fail(format!(
            "prompt.temperature {} is outside 0.0..=2.0",
            prompt.temperature
        ));
    }
    match prompt.provider {
        PromptProvider::Template => {}
        PromptProvider::OpenAi | PromptProvider::Ollama => {
            if prompt.model.trim().is_empty() {
                return fail("prompt.model is required for LLM providers".to_string());
            }
            if prompt.provider == PromptProvider::OpenAi
                && prompt.api_key.as_deref().map_or(true, |k| k.trim().is_empty())
            {
                return fail("prompt.api_key is required for the open_ai provider".to_string());
            }
        }
    }

    Ok(())
}

fn is_valid_aspect_ratio(ratio: &str) -> bool {
    let Some((w, h)) = ratio.split_once(':') else {
        return false;
    };
    matches!(
        (w.parse::<u32>(), h.parse::<u32>()),
        (Ok(w), Ok(h)) if w > 0 && h > 0
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(config: &Config, needle: &str) {
        match validate_config(config) {
            Err(ConfigError::ValidationError(msg)) => {
                assert!(msg.contains(needle), "'{}' does not mention '{}'", msg, needle)
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = Config::default();
        config.server.port = 0;
        assert_invalid(&config, "server.port");
    }

    #[test]
    fn test_validate_limits() {
        let mut config = Config::default();
        config.agent.default_limit = 0;
        assert_invalid(&config, "default_limit");

        let mut config = Config::default();
        config.agent.default_limit = 11;
        assert_invalid(&config, "max_limit");
    }

    #[test]
    fn test_validate_aspect_ratio() {
        for bad in ["16x9", "16:", ":9", "0:9", "a:b", "16:9:1"] {
            let mut config = Config::default();
            config.agent.aspect_ratio = bad.to_string();
            assert_invalid(&config, "aspect_ratio");
        }

        let mut config = Config::default();
        config.agent.aspect_ratio = "9:16".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_retry() {
        let mut config = Config::default();
        config.agent.retry.max_attempts = 0;
        assert_invalid(&config, "max_attempts");

        let mut config = Config::default();
        config.agent.retry.backoff_multiplier = 0.5;
        assert_invalid(&config, "backoff_multiplier");
    }

    #[test]
    fn test_validate_render_duration() {
        let mut config = Config::default();
        config.agent.render_duration_secs = 0;
        assert_invalid(&config, "render_duration_secs");
    }

    #[test]
    fn test_validate_prompt() {
        let mut config = Config::default();
        config.prompt.temperature = 2.5;
        assert_invalid(&config, "temperature");

        let mut config = Config::default();
        config.prompt.provider = PromptProvider::OpenAi;
        assert_invalid(&config, "api_key");

        config.prompt.api_key = Some("sk-test".to_string());
        assert!(validate_config(&config).is_ok());

        let mut config = Config::default();
        config.prompt.provider = PromptProvider::Ollama;
        config.prompt.model = " ".to_string();
        assert_invalid(&config, "prompt.model");
    }
}
