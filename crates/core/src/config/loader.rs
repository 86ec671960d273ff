use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "REELSMITH_";

/// Load configuration from file with environment variable overrides.
///
/// Nested keys are separated by `__`, e.g. `REELSMITH_AGENT__DEFAULT_LIMIT=5`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[server]
port = 9000
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_load_config_from_str_bad_type() {
        let toml = r#"
[agent]
default_limit = "three"
"#;
        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[server]
host = "127.0.0.1"
port = 3000

[agent]
aspect_ratio = "9:16"
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert_eq!(config.agent.aspect_ratio, "9:16");
    }

    #[test]
    fn test_env_overrides_nested_keys() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
[agent]
default_limit = 2
"#,
            )?;
            jail.set_env("REELSMITH_AGENT__DEFAULT_LIMIT", "4");
            jail.set_env("REELSMITH_RENDER__BASE_URL", "https://media.test");

            let config = load_config(Path::new("config.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.agent.default_limit, 4);
            assert_eq!(config.render.base_url, "https://media.test");
            Ok(())
        });
    }

    #[test]
    fn test_example_config_is_valid() {
        let config =
            load_config_from_str(include_str!("../../../../config.example.toml")).unwrap();
        assert_eq!(config.publish.category_id, "22");
        assert_eq!(config.agent.retry.max_attempts, 1);
        crate::config::validate_config(&config).unwrap();
    }
}
