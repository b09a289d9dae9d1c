//! Configuration file loading.

use crate::config::types::AppConfig;
use crate::config::validation::validate_config;
use crate::errors::ConfigError;
use std::path::Path;

/// Load and validate configuration from a YAML file.
///
/// This function:
/// 1. Reads the file from disk
/// 2. Parses the YAML content
/// 3. Validates all configuration values
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The YAML is invalid
/// - Any configuration value fails validation
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;

    load_config_from_str(&content, &path_str)
}

/// Load and validate configuration from a YAML string.
///
/// Useful for testing or when config is provided via other means.
pub fn load_config_from_str(content: &str, source_name: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
        path: source_name.to_string(),
        source: e,
    })?;

    validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CONFIG: &str = r#"
shutdown:
  resource_timeout_secs: 5
  fanout_timeout_secs: 6
  force_exit_timeout_secs: 7

observability:
  log_level: "debug"
  log_format: "pretty"
"#;

    #[test]
    fn test_load_valid_config() {
        let config = load_config_from_str(VALID_CONFIG, "config.yaml").unwrap();
        assert_eq!(config.shutdown.resource_timeout_secs, 5);
        assert_eq!(config.shutdown.force_exit_timeout_secs, 7);
        assert_eq!(config.observability.log_level, "debug");
    }

    #[test]
    fn test_defaults_applied() {
        let config = load_config_from_str("shutdown: {}\n", "config.yaml").unwrap();
        assert_eq!(config.shutdown.resource_timeout_secs, 5);
        assert_eq!(config.shutdown.fanout_timeout_secs, 6);
        assert_eq!(config.shutdown.force_exit_timeout_secs, 7);
        assert_eq!(config.observability.log_format, "json");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let content = r#"
shutdown:
  resource_timeout_secs: 5
  grace_period: 10
"#;
        let result = load_config_from_str(content, "config.yaml");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_invalid_yaml_syntax() {
        let bad_yaml = "shutdown:\n  resource_timeout_secs: [invalid";
        let result = load_config_from_str(bad_yaml, "config.yaml");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_validation_runs_after_parse() {
        let content = r#"
shutdown:
  resource_timeout_secs: 9
  fanout_timeout_secs: 6
  force_exit_timeout_secs: 7
"#;
        let result = load_config_from_str(content, "config.yaml");
        assert!(matches!(result, Err(ConfigError::ValidationFailed(_))));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(VALID_CONFIG.as_bytes()).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.shutdown.fanout_timeout_secs, 6);
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/nonexistent/teardown.yaml");
        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}
