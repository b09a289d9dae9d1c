//! Configuration validation.
//!
//! Validates configuration and collects all errors before returning,
//! enabling users to fix multiple issues in a single iteration.

use crate::config::types::{AppConfig, ObservabilityConfig, ShutdownConfig};
use crate::errors::ConfigError;

/// Minimum per-resource timeout: 1 second.
const MIN_RESOURCE_TIMEOUT: u64 = 1;
/// Maximum force-exit timeout: 300 seconds (5 minutes).
const MAX_FORCE_EXIT_TIMEOUT: u64 = 300;

/// Validate the entire configuration.
///
/// Collects all validation errors and returns them together, allowing users
/// to fix multiple issues at once.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    validate_shutdown_config(&config.shutdown, &mut errors);
    validate_observability_config(&config.observability, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationFailed(errors))
    }
}

fn validate_shutdown_config(config: &ShutdownConfig, errors: &mut Vec<String>) {
    if config.resource_timeout_secs < MIN_RESOURCE_TIMEOUT {
        errors.push(format!(
            "shutdown.resource_timeout_secs must be at least {} second",
            MIN_RESOURCE_TIMEOUT
        ));
    }

    if config.force_exit_timeout_secs > MAX_FORCE_EXIT_TIMEOUT {
        errors.push(format!(
            "shutdown.force_exit_timeout_secs must be at most {} seconds",
            MAX_FORCE_EXIT_TIMEOUT
        ));
    }

    // The three budgets must be strictly nested so the inner layers always
    // get a chance to report before the outer ones fire.
    if config.fanout_timeout_secs <= config.resource_timeout_secs {
        errors.push(format!(
            "shutdown.fanout_timeout_secs ({}) must be greater than shutdown.resource_timeout_secs ({})",
            config.fanout_timeout_secs, config.resource_timeout_secs
        ));
    }

    if config.force_exit_timeout_secs <= config.fanout_timeout_secs {
        errors.push(format!(
            "shutdown.force_exit_timeout_secs ({}) must be greater than shutdown.fanout_timeout_secs ({})",
            config.force_exit_timeout_secs, config.fanout_timeout_secs
        ));
    }
}

fn validate_observability_config(config: &ObservabilityConfig, errors: &mut Vec<String>) {
    const VALID_LEVELS: &[&str] = &[
        "trace", "debug", "info", "warn", "warning", "error", "critical", "crit",
    ];
    const VALID_FORMATS: &[&str] = &["json", "pretty", "text", "human"];

    let level = config.log_level.to_lowercase();
    if !VALID_LEVELS.contains(&level.as_str()) {
        errors.push(format!(
            "observability.log_level '{}' is not one of: {}",
            config.log_level,
            VALID_LEVELS.join(", ")
        ));
    }

    let format = config.log_format.to_lowercase();
    if !VALID_FORMATS.contains(&format.as_str()) {
        errors.push(format!(
            "observability.log_format '{}' is not one of: {}",
            config.log_format,
            VALID_FORMATS.join(", ")
        ));
    }
}
