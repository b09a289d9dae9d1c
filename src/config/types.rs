//! Configuration types for the shutdown subsystem.

use serde::Deserialize;

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Shutdown timing configuration.
    #[serde(default)]
    pub shutdown: ShutdownConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Shutdown timing configuration.
///
/// Three nested budgets, strictly ordered:
/// `force_exit_timeout_secs > fanout_timeout_secs > resource_timeout_secs`.
/// The ordering is enforced by validation so the layers never race each
/// other out of order.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShutdownConfig {
    /// Per-resource shutdown timeout in seconds. Default: 5.
    #[serde(default = "ShutdownConfig::default_resource_timeout_secs")]
    pub resource_timeout_secs: u64,

    /// Global timeout for the callback fan-out in seconds. Default: 6.
    #[serde(default = "ShutdownConfig::default_fanout_timeout_secs")]
    pub fanout_timeout_secs: u64,

    /// Force-exit watchdog timeout in seconds. Default: 7.
    ///
    /// The watchdog terminates the process unconditionally once this
    /// elapses, regardless of what the fan-out is doing.
    #[serde(default = "ShutdownConfig::default_force_exit_timeout_secs")]
    pub force_exit_timeout_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            resource_timeout_secs: Self::default_resource_timeout_secs(),
            fanout_timeout_secs: Self::default_fanout_timeout_secs(),
            force_exit_timeout_secs: Self::default_force_exit_timeout_secs(),
        }
    }
}

impl ShutdownConfig {
    const fn default_resource_timeout_secs() -> u64 {
        5
    }

    const fn default_fanout_timeout_secs() -> u64 {
        6
    }

    const fn default_force_exit_timeout_secs() -> u64 {
        7
    }
}

/// Observability configuration for logging.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObservabilityConfig {
    /// Log level: trace, debug, info, warn, error. Default: info.
    #[serde(default = "ObservabilityConfig::default_log_level")]
    pub log_level: String,

    /// Log format: json or pretty. Default: json.
    #[serde(default = "ObservabilityConfig::default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
            log_format: Self::default_log_format(),
        }
    }
}

impl ObservabilityConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }

    fn default_log_format() -> String {
        "json".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shutdown_config() {
        let config = ShutdownConfig::default();
        assert_eq!(config.resource_timeout_secs, 5);
        assert_eq!(config.fanout_timeout_secs, 6);
        assert_eq!(config.force_exit_timeout_secs, 7);
    }

    #[test]
    fn test_default_ordering_holds() {
        let config = ShutdownConfig::default();
        assert!(config.force_exit_timeout_secs > config.fanout_timeout_secs);
        assert!(config.fanout_timeout_secs > config.resource_timeout_secs);
    }

    #[test]
    fn test_default_observability_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, "json");
    }
}
