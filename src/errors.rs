//! Error types for the teardown crate.

use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error when loading config.
    #[error("failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    /// YAML parsing error.
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    /// Validation failed with one or more errors.
    #[error("config validation failed:\n{}", .0.join("\n"))]
    ValidationFailed(Vec<String>),
}

/// Shutdown-related errors.
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// A resource did not finish shutting down within its timeout.
    #[error("resource '{name}' shutdown timed out after {secs} seconds")]
    ResourceTimeout { name: String, secs: u64 },

    /// A resource settled with an error before its timeout.
    #[error("resource '{name}' failed to shut down: {reason}")]
    ResourceFailed { name: String, reason: String },
}
