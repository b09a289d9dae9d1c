//! YAML-based configuration with fail-fast validation.

mod loader;
mod types;
mod validation;

pub use loader::{load_config, load_config_from_str};
pub use types::{AppConfig, ObservabilityConfig, ShutdownConfig};
pub use validation::validate_config;
