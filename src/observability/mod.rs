//! Observability infrastructure.
//!
//! The logging sink is the only observability surface the shutdown
//! orchestrator consumes; every state transition and cleanup outcome is
//! reported through it.

pub mod logging;

pub use logging::{
    init_logging, init_logging_from_config, parse_level, LogFormat, LogLevelSwitch, Logger,
};
