//! Graceful shutdown orchestration for long-running interactive processes.
//!
//! This crate coordinates an orderly, bounded-time exit when a process
//! receives a termination signal, hits an uncaught fault, or is asked to
//! stop explicitly:
//!
//! - **Config**: YAML-based configuration with fail-fast validation
//! - **Shutdown**: idempotent trigger, concurrent cleanup fan-out, bounded
//!   per-resource wrapper, and a force-exit watchdog
//! - **Observability**: structured logging consumed for every state
//!   transition and cleanup outcome
//!
//! The process always exits within the force-exit budget of the triggering
//! event, no matter what the registered cleanup routines do.
//!
//! # Example
//!
//! ```no_run
//! use teardown::{
//!     config::load_config,
//!     observability::init_logging_from_config,
//!     shutdown::{ShutdownOrchestrator, ShutdownTimeouts, SignalListener},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load and validate configuration
//!     let config = load_config("teardown.yaml")?;
//!     let (_logger, _level_switch) = init_logging_from_config(
//!         &config.observability.log_level,
//!         &config.observability.log_format,
//!     );
//!
//!     // Set up shutdown handling
//!     let orchestrator =
//!         ShutdownOrchestrator::new(ShutdownTimeouts::from_config(&config.shutdown));
//!     let handle = orchestrator.handle();
//!
//!     handle.register_callback("flush-session-store", || async {
//!         // persist whatever must outlive the process
//!         Ok(())
//!     });
//!
//!     let listener = SignalListener::new(handle.clone());
//!     listener.start();
//!     listener.install_panic_hook();
//!
//!     // ... run the application; the orchestrator exits the process ...
//!     std::future::pending::<()>().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod observability;
pub mod shutdown;

pub use config::{load_config, AppConfig, ObservabilityConfig, ShutdownConfig};
pub use errors::{ConfigError, ShutdownError};
pub use observability::{
    init_logging, init_logging_from_config, parse_level, LogFormat, LogLevelSwitch, Logger,
};
pub use shutdown::{
    shutdown_bounded, shutdown_sync, BoxError, CallbackRegistry, CleanupOutcome, FanoutOutcome,
    Resource, ShutdownHandle, ShutdownOrchestrator, ShutdownPhase, ShutdownReason, ShutdownState,
    ShutdownTimeouts, SignalListener,
};
