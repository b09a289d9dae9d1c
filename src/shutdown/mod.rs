//! Graceful process shutdown.
//!
//! This module provides:
//! - A state machine guaranteeing exactly one shutdown sequence per process
//! - Concurrent fan-out of registered cleanup callbacks under a global budget
//! - A bounded wrapper for individual slow resources
//! - A force-exit watchdog as the unconditional backstop
//! - Signal and fault routing into the orchestrator

mod bounded;
mod orchestrator;
mod reason;
mod registry;
mod resource;
mod signals;
mod state;

pub use bounded::{shutdown_bounded, CleanupOutcome};
pub use orchestrator::{ShutdownHandle, ShutdownOrchestrator, ShutdownTimeouts};
pub use reason::ShutdownReason;
pub use registry::{CallbackRegistry, CleanupFuture, FanoutOutcome};
pub use resource::{shutdown_sync, BoxError, Resource};
pub use signals::SignalListener;
pub use state::{ShutdownPhase, ShutdownState};
