//! Shutdown orchestration: one trigger, one fan-out, one guaranteed exit.

use crate::config::ShutdownConfig;
use crate::shutdown::bounded::shutdown_bounded;
use crate::shutdown::registry::{CallbackRegistry, CleanupFuture};
use crate::shutdown::resource::{BoxError, Resource};
use crate::shutdown::state::{ShutdownPhase, ShutdownState};
use crate::shutdown::ShutdownReason;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// The three nested time budgets governing a shutdown run.
///
/// Invariant (enforced by config validation): `force_exit > fanout >
/// resource`, so the layers never race each other out of order.
#[derive(Debug, Clone, Copy)]
pub struct ShutdownTimeouts {
    /// Budget for a single resource's shutdown operation.
    pub resource: Duration,
    /// Budget for the whole callback fan-out.
    pub fanout: Duration,
    /// Absolute force-exit watchdog; fires regardless of what the fan-out
    /// is doing.
    pub force_exit: Duration,
}

impl ShutdownTimeouts {
    pub fn from_config(config: &ShutdownConfig) -> Self {
        Self {
            resource: Duration::from_secs(config.resource_timeout_secs),
            fanout: Duration::from_secs(config.fanout_timeout_secs),
            force_exit: Duration::from_secs(config.force_exit_timeout_secs),
        }
    }
}

impl Default for ShutdownTimeouts {
    fn default() -> Self {
        Self::from_config(&ShutdownConfig::default())
    }
}

type ExitFn = Arc<dyn Fn(i32) + Send + Sync>;

/// Coordinates an orderly, bounded-time process exit.
///
/// Constructed once at process start. The first [`trigger`](ShutdownHandle::trigger)
/// wins; it runs every registered cleanup callback concurrently under the
/// fan-out budget, backstopped by the force-exit watchdog, and then
/// terminates the process with the reason-derived exit code. No error from
/// any cleanup path ever propagates out: the orchestrator is the last line
/// of defense and always exits the process itself.
pub struct ShutdownOrchestrator {
    inner: Arc<Inner>,
}

struct Inner {
    state: ShutdownState,
    registry: CallbackRegistry,
    timeouts: ShutdownTimeouts,
    exit: ExitFn,
    runtime: tokio::runtime::Handle,
}

impl ShutdownOrchestrator {
    /// Create an orchestrator that exits via [`std::process::exit`].
    ///
    /// Must be called from within a tokio runtime; the runtime handle is
    /// captured so triggers work from any thread (signal tasks, panic hooks).
    pub fn new(timeouts: ShutdownTimeouts) -> Self {
        Self::with_exit_hook(timeouts, Arc::new(|code| std::process::exit(code)))
    }

    /// Create an orchestrator with a custom exit hook.
    ///
    /// Lets embedders and tests observe the exit decision instead of having
    /// the process terminated.
    pub fn with_exit_hook(timeouts: ShutdownTimeouts, exit: ExitFn) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: ShutdownState::new(),
                registry: CallbackRegistry::new(),
                timeouts,
                exit,
                runtime: tokio::runtime::Handle::current(),
            }),
        }
    }

    /// Cloneable handle for components that register callbacks or trigger
    /// shutdown.
    pub fn handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            inner: self.inner.clone(),
        }
    }
}

/// Cloneable, thread-safe handle to the orchestrator.
///
/// Thread this through components instead of an ambient global.
#[derive(Clone)]
pub struct ShutdownHandle {
    inner: Arc<Inner>,
}

impl ShutdownHandle {
    /// Start the shutdown sequence.
    ///
    /// Idempotent: the first call per process lifetime wins; every later
    /// call is a no-op observed only as a debug trace.
    pub fn trigger(&self, reason: ShutdownReason) {
        if !self.inner.state.begin() {
            log::debug!("shutdown already in progress, ignoring trigger ({})", reason);
            return;
        }

        log::info!("shutdown started: {}", reason);
        let inner = self.inner.clone();
        self.inner.runtime.spawn(async move { inner.run(reason).await });
    }

    /// Register a cleanup callback to run during the shutdown fan-out.
    ///
    /// Callbacks registered after shutdown has begun are dropped; the
    /// current fan-out has already snapshotted its work.
    pub fn register_callback<F, Fut>(&self, name: impl Into<String>, callback: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        let name = name.into();
        if self.inner.state.is_shutting_down() {
            log::debug!(
                "shutdown already in progress, dropping late cleanup callback '{}'",
                name
            );
            return;
        }
        self.inner.registry.register(name, callback);
    }

    /// Register a resource whose shutdown runs through the bounded wrapper.
    ///
    /// The resource gets the per-resource budget; timeouts and failures are
    /// logged and treated as "continue anyway".
    pub fn register_resource(&self, resource: Arc<dyn Resource>) {
        let name = resource.name().to_string();
        let timeout = self.inner.timeouts.resource;
        self.register_callback(name, move || {
            let fut: CleanupFuture = Box::pin(async move {
                shutdown_bounded(resource, timeout).await;
                Ok(())
            });
            fut
        });
    }

    /// Report an unhandled failure from a background task and start shutdown.
    pub fn notify_async_fault(&self, error: &dyn std::fmt::Display) {
        log::error!("unhandled async fault: {}", error);
        self.trigger(ShutdownReason::AsyncFault);
    }

    /// Whether shutdown has been triggered.
    pub fn is_shutting_down(&self) -> bool {
        self.inner.state.is_shutting_down()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> ShutdownPhase {
        self.inner.state.phase()
    }
}

impl Inner {
    async fn run(self: Arc<Self>, reason: ShutdownReason) {
        let exit_code = reason.exit_code();

        // Unconditional backstop: fires even if the fan-out's own timeout
        // logic is wedged.
        let watchdog = {
            let exit = self.exit.clone();
            let force_exit = self.timeouts.force_exit;
            tokio::spawn(async move {
                tokio::time::sleep(force_exit).await;
                log::warn!(
                    "force-exit watchdog fired after {:?}, terminating immediately",
                    force_exit
                );
                exit(exit_code);
            })
        };

        // Spawned so an unexpected panic in the fan-out machinery is caught
        // here instead of unwinding past the orchestrator.
        let fanout = {
            let inner = self.clone();
            tokio::spawn(async move { inner.registry.run_all(inner.timeouts.fanout).await })
        };

        match fanout.await {
            Ok(outcome) => {
                watchdog.abort();
                self.state.mark_terminated();
                log::info!(
                    "shutdown complete ({} completed, {} failed, {} abandoned), exiting with code {}",
                    outcome.completed,
                    outcome.failed,
                    outcome.abandoned,
                    exit_code
                );
                (self.exit)(exit_code);
            }
            Err(join_err) => {
                watchdog.abort();
                self.state.mark_terminated();
                log::error!("fatal: shutdown sequence failed unexpectedly: {}", join_err);
                (self.exit)(1);
            }
        }
    }
}
