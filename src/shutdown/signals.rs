//! Routing of termination signals and in-process faults to the orchestrator.

use crate::shutdown::orchestrator::ShutdownHandle;
use crate::shutdown::ShutdownReason;
use std::sync::atomic::{AtomicBool, Ordering};

/// Forwards external termination events to [`ShutdownHandle::trigger`].
///
/// Performs no cleanup logic itself; idempotency of the shutdown sequence
/// is enforced by the orchestrator, this listener only makes sure handlers
/// are installed once.
pub struct SignalListener {
    handle: ShutdownHandle,
    installed: AtomicBool,
    hook_installed: AtomicBool,
}

impl SignalListener {
    pub fn new(handle: ShutdownHandle) -> Self {
        Self {
            handle,
            installed: AtomicBool::new(false),
            hook_installed: AtomicBool::new(false),
        }
    }

    /// Start listening for SIGINT and SIGTERM.
    ///
    /// Spawns one background task; calling `start` again is a no-op.
    /// Repeat signals during shutdown are forwarded to `trigger`, which
    /// logs them as already in progress and otherwise ignores them.
    pub fn start(&self) {
        if self.installed.swap(true, Ordering::SeqCst) {
            log::debug!("signal listener already installed");
            return;
        }

        let handle = self.handle.clone();
        tokio::spawn(async move {
            listen(handle).await;
        });
    }

    /// Install a panic hook that routes uncaught faults into shutdown.
    ///
    /// The previous hook still runs first so the panic message and backtrace
    /// are not lost. Calling this again is a no-op.
    pub fn install_panic_hook(&self) {
        if self.hook_installed.swap(true, Ordering::SeqCst) {
            log::debug!("panic hook already installed");
            return;
        }

        let handle = self.handle.clone();
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            previous(info);
            log::error!("uncaught fault: {}", info);
            handle.trigger(ShutdownReason::Fault);
        }));
    }
}

/// Wait for termination signals and forward each to the orchestrator.
///
/// Loops so that repeat signals reach `trigger` (and its debug trace)
/// rather than killing the process outright.
#[cfg(unix)]
async fn listen(handle: ShutdownHandle) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = match signal(SignalKind::interrupt()) {
        Ok(stream) => stream,
        Err(e) => {
            log::error!("failed to register SIGINT handler: {}", e);
            return;
        }
    };
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            log::error!("failed to register SIGTERM handler: {}", e);
            return;
        }
    };

    loop {
        let reason = tokio::select! {
            _ = sigint.recv() => ShutdownReason::Interrupt,
            _ = sigterm.recv() => ShutdownReason::Terminate,
        };
        log::info!("received termination signal ({})", reason);
        handle.trigger(reason);
    }
}

#[cfg(not(unix))]
async fn listen(handle: ShutdownHandle) {
    loop {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("failed to listen for Ctrl+C: {}", e);
            return;
        }
        log::info!("received termination signal ({})", ShutdownReason::Interrupt);
        handle.trigger(ShutdownReason::Interrupt);
    }
}
