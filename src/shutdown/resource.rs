//! Interfaces for collaborators that need cleanup at shutdown.

use async_trait::async_trait;

/// Boxed error for cleanup operations whose failure modes are opaque here.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A collaborator with a single "begin shutdown, eventually settle" operation.
///
/// Implementations may take unbounded time or fail; callers bound them with
/// [`shutdown_bounded`](crate::shutdown::shutdown_bounded). The operation is
/// assumed idempotent: an abandoned shutdown may still complete its side
/// effects after the orchestrator has moved on.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Resource name for logging purposes.
    fn name(&self) -> &str;

    /// Begin shutting down and settle with the outcome.
    async fn shutdown(&self) -> Result<(), BoxError>;
}

/// Run a synchronous shutdown operation, logging and swallowing any failure.
///
/// For collaborators whose shutdown is synchronous and fast (a terminal
/// renderer restoring the screen, for example). No timeout is applied; an
/// operation that can block should implement [`Resource`] and go through
/// the bounded wrapper instead. Panics inside the operation are caught.
pub fn shutdown_sync<F, E>(name: &str, op: F)
where
    F: FnOnce() -> Result<(), E>,
    E: std::fmt::Display,
{
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(op)) {
        Ok(Ok(())) => log::debug!("'{}' shut down", name),
        Ok(Err(e)) => log::error!("'{}' failed to shut down: {}", name, e),
        Err(_) => log::error!("'{}' panicked during shutdown", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_shutdown_sync_runs_operation() {
        let called = Arc::new(AtomicBool::new(false));
        let called_clone = called.clone();

        shutdown_sync("renderer", move || {
            called_clone.store(true, Ordering::SeqCst);
            Ok::<(), std::io::Error>(())
        });

        assert!(called.load(Ordering::SeqCst));
    }

    #[test]
    fn test_shutdown_sync_swallows_error() {
        shutdown_sync("renderer", || {
            Err::<(), _>(std::io::Error::other("terminal gone"))
        });
        // Reaching this line is the assertion.
    }

    #[test]
    fn test_shutdown_sync_swallows_panic() {
        shutdown_sync("renderer", || -> Result<(), std::io::Error> {
            panic!("renderer exploded")
        });
    }
}
