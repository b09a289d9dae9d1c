//! Bounded execution of a single cleanup operation.

use crate::errors::ShutdownError;
use crate::shutdown::resource::Resource;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of a bounded cleanup attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// The operation settled successfully before the timeout.
    Completed,
    /// The operation settled with an error before the timeout.
    Failed,
    /// The timeout elapsed first; the operation was abandoned.
    TimedOut,
}

/// Shut down one resource, bounded by `timeout`.
///
/// Returns within at most `timeout` wall-clock time and never panics,
/// regardless of what the resource does. On timeout the still-running
/// operation is detached; its eventual settlement is logged at debug level
/// and otherwise discarded. Cancellation is best-effort and non-preemptive,
/// so the abandoned operation's side effects may still complete later.
pub async fn shutdown_bounded(resource: Arc<dyn Resource>, timeout: Duration) -> CleanupOutcome {
    let name = resource.name().to_string();
    log::debug!("shutting down resource '{}' (budget {:?})", name, timeout);

    let mut task = tokio::spawn(async move { resource.shutdown().await });

    match tokio::time::timeout(timeout, &mut task).await {
        Ok(Ok(Ok(()))) => {
            log::debug!("resource '{}' shut down", name);
            CleanupOutcome::Completed
        }
        Ok(Ok(Err(e))) => {
            log::error!(
                "{}",
                ShutdownError::ResourceFailed {
                    name: name.clone(),
                    reason: e.to_string(),
                }
            );
            CleanupOutcome::Failed
        }
        Ok(Err(join_err)) => {
            // The shutdown future itself panicked.
            log::error!(
                "{}",
                ShutdownError::ResourceFailed {
                    name: name.clone(),
                    reason: join_err.to_string(),
                }
            );
            CleanupOutcome::Failed
        }
        Err(_) => {
            log::warn!(
                "{}",
                ShutdownError::ResourceTimeout {
                    name: name.clone(),
                    secs: timeout.as_secs(),
                }
            );
            // Detach the in-flight operation; report its settlement without
            // ever awaiting it from the critical path.
            tokio::spawn(async move {
                match task.await {
                    Ok(Ok(())) => {
                        log::debug!("abandoned resource '{}' eventually shut down", name)
                    }
                    Ok(Err(e)) => {
                        log::debug!("abandoned resource '{}' eventually failed: {}", name, e)
                    }
                    Err(e) => log::debug!("abandoned resource '{}' task ended: {}", name, e),
                }
            });
            CleanupOutcome::TimedOut
        }
    }
}
