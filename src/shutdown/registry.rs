//! Process-wide registry of cleanup callbacks.

use crate::shutdown::resource::BoxError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

/// Boxed future returned by a cleanup callback.
pub type CleanupFuture = Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send>>;

type Callback = Box<dyn FnOnce() -> CleanupFuture + Send>;

/// Summary of one fan-out run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FanoutOutcome {
    /// Callbacks that settled successfully.
    pub completed: usize,
    /// Callbacks that settled with an error or panicked.
    pub failed: usize,
    /// Callbacks still running when the deadline elapsed.
    pub abandoned: usize,
}

impl FanoutOutcome {
    /// Whether the deadline elapsed before every callback settled.
    pub fn timed_out(&self) -> bool {
        self.abandoned > 0
    }
}

/// List of independently registered cleanup callbacks.
///
/// Callbacks are opaque to the orchestrator and never removed; the registry
/// only lives through one shutdown lifecycle.
pub struct CallbackRegistry {
    callbacks: Mutex<Vec<(String, Callback)>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self {
            callbacks: Mutex::new(Vec::new()),
        }
    }

    /// Append a cleanup callback.
    ///
    /// May be called any number of times, from any thread, with no ordering
    /// requirement among callbacks.
    pub fn register<F, Fut>(&self, name: impl Into<String>, callback: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        let name = name.into();
        let boxed: Callback = Box::new(move || Box::pin(callback()) as CleanupFuture);
        let mut callbacks = self
            .callbacks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        log::debug!("registered cleanup callback '{}'", name);
        callbacks.push((name, boxed));
    }

    /// Number of callbacks currently registered.
    pub fn len(&self) -> usize {
        self.callbacks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke every registered callback concurrently, bounded by `deadline`.
    ///
    /// All callbacks start at the same logical instant; the deadline applies
    /// to the run as a whole, not per callback. Each failure (error or panic)
    /// is caught and logged individually and never affects its siblings.
    /// Callbacks still running at the deadline are abandoned as detached
    /// tasks. Never panics.
    pub async fn run_all(&self, deadline: Duration) -> FanoutOutcome {
        let callbacks = {
            let mut guard = self
                .callbacks
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            std::mem::take(&mut *guard)
        };

        if callbacks.is_empty() {
            log::debug!("no cleanup callbacks registered");
            return FanoutOutcome::default();
        }

        log::info!(
            "running {} cleanup callbacks (budget {:?})",
            callbacks.len(),
            deadline
        );

        // Spawn everything first so one slow callback cannot starve the
        // budget of the others.
        let handles: Vec<_> = callbacks
            .into_iter()
            .map(|(name, callback)| (name, tokio::spawn(callback())))
            .collect();

        let deadline_at = tokio::time::Instant::now() + deadline;
        let mut outcome = FanoutOutcome::default();

        for (name, mut handle) in handles {
            match tokio::time::timeout_at(deadline_at, &mut handle).await {
                Ok(Ok(Ok(()))) => {
                    outcome.completed += 1;
                    log::debug!("cleanup callback '{}' completed", name);
                }
                Ok(Ok(Err(e))) => {
                    outcome.failed += 1;
                    log::error!("cleanup callback '{}' failed: {}", name, e);
                }
                Ok(Err(join_err)) => {
                    outcome.failed += 1;
                    log::error!("cleanup callback '{}' panicked: {}", name, join_err);
                }
                Err(_) => {
                    outcome.abandoned += 1;
                    log::warn!(
                        "cleanup callback '{}' still running at deadline, abandoning",
                        name
                    );
                    tokio::spawn(async move {
                        match handle.await {
                            Ok(Ok(())) => {
                                log::debug!("abandoned callback '{}' eventually completed", name)
                            }
                            Ok(Err(e)) => {
                                log::debug!("abandoned callback '{}' eventually failed: {}", name, e)
                            }
                            Err(e) => log::debug!("abandoned callback '{}' task ended: {}", name, e),
                        }
                    });
                }
            }
        }

        log::info!(
            "cleanup fan-out finished: {} completed, {} failed, {} abandoned",
            outcome.completed,
            outcome.failed,
            outcome.abandoned
        );
        outcome
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    #[tokio::test]
    async fn test_empty_registry() {
        let registry = CallbackRegistry::new();
        let outcome = registry.run_all(Duration::from_millis(10)).await;
        assert_eq!(outcome, FanoutOutcome::default());
    }

    #[tokio::test]
    async fn test_all_callbacks_run() {
        let registry = CallbackRegistry::new();
        let count = Arc::new(AtomicUsize::new(0));

        for i in 0..3 {
            let count = count.clone();
            registry.register(format!("callback-{}", i), move || async move {
                count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
        }
        assert_eq!(registry.len(), 3);

        let outcome = registry.run_all(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(outcome.completed, 3);
        assert!(!outcome.timed_out());
    }

    #[tokio::test]
    async fn test_failure_does_not_affect_siblings() {
        let registry = CallbackRegistry::new();
        let ok_count = Arc::new(AtomicUsize::new(0));

        registry.register("failing", || async { Err("disk on fire".into()) });
        for i in 0..2 {
            let ok_count = ok_count.clone();
            registry.register(format!("healthy-{}", i), move || async move {
                ok_count.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
        }

        let outcome = registry.run_all(Duration::from_secs(1)).await;
        assert_eq!(ok_count.load(Ordering::SeqCst), 2);
        assert_eq!(outcome.completed, 2);
        assert_eq!(outcome.failed, 1);
    }

    #[tokio::test]
    async fn test_panicking_callback_is_contained() {
        let registry = CallbackRegistry::new();
        registry.register("panicking", || async { panic!("boom") });
        registry.register("healthy", || async { Ok(()) });

        let outcome = registry.run_all(Duration::from_secs(1)).await;
        assert_eq!(outcome.completed, 1);
        assert_eq!(outcome.failed, 1);
    }

    #[tokio::test]
    async fn test_hanging_callback_abandoned_at_deadline() {
        let registry = CallbackRegistry::new();
        registry.register("hanging", || async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        });
        registry.register("fast", || async { Ok(()) });

        let start = Instant::now();
        let outcome = registry.run_all(Duration::from_millis(50)).await;
        let elapsed = start.elapsed();

        assert_eq!(outcome.completed, 1);
        assert_eq!(outcome.abandoned, 1);
        assert!(outcome.timed_out());
        // Bounded by the deadline, not by the hanging callback.
        assert!(elapsed < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_deadline_is_global_not_per_callback() {
        // Three callbacks at 10ms, 30ms, 80ms with a 60ms budget: the slow
        // one is abandoned, the others settle, and the run ends near the
        // budget rather than the sum of the delays.
        let registry = CallbackRegistry::new();
        for (name, ms) in [("a", 10u64), ("b", 30), ("c", 80)] {
            registry.register(name, move || async move {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                Ok(())
            });
        }

        let start = Instant::now();
        let outcome = registry.run_all(Duration::from_millis(60)).await;
        let elapsed = start.elapsed();

        assert_eq!(outcome.completed, 2);
        assert_eq!(outcome.abandoned, 1);
        assert!(elapsed >= Duration::from_millis(55));
        assert!(elapsed < Duration::from_millis(500));
    }
}
