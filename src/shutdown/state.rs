//! Process-wide shutdown state.

use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle phase of the shutdown orchestrator.
///
/// Transitions are one-way: `Idle -> ShuttingDown -> Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownPhase {
    /// No shutdown has been triggered.
    Idle,
    /// The first trigger has been accepted and the sequence is running.
    ShuttingDown,
    /// The sequence finished and the process is about to exit.
    Terminated,
}

const IDLE: u8 = 0;
const SHUTTING_DOWN: u8 = 1;
const TERMINATED: u8 = 2;

/// One-shot shutdown flag.
///
/// The only shared mutable state in the subsystem. All triggers funnel
/// through [`begin`](Self::begin), which wins exactly once per process
/// lifetime.
#[derive(Debug)]
pub struct ShutdownState {
    phase: AtomicU8,
}

impl ShutdownState {
    pub fn new() -> Self {
        Self {
            phase: AtomicU8::new(IDLE),
        }
    }

    /// Attempt the `Idle -> ShuttingDown` transition.
    ///
    /// Returns `true` for exactly one caller; every later call returns
    /// `false` and must be treated as a no-op.
    pub fn begin(&self) -> bool {
        self.phase
            .compare_exchange(IDLE, SHUTTING_DOWN, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Record that the sequence finished and the process is exiting.
    pub fn mark_terminated(&self) {
        self.phase.store(TERMINATED, Ordering::SeqCst);
    }

    pub fn phase(&self) -> ShutdownPhase {
        match self.phase.load(Ordering::SeqCst) {
            IDLE => ShutdownPhase::Idle,
            SHUTTING_DOWN => ShutdownPhase::ShuttingDown,
            _ => ShutdownPhase::Terminated,
        }
    }

    pub fn is_shutting_down(&self) -> bool {
        self.phase() != ShutdownPhase::Idle
    }
}

impl Default for ShutdownState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_begin_wins_once() {
        let state = ShutdownState::new();
        assert_eq!(state.phase(), ShutdownPhase::Idle);

        assert!(state.begin());
        assert_eq!(state.phase(), ShutdownPhase::ShuttingDown);

        assert!(!state.begin());
        assert!(!state.begin());
        assert_eq!(state.phase(), ShutdownPhase::ShuttingDown);
    }

    #[test]
    fn test_terminated_is_terminal() {
        let state = ShutdownState::new();
        assert!(state.begin());
        state.mark_terminated();
        assert_eq!(state.phase(), ShutdownPhase::Terminated);
        assert!(!state.begin());
    }

    #[test]
    fn test_concurrent_begin_single_winner() {
        let state = Arc::new(ShutdownState::new());
        let mut handles = Vec::new();

        for _ in 0..16 {
            let state = state.clone();
            handles.push(std::thread::spawn(move || state.begin()));
        }

        let winners: usize = handles
            .into_iter()
            .map(|h| usize::from(h.join().unwrap()))
            .sum();
        assert_eq!(winners, 1);
        assert!(state.is_shutting_down());
    }
}
