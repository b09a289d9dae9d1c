//! Shutdown reasons and the process exit-code contract.

use std::fmt;

/// Why the shutdown sequence was started.
///
/// Carried through logging and used to select the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// SIGINT (Ctrl+C).
    Interrupt,
    /// SIGTERM.
    Terminate,
    /// Uncaught synchronous fault (panic).
    Fault,
    /// Unhandled failure surfaced from a background task.
    AsyncFault,
    /// Explicit programmatic request.
    Requested,
}

impl ShutdownReason {
    /// Process exit code for a shutdown driven by this reason.
    ///
    /// Signal-derived exits use the 128+N convention (130 for SIGINT,
    /// 143 for SIGTERM). Fault-derived exits report failure with 1; an
    /// explicit request exits 0.
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Interrupt => 130,
            Self::Terminate => 143,
            Self::Fault | Self::AsyncFault => 1,
            Self::Requested => 0,
        }
    }

    /// Stable tag used in log output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Interrupt => "signal-interrupt",
            Self::Terminate => "signal-terminate",
            Self::Fault => "uncaught-fault",
            Self::AsyncFault => "unhandled-async-fault",
            Self::Requested => "explicit-request",
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ShutdownReason::Interrupt.exit_code(), 130);
        assert_eq!(ShutdownReason::Terminate.exit_code(), 143);
        assert_eq!(ShutdownReason::Fault.exit_code(), 1);
        assert_eq!(ShutdownReason::AsyncFault.exit_code(), 1);
        assert_eq!(ShutdownReason::Requested.exit_code(), 0);
    }

    #[test]
    fn test_display_tags() {
        assert_eq!(ShutdownReason::Interrupt.to_string(), "signal-interrupt");
        assert_eq!(ShutdownReason::Requested.to_string(), "explicit-request");
    }
}
