//! Structured logging with runtime-adjustable log levels.
//!
//! Uses `slog` for structured JSON output. The `slog-stdlog` bridge captures
//! the `log::*!` macro calls made throughout the shutdown modules.

use slog::{o, Drain, Level};
use slog_async::OverflowStrategy;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

pub use slog::Logger;

/// Handle for runtime log level adjustment.
#[derive(Clone)]
pub struct LogLevelSwitch {
    level: Arc<AtomicU8>,
}

impl LogLevelSwitch {
    /// Set the minimum log level at runtime.
    pub fn set_level(&self, level: Level) {
        self.level.store(level_to_u8(level), Ordering::SeqCst);
    }

    /// Get the current log level.
    pub fn level(&self) -> Level {
        u8_to_level(self.level.load(Ordering::SeqCst))
    }
}

/// Log format for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON format for machine parsing (production).
    #[default]
    Json,
    /// Human-readable format (development).
    Pretty,
}

impl std::str::FromStr for LogFormat {
    type Err = std::convert::Infallible;

    /// Parse from string, case-insensitive. Defaults to Json for unknown values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "pretty" | "text" | "human" => Self::Pretty,
            _ => Self::Json,
        })
    }
}

/// Parse log level from string.
pub fn parse_level(s: &str) -> Level {
    match s.to_lowercase().as_str() {
        "trace" => Level::Trace,
        "debug" => Level::Debug,
        "info" => Level::Info,
        "warn" | "warning" => Level::Warning,
        "error" => Level::Error,
        "critical" | "crit" => Level::Critical,
        _ => Level::Info,
    }
}

fn level_to_u8(level: Level) -> u8 {
    match level {
        Level::Critical => 0,
        Level::Error => 1,
        Level::Warning => 2,
        Level::Info => 3,
        Level::Debug => 4,
        Level::Trace => 5,
    }
}

fn u8_to_level(val: u8) -> Level {
    match val {
        0 => Level::Critical,
        1 => Level::Error,
        2 => Level::Warning,
        3 => Level::Info,
        4 => Level::Debug,
        _ => Level::Trace,
    }
}

/// A drain that consults a shared atomic level on every record.
///
/// Cheaper than rebuilding the drain chain when the level changes at runtime.
struct RuntimeLevelDrain<D> {
    drain: D,
    level: Arc<AtomicU8>,
}

impl<D: Drain<Ok = (), Err = slog::Never>> Drain for RuntimeLevelDrain<D> {
    type Ok = ();
    type Err = slog::Never;

    fn log(
        &self,
        record: &slog::Record,
        values: &slog::OwnedKVList,
    ) -> Result<Self::Ok, Self::Err> {
        if record.level().is_at_least(u8_to_level(self.level.load(Ordering::SeqCst))) {
            self.drain.log(record, values)
        } else {
            Ok(())
        }
    }
}

/// Initialize the logging system from configuration strings.
///
/// Convenience wrapper that parses level and format from strings.
pub fn init_logging_from_config(level: &str, format: &str) -> (Logger, LogLevelSwitch) {
    let level = parse_level(level);
    let format: LogFormat = format.parse().unwrap_or_default();
    init_logging(level, format)
}

/// Initialize the logging system.
///
/// Returns a root logger and a handle to adjust log levels at runtime.
/// Also bridges the standard `log` crate so `log::*!` calls in the shutdown
/// modules end up in the structured output.
pub fn init_logging(level: Level, format: LogFormat) -> (Logger, LogLevelSwitch) {
    let base_drain: Box<dyn Drain<Ok = (), Err = slog::Never> + Send> = match format {
        LogFormat::Json => {
            let drain = slog_json::Json::new(std::io::stdout())
                .add_default_keys()
                .build()
                .fuse();
            Box::new(drain)
        }
        LogFormat::Pretty => {
            let decorator = slog_term::TermDecorator::new().build();
            let drain = slog_term::FullFormat::new(decorator).build().fuse();
            Box::new(drain)
        }
    };

    // Wrap in mutex for thread-safety (required for Box<dyn>)
    let mutex_drain = MutexDrain(std::sync::Mutex::new(base_drain));

    let level_cell = Arc::new(AtomicU8::new(level_to_u8(level)));
    let leveled = RuntimeLevelDrain {
        drain: mutex_drain,
        level: level_cell.clone(),
    };

    // Make it async with bounded channel
    let async_drain = slog_async::Async::new(leveled.fuse())
        .chan_size(4096)
        .overflow_strategy(OverflowStrategy::DropAndReport)
        .build()
        .fuse();

    let logger = Logger::root(async_drain, o!("service" => "teardown"));

    // Bridge standard `log` crate to slog
    if let Err(e) = slog_stdlog::init_with_level(to_log_level(level)) {
        eprintln!("Warning: Failed to set up log bridge: {}", e);
    }

    let switch = LogLevelSwitch { level: level_cell };

    (logger, switch)
}

/// Wrapper to make Mutex<Box<dyn Drain>> implement Drain.
struct MutexDrain(std::sync::Mutex<Box<dyn Drain<Ok = (), Err = slog::Never> + Send>>);

impl Drain for MutexDrain {
    type Ok = ();
    type Err = slog::Never;

    fn log(
        &self,
        record: &slog::Record,
        values: &slog::OwnedKVList,
    ) -> Result<Self::Ok, Self::Err> {
        if let Ok(guard) = self.0.lock() {
            let _ = guard.log(record, values);
        }
        Ok(())
    }
}

/// Convert slog Level to log::Level for the bridge.
fn to_log_level(level: Level) -> log::Level {
    match level {
        Level::Critical | Level::Error => log::Level::Error,
        Level::Warning => log::Level::Warn,
        Level::Info => log::Level::Info,
        Level::Debug => log::Level::Debug,
        Level::Trace => log::Level::Trace,
    }
}
