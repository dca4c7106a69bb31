/// Planet3D Engine - process-wide logging services
///
/// The logger is the only global state of the crate. Scene, camera and
/// renderer state belong to a `RenderContext` value owned by the caller.

use std::sync::{OnceLock, RwLock};
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Entries below this severity are dropped before reaching the logger
static MIN_SEVERITY: AtomicU8 = AtomicU8::new(severity_rank(LogSeverity::Debug));

const fn severity_rank(severity: LogSeverity) -> u8 {
    match severity {
        LogSeverity::Trace => 0,
        LogSeverity::Debug => 1,
        LogSeverity::Info => 2,
        LogSeverity::Warn => 3,
        LogSeverity::Error => 4,
    }
}

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

// ===== PUBLIC API =====

/// Logging entry point used by the `engine_*!` macros.
///
/// # Example
///
/// ```no_run
/// use planet_3d_scene::planet3d::{Engine, log::{Logger, LogEntry, LogSeverity}};
///
/// struct Silent;
/// impl Logger for Silent {
///     fn log(&self, _entry: &LogEntry) {}
/// }
///
/// Engine::set_logger(Silent);
/// Engine::set_min_severity(LogSeverity::Warn);
/// ```
pub struct Engine;

impl Engine {
    /// Replace the active logger
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(logger);
        }
    }

    /// Restore the console logger and the default Debug threshold
    pub fn reset_logger() {
        if let Ok(mut lock) = logger_lock().write() {
            *lock = Box::new(DefaultLogger);
        }
        Self::set_min_severity(LogSeverity::Debug);
    }

    /// Drop entries less severe than `severity`
    pub fn set_min_severity(severity: LogSeverity) {
        MIN_SEVERITY.store(severity_rank(severity), Ordering::Relaxed);
    }

    /// Whether an entry of this severity would reach the logger
    pub fn is_enabled(severity: LogSeverity) -> bool {
        severity_rank(severity) >= MIN_SEVERITY.load(Ordering::Relaxed)
    }

    /// Log without file:line (used by engine_trace! .. engine_warn!)
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(severity, source, message, None, None);
    }

    /// Log with file:line (used by engine_error!)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(severity, source, message, Some(file), Some(line));
    }

    fn dispatch(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: Option<&'static str>,
        line: Option<u32>,
    ) {
        if !Self::is_enabled(severity) {
            return;
        }
        if let Ok(lock) = logger_lock().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file,
                line,
            });
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
