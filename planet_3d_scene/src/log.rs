//! Logging for the Planet3D scene crate
//!
//! - Pluggable sink through the `Logger` trait
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored console output by default
//! - File and line information on ERROR entries
//!
//! The active logger and the minimum severity live in `Engine`.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Sink for log entries.
///
/// # Example
///
/// ```no_run
/// use planet_3d_scene::planet3d::log::{Logger, LogEntry};
///
/// struct FrameLogFile {
///     path: std::path::PathBuf,
/// }
///
/// impl Logger for FrameLogFile {
///     fn log(&self, entry: &LogEntry) {
///         // Append to self.path...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Handle one entry
    fn log(&self, entry: &LogEntry);
}

/// A single log record
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// When the entry was created
    pub timestamp: SystemTime,

    /// Emitting component (e.g. "planet3d::SceneBuilder", "planet3d::Driver")
    pub source: String,

    /// Message text
    pub message: String,

    /// Source file (ERROR entries only)
    pub file: Option<&'static str>,

    /// Source line (ERROR entries only)
    pub line: Option<u32>,
}

/// Log severity levels, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-frame detail, normally filtered out
    Trace,

    /// Development information
    Debug,

    /// Lifecycle events (scene built, texture bound, timeline finished)
    Info,

    /// Degraded but non-fatal conditions (missing texture, ignored resize)
    Warn,

    /// Failures (rejected configuration, lost drawing context)
    Error,
}

impl LogSeverity {
    /// Fixed-width label used by the console logger
    pub fn label(&self) -> &'static str {
        match self {
            LogSeverity::Trace => "TRACE",
            LogSeverity::Debug => "DEBUG",
            LogSeverity::Info => "INFO ",
            LogSeverity::Warn => "WARN ",
            LogSeverity::Error => "ERROR",
        }
    }
}

/// Console logger with colored severities.
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl DefaultLogger {
    /// Render an entry as a plain line (no color codes)
    pub fn format_plain(entry: &LogEntry) -> String {
        let timestamp = Self::format_timestamp(entry.timestamp);
        match (entry.file, entry.line) {
            (Some(file), Some(line)) => format!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, entry.severity.label(), entry.source, entry.message, file, line
            ),
            _ => format!(
                "[{}] [{}] [{}] {}",
                timestamp, entry.severity.label(), entry.source, entry.message
            ),
        }
    }

    /// Local time as YYYY-MM-DD HH:MM:SS.mmm
    fn format_timestamp(timestamp: SystemTime) -> String {
        let datetime: DateTime<Local> = timestamp.into();
        datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        let timestamp = Self::format_timestamp(entry.timestamp);

        let severity_str = match entry.severity {
            LogSeverity::Trace => entry.severity.label().bright_black(),
            LogSeverity::Debug => entry.severity.label().cyan(),
            LogSeverity::Info => entry.severity.label().green(),
            LogSeverity::Warn => entry.severity.label().yellow(),
            LogSeverity::Error => entry.severity.label().red().bold(),
        };

        let source = entry.source.bright_blue();

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            eprintln!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, severity_str, source, entry.message, file, line
            );
        } else {
            println!("[{}] [{}] [{}] {}", timestamp, severity_str, source, entry.message);
        }
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message
///
/// ```no_run
/// # use planet_3d_scene::engine_trace;
/// engine_trace!("planet3d::Driver", "tick {}", 42);
/// ```
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::planet3d::Engine::log(
            $crate::planet3d::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::planet3d::Engine::log(
            $crate::planet3d::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::planet3d::Engine::log(
            $crate::planet3d::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message
///
/// ```no_run
/// # use planet_3d_scene::engine_warn;
/// engine_warn!("planet3d::Textures", "Texture '{}' not found", "clouds.png");
/// ```
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::planet3d::Engine::log(
            $crate::planet3d::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::planet3d::Engine::log_detailed(
            $crate::planet3d::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
