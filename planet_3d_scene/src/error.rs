//! Error types for the Planet3D scene crate
//!
//! This module defines the error type used throughout the crate, covering
//! configuration, scene hierarchy, resource loading and frame submission.

use std::fmt;

/// Result type for Planet3D operations
pub type Result<T> = std::result::Result<T, Error>;

/// Planet3D errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed scene configuration (radius ordering, non-finite values, ...)
    InvalidConfig(String),

    /// Viewport with a zero or non-finite dimension
    InvalidViewport(String),

    /// Unknown key, bad resource data or mismatched property kind
    InvalidResource(String),

    /// Operation that would break the single-owner node tree
    InvalidHierarchy(String),

    /// Texture could not be read or decoded
    ResourceLoad(String),

    /// Configuration file read/parse/serialize failure
    Config(String),

    /// Drawing backend error (lost context, ...)
    BackendError(String),

    /// A tick was requested after the animation driver stopped
    FrameLoopStopped,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::InvalidViewport(msg) => write!(f, "Invalid viewport: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InvalidHierarchy(msg) => write!(f, "Invalid hierarchy: {}", msg),
            Error::ResourceLoad(msg) => write!(f, "Resource load failed: {}", msg),
            Error::Config(msg) => write!(f, "Config error: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::FrameLoopStopped => write!(f, "Frame loop stopped"),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an error value and log it at ERROR level with file:line.
///
/// The variant defaults to `BackendError`; prefix with `Variant;` to pick another.
///
/// # Example
///
/// ```no_run
/// use planet_3d_scene::engine_err;
///
/// let err = engine_err!(InvalidConfig; "planet3d::Config", "radius {} too small", 0.0);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($variant:ident ; $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::planet3d::Error::$variant(message)
    }};
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::planet3d::Error::BackendError(message)
    }};
}

/// Log an error and return it from the enclosing function.
///
/// Same variant selection as `engine_err!`.
#[macro_export]
macro_rules! engine_bail {
    ($variant:ident ; $source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($variant ; $source, $($arg)*))
    };
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
