//! Error types for the Galaxy3D scene batch collector
//!
//! This module defines the error types used throughout batch collection,
//! including pass configuration, pipeline state creation, worker failures
//! and per-frame integrity checks.

use std::fmt;

/// Result type for Galaxy3D operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D batch collection errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A configured scene pass does not match the sub-pass validity table
    InvalidPassConfiguration(String),

    /// The pipeline state factory could not build a state for a batch
    PipelineStateCreationFailed(String),

    /// A work item panicked inside the worker pool; the frame is lost
    WorkerFailed(String),

    /// Per-frame tables were addressed out of range
    IntegrityCheckFailed(String),

    /// A collection stage was invoked out of order
    InvalidCallSequence(String),

    /// Invalid resource or scene object
    InvalidResource(String),

    /// Initialization failed (work queue, collector)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPassConfiguration(msg) => write!(f, "Invalid pass configuration: {}", msg),
            Error::PipelineStateCreationFailed(msg) => write!(f, "Pipeline state creation failed: {}", msg),
            Error::WorkerFailed(msg) => write!(f, "Worker failed: {}", msg),
            Error::IntegrityCheckFailed(msg) => write!(f, "Integrity check failed: {}", msg),
            Error::InvalidCallSequence(msg) => write!(f, "Invalid call sequence: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR message and build an [`Error`] of the given variant.
///
/// The variant defaults to `InvalidResource` when omitted.
///
/// # Example
///
/// ```ignore
/// return Err(engine_err!("galaxy3d::Scene", "Drawable {} not found", index));
/// return Err(engine_err!(InvalidCallSequence, "galaxy3d::SceneBatchCollector", "Frame not initialized"));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($variant:ident, $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy3d::Error::$variant(message)
    }};
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::galaxy3d::Error::InvalidResource(message)
    }};
}

/// Log an ERROR message and return early with the matching [`Error`].
///
/// Same arguments as [`engine_err!`].
#[macro_export]
macro_rules! engine_bail {
    ($($arg:tt)*) => {
        return Err($crate::engine_err!($($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
