/// Galaxy3D Engine - global logging entry point
///
/// The batch collector receives its collaborators (work queue, pass registry,
/// pipeline state factory) explicitly. The only process-wide state is the
/// logger, stored here with thread-safe static storage so the `engine_*!`
/// macros can reach it from worker threads.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

fn logger_lock() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger::new())))
}

/// Engine logging facade
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_scene_batch::galaxy3d::{Engine, log::{Logger, LogEntry}};
///
/// struct FileLogger;
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
///
/// Engine::set_logger(FileLogger);
/// ```
pub struct Engine;

impl Engine {
    /// Replace the current logger with a custom implementation
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        let mut lock = match logger_lock().write() {
            Ok(lock) => lock,
            Err(poisoned) => poisoned.into_inner(),
        };
        *lock = Box::new(logger);
    }

    /// Reset logger to default (DefaultLogger, Info and above)
    pub fn reset_logger() {
        Self::set_logger(DefaultLogger::new());
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like engine_debug!, engine_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        Self::dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: None,
            line: None,
        });
    }

    /// Internal logging method with file:line information (for ERROR logs)
    ///
    /// Used by engine_error! and the error macros.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        Self::dispatch(LogEntry {
            severity,
            timestamp: SystemTime::now(),
            source: source.to_string(),
            message,
            file: Some(file),
            line: Some(line),
        });
    }

    fn dispatch(entry: LogEntry) {
        if let Ok(lock) = logger_lock().read() {
            lock.log(&entry);
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
