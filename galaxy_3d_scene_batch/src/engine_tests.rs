//! Unit tests for engine.rs (global logger)
//!
//! Every test swaps the global logger, so they run serially. Other tests may
//! log concurrently, so assertions only look at this module's sources.

use std::sync::Arc;
use serial_test::serial;
use crate::engine::Engine;
use crate::log::{LogEntry, LogSeverity, RecordingLogger};

fn entries_from(recorder: &RecordingLogger, source: &str) -> Vec<LogEntry> {
    recorder.entries().into_iter().filter(|e| e.source == source).collect()
}

// ============================================================================
// LOGGER INSTALLATION
// ============================================================================

#[test]
#[serial]
fn test_set_logger_receives_macro_output() {
    let recorder = Arc::new(RecordingLogger::new());
    Engine::set_logger(Arc::clone(&recorder));

    crate::engine_info!("galaxy3d::EngineTest", "hello {}", 42);
    crate::engine_warn!("galaxy3d::EngineTest", "careful");

    let entries = entries_from(&recorder, "galaxy3d::EngineTest");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].severity, LogSeverity::Info);
    assert_eq!(entries[0].message, "hello 42");
    assert_eq!(entries[1].severity, LogSeverity::Warn);
    assert!(entries[0].file.is_none());

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_engine_error_carries_location() {
    let recorder = Arc::new(RecordingLogger::new());
    Engine::set_logger(Arc::clone(&recorder));

    crate::engine_error!("galaxy3d::EngineTestError", "broken");

    let entries = entries_from(&recorder, "galaxy3d::EngineTestError");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, LogSeverity::Error);
    assert!(entries[0].file.is_some());
    assert!(entries[0].line.is_some());

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_reset_logger_detaches_custom_logger() {
    let recorder = Arc::new(RecordingLogger::new());
    Engine::set_logger(Arc::clone(&recorder));
    Engine::reset_logger();

    crate::engine_info!("galaxy3d::EngineTestReset", "not recorded");

    assert!(entries_from(&recorder, "galaxy3d::EngineTestReset").is_empty());
}

#[test]
#[serial]
fn test_error_macro_logs_before_returning() {
    let recorder = Arc::new(RecordingLogger::new());
    Engine::set_logger(Arc::clone(&recorder));

    let err = crate::engine_err!(InvalidCallSequence, "galaxy3d::EngineTestMacro", "stage {}", "lights");

    assert_eq!(err, crate::error::Error::InvalidCallSequence("stage lights".to_string()));
    let entries = entries_from(&recorder, "galaxy3d::EngineTestMacro");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, LogSeverity::Error);

    Engine::reset_logger();
}
