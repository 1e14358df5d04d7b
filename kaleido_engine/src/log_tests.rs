//! Unit tests for log.rs
//!
//! Tests Logger trait, LogEntry, LogSeverity, and DefaultLogger.

use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};
use std::time::SystemTime;

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_equality() {
    assert_eq!(LogSeverity::Info, LogSeverity::Info);
    assert_ne!(LogSeverity::Trace, LogSeverity::Debug);
    assert_ne!(LogSeverity::Info, LogSeverity::Error);
}

#[test]
fn test_log_severity_copy() {
    let sev1 = LogSeverity::Warn;
    let sev2 = sev1; // Copy, not move
    assert_eq!(sev1, sev2);
    assert_eq!(sev1, LogSeverity::Warn);
}

#[test]
fn test_log_severity_debug() {
    assert_eq!(format!("{:?}", LogSeverity::Trace), "Trace");
    assert_eq!(format!("{:?}", LogSeverity::Debug), "Debug");
    assert_eq!(format!("{:?}", LogSeverity::Info), "Info");
    assert_eq!(format!("{:?}", LogSeverity::Warn), "Warn");
    assert_eq!(format!("{:?}", LogSeverity::Error), "Error");
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_without_location() {
    let entry = LogEntry {
        severity: LogSeverity::Info,
        timestamp: SystemTime::now(),
        source: "kaleido::Engine".to_string(),
        message: "Graphics context singleton created".to_string(),
        file: None,
        line: None,
    };

    assert_eq!(entry.severity, LogSeverity::Info);
    assert_eq!(entry.source, "kaleido::Engine");
    assert!(entry.file.is_none());
    assert!(entry.line.is_none());
}

#[test]
fn test_log_entry_with_location() {
    let entry = LogEntry {
        severity: LogSeverity::Error,
        timestamp: SystemTime::now(),
        source: "kaleido::opengl".to_string(),
        message: "CreateProgram returned no object".to_string(),
        file: Some("opengl_context.rs"),
        line: Some(42),
    };

    assert_eq!(entry.severity, LogSeverity::Error);
    assert_eq!(entry.file, Some("opengl_context.rs"));
    assert_eq!(entry.line, Some(42));
}

#[test]
fn test_log_entry_clone() {
    let entry1 = LogEntry {
        severity: LogSeverity::Warn,
        timestamp: SystemTime::now(),
        source: "kaleido::demo".to_string(),
        message: "VSync unavailable".to_string(),
        file: Some("window.rs"),
        line: Some(10),
    };

    let entry2 = entry1.clone();

    assert_eq!(entry1.severity, entry2.severity);
    assert_eq!(entry1.source, entry2.source);
    assert_eq!(entry1.message, entry2.message);
    assert_eq!(entry1.file, entry2.file);
    assert_eq!(entry1.line, entry2.line);
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_all_severities() {
    let logger = DefaultLogger;
    let timestamp = SystemTime::now();

    // Just verify no severity panics while formatting.
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        let entry = LogEntry {
            severity,
            timestamp,
            source: "test".to_string(),
            message: format!("{:?} message", severity),
            file: None,
            line: None,
        };
        logger.log(&entry);
    }
}

#[test]
fn test_default_logger_with_location() {
    let logger = DefaultLogger;
    let entry = LogEntry {
        severity: LogSeverity::Error,
        timestamp: SystemTime::now(),
        source: "kaleido::opengl".to_string(),
        message: "Driver rejected the shader".to_string(),
        file: Some("opengl_context.rs"),
        line: Some(123),
    };

    // Exercises the file:line branch.
    logger.log(&entry);
}

// ============================================================================
// LOGGER TRAIT TESTS
// ============================================================================

struct CountingLogger {
    logged_count: std::sync::Mutex<usize>,
}

impl CountingLogger {
    fn new() -> Self {
        Self {
            logged_count: std::sync::Mutex::new(0),
        }
    }

    fn count(&self) -> usize {
        *self.logged_count.lock().unwrap()
    }
}

impl Logger for CountingLogger {
    fn log(&self, _entry: &LogEntry) {
        *self.logged_count.lock().unwrap() += 1;
    }
}

#[test]
fn test_custom_logger_implementation() {
    let logger = CountingLogger::new();
    assert_eq!(logger.count(), 0);

    let entry = LogEntry {
        severity: LogSeverity::Info,
        timestamp: SystemTime::now(),
        source: "test".to_string(),
        message: "test".to_string(),
        file: None,
        line: None,
    };

    logger.log(&entry);
    assert_eq!(logger.count(), 1);

    logger.log(&entry);
    assert_eq!(logger.count(), 2);
}

#[test]
fn test_logger_trait_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DefaultLogger>();
}
