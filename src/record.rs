//! Log levels and records
//!
//! A [`LogRecord`] is the unit of work handed to sinks: one emitted event,
//! already flattened to a timestamp, severity, target, and message. The
//! service field starts empty and is filled in by a
//! [`crate::tagger::RecordTagger`] on the way out.

use chrono::{DateTime, Local};

/// Severity of a log record, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Get the display name for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Parse a level name, case-insensitively.
    ///
    /// `WARNING`, `CRITICAL`, and `FATAL` are accepted as aliases for
    /// `WARN` and `ERROR`. Anything unrecognized resolves to `INFO`;
    /// parsing never fails.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRACE" => LogLevel::Trace,
            "DEBUG" => LogLevel::Debug,
            "INFO" => LogLevel::Info,
            "WARN" | "WARNING" => LogLevel::Warn,
            "ERROR" | "CRITICAL" | "FATAL" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => LogLevel::Trace,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::ERROR => LogLevel::Error,
        }
    }
}

/// A single log record
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Timestamp when the record was emitted
    pub timestamp: DateTime<Local>,
    /// Severity
    pub level: LogLevel,
    /// Module path that produced the record
    pub target: String,
    /// Service name, stamped by the tagger (empty until then)
    pub service: String,
    /// Message text
    pub message: String,
}

impl LogRecord {
    /// Create a new record with the current local time and no service tag
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            target: target.into(),
            service: String::new(),
            message: message.into(),
        }
    }
}
