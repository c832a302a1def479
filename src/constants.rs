//! Built-in defaults for logging configuration
//!
//! These are the lowest-priority values in the precedence chain:
//! explicit arguments and environment variables both override them.

/// Default minimum severity.
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Default line format. See [`crate::format::LineFormat`] for the token set.
pub const DEFAULT_LOG_FORMAT: &str = "{timestamp} - {service} - {levelname} - {message}";

/// Default log directory, relative to the process working directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Default log file name.
pub const DEFAULT_LOG_FILENAME: &str = "service.log";

/// Default rotation threshold: 10 MB.
pub const DEFAULT_LOG_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of rotated generations to keep.
pub const DEFAULT_LOG_BACKUP_COUNT: usize = 5;

/// Console output is on unless disabled.
pub const DEFAULT_LOG_TO_CONSOLE: bool = true;

/// File output is on unless disabled.
pub const DEFAULT_LOG_TO_FILE: bool = true;
