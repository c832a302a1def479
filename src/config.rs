//! Logging options and precedence resolution
//!
//! Every field resolves independently: an explicit argument wins over
//! its environment variable, which wins over the built-in default.
//! Resolution never fails; malformed input falls back to the default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_LOG_BACKUP_COUNT, DEFAULT_LOG_DIR, DEFAULT_LOG_FILENAME, DEFAULT_LOG_FORMAT,
    DEFAULT_LOG_LEVEL, DEFAULT_LOG_MAX_BYTES, DEFAULT_LOG_TO_CONSOLE, DEFAULT_LOG_TO_FILE,
};
use crate::record::LogLevel;

/// Caller-supplied logging options. Every field is optional; `None`
/// defers to the environment variable, then the default.
///
/// Derives serde so services can keep a `[logging]` block in their
/// config file and pass it through.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogOptions {
    /// Minimum severity name, e.g. "DEBUG" (env: `LOG_LEVEL`)
    pub level: Option<String>,
    /// Write records to stdout (env: `LOG_TO_CONSOLE`)
    pub log_to_console: Option<bool>,
    /// Write records to a rotating file (env: `LOG_TO_FILE`)
    pub log_to_file: Option<bool>,
    /// Log directory; relative paths resolve against the process working
    /// directory (env: `LOG_DIR`)
    pub log_dir: Option<PathBuf>,
    /// Log file name (env: `LOG_FILENAME`)
    pub log_filename: Option<String>,
    /// Line format string (env: `LOG_FORMAT`)
    pub log_format: Option<String>,
    /// Rotation threshold in bytes (env: `LOG_MAX_BYTES`)
    pub max_bytes: Option<u64>,
    /// Rotated generations to keep (env: `LOG_BACKUP_COUNT`)
    pub backup_count: Option<usize>,
}

impl LogOptions {
    /// Load options from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read logging options from {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse logging options")
    }
}

/// A fully resolved configuration. Immutable once resolved; recomputed
/// on each setup call (only the first call takes effect).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub log_to_file: bool,
    pub log_dir: PathBuf,
    pub log_filename: String,
    pub log_format: String,
    pub max_bytes: u64,
    pub backup_count: usize,
}

/// Resolve options against the process environment
pub fn resolve(options: &LogOptions) -> ResolvedConfig {
    resolve_from(options, |key| std::env::var(key).ok())
}

/// Resolve options against an arbitrary lookup. Taking the lookup as a
/// closure keeps precedence testable without mutating the process
/// environment.
pub(crate) fn resolve_from(
    options: &LogOptions,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let level_name = options
        .level
        .clone()
        .or_else(|| env("LOG_LEVEL"))
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    let log_format = options
        .log_format
        .clone()
        .or_else(|| env("LOG_FORMAT"))
        .unwrap_or_else(|| DEFAULT_LOG_FORMAT.to_string());

    let log_to_console = options.log_to_console.unwrap_or_else(|| {
        env("LOG_TO_CONSOLE")
            .map(|v| parse_bool(&v))
            .unwrap_or(DEFAULT_LOG_TO_CONSOLE)
    });

    let log_to_file = options.log_to_file.unwrap_or_else(|| {
        env("LOG_TO_FILE")
            .map(|v| parse_bool(&v))
            .unwrap_or(DEFAULT_LOG_TO_FILE)
    });

    let log_dir = options
        .log_dir
        .clone()
        .or_else(|| env("LOG_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

    let log_filename = options
        .log_filename
        .clone()
        .or_else(|| env("LOG_FILENAME"))
        .unwrap_or_else(|| DEFAULT_LOG_FILENAME.to_string());

    let max_bytes = options
        .max_bytes
        .or_else(|| env("LOG_MAX_BYTES").and_then(|v| v.trim().parse().ok()))
        .unwrap_or(DEFAULT_LOG_MAX_BYTES);

    let backup_count = options
        .backup_count
        .or_else(|| env("LOG_BACKUP_COUNT").and_then(|v| v.trim().parse().ok()))
        .unwrap_or(DEFAULT_LOG_BACKUP_COUNT);

    ResolvedConfig {
        level: LogLevel::parse(&level_name),
        log_to_console,
        log_to_file,
        log_dir,
        log_filename,
        log_format,
        max_bytes,
        backup_count,
    }
}

/// Only a case-insensitive `"true"` enables a boolean field
fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}
