//! Process-wide logging setup for services
//!
//! One call to [`setup_logging`] at process start wires the `tracing`
//! root up with console and/or size-rotated file output, stamps a
//! service name onto every record, and resolves each option as
//! explicit argument > environment variable > built-in default. The
//! call is idempotent per process; everything emitted afterwards via
//! `tracing::info!` and friends flows through the configured sinks.
//!
//! ```no_run
//! use svclog::{setup_logging, LogOptions};
//!
//! setup_logging(
//!     "market-data-gateway",
//!     LogOptions {
//!         level: Some("DEBUG".to_string()),
//!         ..Default::default()
//!     },
//! );
//!
//! tracing::info!("feed connected");
//! ```

pub mod config;
pub mod constants;
pub mod format;
pub mod record;
pub mod rotate;
pub mod setup;
pub mod sink;
pub mod tagger;

pub use config::{resolve, LogOptions, ResolvedConfig};
pub use format::LineFormat;
pub use record::{LogLevel, LogRecord};
pub use rotate::RotatingFileWriter;
pub use setup::{is_configured, setup_logging};
pub use sink::{Sink, SinkError, SinkLayer, SinkRegistry};
pub use tagger::RecordTagger;
