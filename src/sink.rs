//! Output sinks and the tracing layer that feeds them
//!
//! A [`Sink`] is one output destination (stdout or a rotating file) with
//! its own minimum level, line format, and service tagger. The
//! [`SinkRegistry`] is the shared logging root: it owns the active sink
//! set and the root level, and [`SinkLayer`] bridges `tracing` events
//! into it.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use chrono::Local;
use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::format::LineFormat;
use crate::record::{LogLevel, LogRecord};
use crate::rotate::RotatingFileWriter;
use crate::tagger::RecordTagger;

/// Failure while building the file sink. Non-fatal by contract: the
/// caller reports it through the root and carries on without the sink.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to open log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug)]
enum SinkTarget {
    Stdout,
    File(RotatingFileWriter),
}

/// One output destination with its own level, format, and tagger
#[derive(Debug)]
pub struct Sink {
    target: SinkTarget,
    min_level: LogLevel,
    format: LineFormat,
    tagger: RecordTagger,
}

impl Sink {
    /// A sink writing to standard output
    pub fn stdout(min_level: LogLevel, format: LineFormat, tagger: RecordTagger) -> Self {
        Self {
            target: SinkTarget::Stdout,
            min_level,
            format,
            tagger,
        }
    }

    /// A sink writing to a size-rotated file
    pub fn rotating_file(
        path: impl AsRef<Path>,
        max_bytes: u64,
        backup_count: usize,
        min_level: LogLevel,
        format: LineFormat,
        tagger: RecordTagger,
    ) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        let writer =
            RotatingFileWriter::open(&path, max_bytes, backup_count).map_err(|source| {
                SinkError::OpenFile {
                    path: path.clone(),
                    source,
                }
            })?;
        Ok(Self {
            target: SinkTarget::File(writer),
            min_level,
            format,
            tagger,
        })
    }

    /// Tag, render, and write one record. Write errors are ignored.
    fn emit(&self, record: &LogRecord) {
        let mut record = record.clone();
        self.tagger.tag(&mut record);
        let line = self.format.render(&record);
        match &self.target {
            SinkTarget::Stdout => {
                let mut out = io::stdout().lock();
                let _ = writeln!(out, "{line}");
            }
            SinkTarget::File(writer) => writer.write_line(&line),
        }
    }
}

#[derive(Debug)]
struct RegistryState {
    root_level: LogLevel,
    sinks: Vec<Sink>,
}

/// The shared logging root: the active sink set plus the root level.
///
/// At most one sink set is active at a time; [`SinkRegistry::replace`]
/// drops the previous set (closing any files) before attaching the new
/// one.
#[derive(Debug)]
pub struct SinkRegistry {
    state: RwLock<RegistryState>,
}

impl Default for SinkRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SinkRegistry {
    /// An empty registry at INFO; nothing is emitted until sinks attach
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState {
                root_level: LogLevel::Info,
                sinks: Vec::new(),
            }),
        }
    }

    /// Detach and drop every current sink, then attach the new set at
    /// the given root level
    pub fn replace(&self, root_level: LogLevel, sinks: Vec<Sink>) {
        if let Ok(mut state) = self.state.write() {
            state.sinks.clear();
            state.root_level = root_level;
            state.sinks = sinks;
        }
    }

    /// Attach one more sink to the active set
    pub fn attach(&self, sink: Sink) {
        if let Ok(mut state) = self.state.write() {
            state.sinks.push(sink);
        }
    }

    /// Number of currently attached sinks
    pub fn sink_count(&self) -> usize {
        self.state.read().map(|s| s.sinks.len()).unwrap_or(0)
    }

    /// Offer a record to every sink whose level admits it
    pub fn dispatch(&self, record: &LogRecord) {
        let Ok(state) = self.state.read() else {
            return;
        };
        if record.level < state.root_level {
            return;
        }
        for sink in &state.sinks {
            if record.level >= sink.min_level {
                sink.emit(record);
            }
        }
    }
}

/// Bridges `tracing` events into a [`SinkRegistry`]
pub struct SinkLayer {
    registry: Arc<SinkRegistry>,
}

impl SinkLayer {
    /// Create a layer feeding the given registry
    pub fn new(registry: Arc<SinkRegistry>) -> Self {
        Self { registry }
    }
}

impl<S: Subscriber> Layer<S> for SinkLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let mut message = visitor.message;
        if !visitor.extra.is_empty() {
            if message.is_empty() {
                message = visitor.extra.trim_start().to_string();
            } else {
                message.push_str(&visitor.extra);
            }
        }

        let record = LogRecord {
            timestamp: Local::now(),
            level: (*metadata.level()).into(),
            target: metadata.target().to_string(),
            service: String::new(),
            message,
        };
        self.registry.dispatch(&record);
    }
}

/// Collects the `message` field; other fields are appended as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    extra: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        use std::fmt::Write;
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.extra, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        use std::fmt::Write;
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            let _ = write!(self.extra, " {}={:?}", field.name(), value);
        }
    }
}
