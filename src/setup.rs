//! One-shot, process-wide logging setup
//!
//! Call [`setup_logging`] once at process start, before worker threads
//! are emitting in volume. Every later call in the same process is a
//! silent no-op, and the check-and-set is atomic so a racing second
//! caller cannot double-configure.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{resolve, LogOptions, ResolvedConfig};
use crate::format::LineFormat;
use crate::sink::{Sink, SinkError, SinkLayer, SinkRegistry};
use crate::tagger::RecordTagger;

static CONFIGURED: AtomicBool = AtomicBool::new(false);
static REGISTRY: OnceLock<Arc<SinkRegistry>> = OnceLock::new();

/// Whether `setup_logging` has already run in this process
pub fn is_configured() -> bool {
    CONFIGURED.load(Ordering::SeqCst)
}

/// Configure the process-wide logging root.
///
/// Resolves each option as argument > environment variable > default,
/// resets any sinks already attached to the root, and attaches a
/// console sink and/or a size-rotated file sink, each stamping the
/// given service name onto every record it writes.
///
/// Nothing here is fatal: a file sink that cannot be built is reported
/// through the root as an error record and skipped, leaving console
/// output (if enabled) intact. The first call wins; repeated calls
/// return immediately with no side effects.
pub fn setup_logging(service_name: &str, options: LogOptions) {
    if CONFIGURED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return;
    }

    let config = resolve(&options);
    let format = LineFormat::parse(&config.log_format);
    let tagger = RecordTagger::new(service_name);

    // Console first, so a file sink failure still has somewhere to report
    let mut sinks = Vec::new();
    if config.log_to_console {
        sinks.push(Sink::stdout(config.level, format.clone(), tagger.clone()));
    }

    let registry = Arc::clone(REGISTRY.get_or_init(|| Arc::new(SinkRegistry::new())));
    registry.replace(config.level, sinks);

    // Install the layer once per process. A subscriber installed by the
    // host application is tolerated; our sinks just stay silent then.
    let _ = tracing_subscriber::registry()
        .with(SinkLayer::new(Arc::clone(&registry)))
        .try_init();

    if config.log_to_file {
        match build_file_sink(&config, &format, &tagger) {
            Ok(sink) => registry.attach(sink),
            Err(err) => {
                let path = config.log_dir.join(&config.log_filename);
                tracing::error!("Failed to configure file logging to {}: {err}", path.display());
            }
        }
    }

    tracing::info!(
        "Logging configured for service '{service_name}'. Level: {}, Console: {}, File: {}",
        config.level.as_str(),
        config.log_to_console,
        config.log_to_file
    );
}

/// Create the log directory and open the rotating file sink
fn build_file_sink(
    config: &ResolvedConfig,
    format: &LineFormat,
    tagger: &RecordTagger,
) -> Result<Sink, SinkError> {
    let dir = resolve_log_dir(&config.log_dir);
    std::fs::create_dir_all(&dir).map_err(|source| SinkError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    Sink::rotating_file(
        dir.join(&config.log_filename),
        config.max_bytes,
        config.backup_count,
        config.level,
        format.clone(),
        tagger.clone(),
    )
}

/// Absolute directories are used as-is; relative ones resolve against
/// the process working directory
fn resolve_log_dir(dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(dir))
            .unwrap_or_else(|_| dir.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_log_dir_is_unchanged() {
        let dir = Path::new("/var/log/gateway");
        assert_eq!(resolve_log_dir(dir), PathBuf::from("/var/log/gateway"));
    }

    #[test]
    fn test_relative_log_dir_joins_working_directory() {
        let resolved = resolve_log_dir(Path::new("logs"));
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("logs"));
    }
}
