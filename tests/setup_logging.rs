//! End-to-end test for the one-shot setup path.
//!
//! The idempotency flag is process-global, so everything lives in a
//! single test function; the file-sink failure path has its own
//! integration binary for the same reason.

use std::fs;

use svclog::{is_configured, setup_logging, LogOptions};
use tempfile::TempDir;

#[test]
fn setup_configures_once_and_tags_every_record() {
    let dir = TempDir::new().unwrap();
    let options = LogOptions {
        level: Some("debug".to_string()),
        log_to_console: Some(false),
        log_to_file: Some(true),
        log_dir: Some(dir.path().to_path_buf()),
        log_filename: Some("gateway.log".to_string()),
        ..Default::default()
    };

    assert!(!is_configured());
    setup_logging("market-data-gateway", options);
    assert!(is_configured());

    tracing::info!("order book snapshot loaded");
    tracing::debug!("subscribing to feed");
    tracing::trace!("below the resolved level");

    let log_path = dir.path().join("gateway.log");
    let contents = fs::read_to_string(&log_path).unwrap();
    assert!(contents.contains("Logging configured for service 'market-data-gateway'"));
    assert!(contents.contains("market-data-gateway - INFO - order book snapshot loaded"));
    assert!(contents.contains("market-data-gateway - DEBUG - subscribing to feed"));
    assert!(!contents.contains("below the resolved level"));
    for line in contents.lines() {
        assert!(
            line.contains(" - market-data-gateway - "),
            "untagged line: {line}"
        );
    }

    // A second call is a complete no-op: no new sinks, no new records
    let other_dir = TempDir::new().unwrap();
    setup_logging(
        "other-service",
        LogOptions {
            log_to_file: Some(true),
            log_dir: Some(other_dir.path().to_path_buf()),
            log_filename: Some("second.log".to_string()),
            ..Default::default()
        },
    );
    assert!(!other_dir.path().join("second.log").exists());

    tracing::info!("emitted after the second call");
    let contents = fs::read_to_string(&log_path).unwrap();
    assert!(contents.contains("market-data-gateway - INFO - emitted after the second call"));
    assert_eq!(
        contents.matches("Logging configured for service").count(),
        1
    );
}
