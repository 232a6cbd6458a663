//! Log Writer Comprehensive Test Suite
//!
//! End-to-end coverage of the compressed line logger against real files:
//! concurrency, byte-exact round trips, and the open/flush/close lifecycle.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run the whole suite
//! cargo test --test log_writer_comprehensive
//!
//! # Run one module
//! cargo test --test log_writer_comprehensive concurrency::
//!
//! # Run with writer logs
//! cargo test --test log_writer_comprehensive -- --nocapture
//! ```

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Once;

use gzlog::LogWriter;
use tempfile::TempDir;

mod roundtrip;

static INIT_TRACING: Once = Once::new();

/// Route writer logs to the test harness output.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
            .try_init();
    });
}

/// A log file path inside a fresh temp directory.
///
/// Keep the `TempDir` alive for as long as the file is used.
pub fn temp_log_path() -> (TempDir, PathBuf) {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("request_log.ndjson.gz");
    (dir, path)
}

/// Open a writer on a fresh temp file with the default configuration.
pub fn temp_writer() -> (TempDir, LogWriter) {
    let (dir, path) = temp_log_path();
    let writer = LogWriter::open(&path).unwrap();
    (dir, writer)
}

/// Split decoded output into `(line1, line2)` records.
///
/// Every record starts with `\n` and its two lines are separated by one
/// `\n`, so after dropping the leading empty segment the lines pair up.
/// Only valid when no payload contains a newline.
pub fn split_records(decoded: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
    if decoded.is_empty() {
        return Vec::new();
    }
    assert_eq!(decoded[0], b'\n', "decoded stream must start with a record");

    let lines: Vec<&[u8]> = decoded[1..].split(|&b| b == b'\n').collect();
    assert_eq!(lines.len() % 2, 0, "odd number of lines: torn record");
    lines
        .chunks(2)
        .map(|pair| (pair[0].to_vec(), pair[1].to_vec()))
        .collect()
}
