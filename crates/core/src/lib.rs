//! Core types for gzlog
//!
//! This crate defines the types shared by the writer and its callers:
//! - LogError: Error taxonomy (open, write, flush, close)
//! - LogConfig: Compression level, buffer size and file creation settings
//! - Record framing: the two-line, newline-delimited record convention

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod record;

pub use config::{
    ConfigError, LogConfig, DEFAULT_BUFFER_SIZE, DEFAULT_COMPRESSION_LEVEL, DEFAULT_FILE_MODE,
    MAX_COMPRESSION_LEVEL,
};
pub use error::{LogError, LogResult};
pub use record::{fragments_len, record_len, Fragment, LINE_DELIMITER, RECORD_FRAMING_LEN};
