//! Error types for the compressed line log
//!
//! Every fallible operation returns [`LogError`]. Errors on the write path are
//! always handed back to the caller; nothing in this workspace retries.

use crate::config::ConfigError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for log operations
pub type LogResult<T> = std::result::Result<T, LogError>;

/// Errors raised by the log writer
#[derive(Debug, Error)]
pub enum LogError {
    /// The output path could not be opened or created
    #[error("Failed to open log file {}: {source}", path.display())]
    Open {
        /// Path that was being opened
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// A buffer, compressor or sink write failed
    ///
    /// The writer stays usable; the record in flight may be partially
    /// present in the output.
    #[error("Write error: {0}")]
    Write(#[source] io::Error),

    /// Draining the buffer or compressor failed
    #[error("Flush error: {0}")]
    Flush(#[source] io::Error),

    /// The first failure among the close steps
    #[error("Close error: {0}")]
    Close(#[source] io::Error),

    /// The writer has already been closed
    #[error("Log writer is closed")]
    Closed,

    /// Configuration rejected at construction
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl LogError {
    /// Create an open error for `path`
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LogError::Open {
            path: path.into(),
            source,
        }
    }

    /// Check if this is an open error
    pub fn is_open_error(&self) -> bool {
        matches!(self, LogError::Open { .. })
    }

    /// Check if the writer was already closed
    pub fn is_closed(&self) -> bool {
        matches!(self, LogError::Closed)
    }

    /// Kind of the underlying I/O error, if there is one
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            LogError::Open { source, .. } => Some(source.kind()),
            LogError::Write(e) | LogError::Flush(e) | LogError::Close(e) => Some(e.kind()),
            LogError::Closed | LogError::Config(_) => None,
        }
    }
}

impl From<LogError> for io::Error {
    fn from(e: LogError) -> Self {
        match e {
            LogError::Open { source, .. } => source,
            LogError::Write(e) | LogError::Flush(e) | LogError::Close(e) => e,
            LogError::Closed => io::Error::new(io::ErrorKind::NotConnected, "log writer is closed"),
            LogError::Config(e) => io::Error::new(io::ErrorKind::InvalidInput, e),
        }
    }
}
