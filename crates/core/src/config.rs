//! Log writer configuration.
//!
//! The defaults favour compression ratio over CPU: log hosts are expected
//! to be I/O bound, so the compressor runs at a high level and the buffer
//! matches the deflate window.

use serde::{Deserialize, Serialize};

/// Default gzip compression level.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 8;

/// Default buffer size in bytes (the 32 KiB deflate window).
///
/// A smaller buffer would hand the compressor less than one window per call
/// and gains nothing.
pub const DEFAULT_BUFFER_SIZE: usize = 32 * 1024;

/// Default permission bits for a newly created log file.
pub const DEFAULT_FILE_MODE: u32 = 0o600;

/// Highest level accepted by the gzip encoder.
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Log writer configuration parameters.
///
/// Derives serde so an embedding application can carry it inside its own
/// configuration file.
///
/// ```toml
/// compression_level = 8
/// buffer_size = 32768
/// file_mode = 384
/// create_parent_dirs = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// gzip compression level, 0 (store) to 9 (best). Default: 8.
    pub compression_level: u32,

    /// Size of the in-memory buffer in front of the compressor. Default: 32 KiB.
    pub buffer_size: usize,

    /// Unix permission bits used when the file is created. Default: `0o600`.
    ///
    /// Ignored for files that already exist and on non-Unix targets.
    pub file_mode: u32,

    /// Create missing parent directories on open. Default: false.
    ///
    /// When false a missing directory is reported as an open error.
    pub create_parent_dirs: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            buffer_size: DEFAULT_BUFFER_SIZE,
            file_mode: DEFAULT_FILE_MODE,
            create_parent_dirs: false,
        }
    }
}

impl LogConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set compression level (builder pattern).
    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level;
        self
    }

    /// Set buffer size (builder pattern).
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Set file creation mode (builder pattern).
    pub fn with_file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;
        self
    }

    /// Create parent directories on open (builder pattern).
    pub fn with_create_parent_dirs(mut self, create: bool) -> Self {
        self.create_parent_dirs = create;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(ConfigError::InvalidCompressionLevel(self.compression_level));
        }
        if self.buffer_size == 0 {
            return Err(ConfigError::ZeroBufferSize);
        }
        Ok(())
    }

    /// Create a configuration for tests: tiny buffer, fast compression.
    ///
    /// The small buffer pushes almost every write through to the sink, which
    /// is what failure-injection tests need.
    pub fn for_testing() -> Self {
        LogConfig {
            compression_level: 1,
            buffer_size: 16,
            file_mode: DEFAULT_FILE_MODE,
            create_parent_dirs: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Compression level outside 0..=9.
    #[error("Compression level {0} is out of range (0-9)")]
    InvalidCompressionLevel(u32),

    /// Buffer size of zero.
    #[error("Log buffer size must be greater than zero")]
    ZeroBufferSize,
}
