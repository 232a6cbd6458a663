//! Concurrent compressing log writer.
//!
//! Many threads share one [`LogWriter`]. Every operation that touches the
//! buffer or the compressor runs under a single lock, so whole records
//! reach the stream one at a time and in lock-acquisition order.
//!
//! # Record format
//!
//! `write_two_lines(req, resp)` emits `\n{req}\n{resp}` with no trailing
//! newline. The next record's leading newline terminates the previous one.
//!
//! # Lifecycle
//!
//! `open` → any number of writes and flushes from any thread → `close`
//! exactly once. `close` drains the buffer, flushes and finishes the gzip
//! member, then closes the sink. Operations after `close` fail with
//! [`LogError::Closed`].

use crate::pipeline::Pipeline;
use crate::reader;
use crate::sink::{FileSink, Sink};
use gzlog_core::{record_len, Fragment, LogConfig, LogError, LogResult};
use parking_lot::Mutex;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Cumulative writer counters.
///
/// Updated inside the critical section and never reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogCounters {
    /// Two-line records fully accepted into the buffer
    pub records_written: u64,
    /// Bytes accepted into the buffer, record framing included
    pub bytes_accepted: u64,
    /// Explicit flushes that completed
    pub flushes: u64,
}

struct Inner<S: Sink> {
    /// `None` once the writer has been closed
    pipeline: Option<Pipeline<S>>,
    counters: LogCounters,
}

impl<S: Sink> Inner<S> {
    fn open_parts(&mut self) -> LogResult<(&mut Pipeline<S>, &mut LogCounters)> {
        let pipeline = self.pipeline.as_mut().ok_or(LogError::Closed)?;
        Ok((pipeline, &mut self.counters))
    }
}

/// Thread-safe, buffered, gzip-compressing append-only writer.
///
/// Share it behind an `Arc`; every method takes `&self`.
///
/// # Example
///
/// ```ignore
/// use gzlog_durability::LogWriter;
///
/// let log = LogWriter::open("requests.log.gz")?;
/// log.write_line_fragments(
///     &[Some(b"{\"body\":\""), Some(body), Some(b"\"}")],
///     &[Some(response)],
/// )?;
/// log.close()?;
/// ```
pub struct LogWriter<S: Sink = FileSink> {
    inner: Mutex<Inner<S>>,
    path: Option<PathBuf>,
    config: LogConfig,
}

impl LogWriter<FileSink> {
    /// Open `path` for appending with the default configuration.
    ///
    /// The file is created if absent; existing content is kept and the new
    /// session becomes another gzip member after it.
    pub fn open(path: impl AsRef<Path>) -> LogResult<Self> {
        Self::open_with_config(path, LogConfig::default())
    }

    /// Open `path` for appending with an explicit configuration.
    pub fn open_with_config(path: impl AsRef<Path>, config: LogConfig) -> LogResult<Self> {
        config.validate()?;
        let sink = FileSink::open(path, &config)?;
        Self::with_sink(sink, config)
    }
}

impl<S: Sink> LogWriter<S> {
    /// Build a writer over an already opened sink.
    pub fn with_sink(sink: S, config: LogConfig) -> LogResult<Self> {
        config.validate()?;
        let path = sink.location().map(Path::to_path_buf);

        info!(
            path = ?path,
            compression_level = config.compression_level,
            buffer_size = config.buffer_size,
            "Opened compressed log writer"
        );

        Ok(LogWriter {
            inner: Mutex::new(Inner {
                pipeline: Some(Pipeline::new(sink, &config)),
                counters: LogCounters::default(),
            }),
            path,
            config,
        })
    }

    /// Write an opaque payload.
    ///
    /// Returns the number of bytes accepted into the buffer, which is all of
    /// `data` on success. The bytes are not necessarily compressed or on
    /// disk yet, but a full buffer is pushed down synchronously, so this
    /// call can block on I/O. An empty payload is a no-op.
    pub fn write_bytes(&self, data: &[u8]) -> LogResult<usize> {
        let mut inner = self.inner.lock();
        let (pipeline, counters) = inner.open_parts()?;

        if data.is_empty() {
            return Ok(0);
        }
        pipeline.write_all(data).map_err(LogError::Write)?;
        counters.bytes_accepted += data.len() as u64;
        Ok(data.len())
    }

    /// Write a string payload. Same contract as [`write_bytes`](Self::write_bytes).
    pub fn write_str(&self, s: &str) -> LogResult<usize> {
        self.write_bytes(s.as_bytes())
    }

    /// Write one two-line record: `\n{line1}\n{line2}`.
    ///
    /// Typically a request body and its response.
    pub fn write_two_lines(&self, line1: &[u8], line2: &[u8]) -> LogResult<()> {
        self.write_line_fragments(&[Some(line1)], &[Some(line2)])
    }

    /// Write one two-line record whose lines are assembled from fragments.
    ///
    /// Fragments are concatenated in order without a delimiter; `None` and
    /// empty fragments contribute nothing. This avoids building the line in
    /// a temporary buffer just to log it.
    ///
    /// The whole record is emitted inside one critical section, so records
    /// from concurrent callers never interleave. On failure the remaining
    /// fragments are skipped and the error is returned; the bytes already
    /// accepted stay in the stream as a partial record and the writer
    /// remains usable.
    pub fn write_line_fragments(
        &self,
        line1: &[Fragment<'_>],
        line2: &[Fragment<'_>],
    ) -> LogResult<()> {
        let mut inner = self.inner.lock();
        let (pipeline, counters) = inner.open_parts()?;

        pipeline
            .write_record(line1, line2)
            .map_err(LogError::Write)?;
        counters.records_written += 1;
        counters.bytes_accepted += record_len(line1, line2) as u64;
        Ok(())
    }

    /// Push everything written so far through to the sink.
    ///
    /// Drains the buffer and sync-flushes the compressor without ending the
    /// gzip member, so the file decodes up to this point while writes
    /// continue. Serialized with the writes, so a flush never splits a
    /// record.
    pub fn flush(&self) -> LogResult<()> {
        let mut inner = self.inner.lock();
        let (pipeline, counters) = inner.open_parts()?;

        pipeline.flush().map_err(LogError::Flush)?;
        counters.flushes += 1;
        debug!(path = ?self.path, "Flushed compressed log");
        Ok(())
    }

    /// Finalize the log: drain the buffer, flush and finish the gzip
    /// member, close the sink.
    ///
    /// All steps are attempted even when an earlier one fails; the first
    /// failure is returned as [`LogError::Close`]. The writer is closed
    /// afterwards either way, and a second call returns
    /// [`LogError::Closed`].
    pub fn close(&self) -> LogResult<()> {
        let mut inner = self.inner.lock();
        let pipeline = inner.pipeline.take().ok_or(LogError::Closed)?;
        let counters = inner.counters;

        // Held until the sink is closed; waiting writers then see Closed.
        let result = pipeline.shutdown();
        drop(inner);
        result.map_err(LogError::Close)?;

        info!(
            path = ?self.path,
            records = counters.records_written,
            bytes = counters.bytes_accepted,
            "Closed compressed log writer"
        );
        Ok(())
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.lock().pipeline.is_none()
    }

    /// Snapshot of the cumulative counters.
    pub fn counters(&self) -> LogCounters {
        self.inner.lock().counters
    }

    /// Path of the backing file, if the sink has one.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Configuration the writer was built with.
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Decode the backing file from disk.
    ///
    /// Not coordinated with concurrent writers: only content up to the last
    /// completed `flush` or `close` is guaranteed to be visible. Returns an
    /// empty vector for sinks without a path. See [`reader::read_all`].
    pub fn read_all(&self) -> Vec<u8> {
        match &self.path {
            Some(path) => reader::read_all(path),
            None => Vec::new(),
        }
    }
}

impl<S: Sink> Drop for LogWriter<S> {
    fn drop(&mut self) {
        if self.inner.get_mut().pipeline.is_some() {
            // Buffer and encoder drop handlers still try to finish the member,
            // ignoring errors.
            warn!(path = ?self.path, "Compressed log writer dropped without close");
        }
    }
}

/// Byte-stream view of the writer, for `write!` and `io::copy`.
///
/// Each `write` call is one critical section that accepts the whole slice.
impl<S: Sink> io::Write for &LogWriter<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(self.write_bytes(buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(LogWriter::flush(self)?)
    }
}
