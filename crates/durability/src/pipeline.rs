//! Buffer → Compressor → Sink chain.
//!
//! The pipeline holds the sequential state of one gzip member. It has no
//! synchronization of its own; [`LogWriter`](crate::LogWriter) serializes
//! every call behind its lock.

use crate::sink::Sink;
use flate2::write::GzEncoder;
use flate2::Compression;
use gzlog_core::{Fragment, LogConfig, LINE_DELIMITER};
use std::io::{self, BufWriter, Write};
use tracing::warn;

/// Close step names, in execution order.
pub(crate) const CLOSE_STEPS: [&str; 4] = [
    "drain buffer",
    "flush compressor",
    "finish compressor",
    "close sink",
];

/// Owns the sink until it is closed.
///
/// After `close` every write and flush fails with `NotConnected` and never
/// reaches the sink, including the trailer retry the encoder makes when it
/// is dropped unfinished.
struct SinkSlot<S> {
    sink: Option<S>,
}

impl<S: Sink> SinkSlot<S> {
    fn open(&mut self) -> io::Result<&mut S> {
        self.sink
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "sink is closed"))
    }

    /// Close the sink and give it up, whether or not the close succeeds.
    fn close(&mut self) -> io::Result<()> {
        match self.sink.take() {
            Some(mut sink) => sink.close(),
            None => Ok(()),
        }
    }
}

impl<S: Sink> Write for SinkSlot<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.open()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.open()?.flush()
    }
}

pub(crate) struct Pipeline<S: Sink> {
    buffer: BufWriter<GzEncoder<SinkSlot<S>>>,
}

impl<S: Sink> Pipeline<S> {
    pub(crate) fn new(sink: S, config: &LogConfig) -> Self {
        let slot = SinkSlot { sink: Some(sink) };
        let encoder = GzEncoder::new(slot, Compression::new(config.compression_level));
        Pipeline {
            buffer: BufWriter::with_capacity(config.buffer_size, encoder),
        }
    }

    /// Accept all of `data` into the buffer.
    ///
    /// A full buffer is pushed into the compressor, and from there possibly
    /// into the sink, before this returns.
    pub(crate) fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        self.buffer.write_all(data)
    }

    /// Emit one two-line record.
    ///
    /// Stops at the first failing write; whatever was accepted before it
    /// stays in the stream.
    pub(crate) fn write_record(
        &mut self,
        line1: &[Fragment<'_>],
        line2: &[Fragment<'_>],
    ) -> io::Result<()> {
        self.buffer.write_all(&[LINE_DELIMITER])?;
        self.write_fragments(line1)?;
        self.buffer.write_all(&[LINE_DELIMITER])?;
        self.write_fragments(line2)
    }

    fn write_fragments(&mut self, fragments: &[Fragment<'_>]) -> io::Result<()> {
        for fragment in fragments.iter().flatten() {
            if !fragment.is_empty() {
                self.buffer.write_all(fragment)?;
            }
        }
        Ok(())
    }

    /// Drain the buffer into the compressor and sync-flush the compressor
    /// into the sink. The gzip member stays open.
    pub(crate) fn flush(&mut self) -> io::Result<()> {
        self.buffer.flush()
    }

    /// Finalize the stream and release the sink.
    ///
    /// Every step runs even if an earlier one failed. Failures are logged
    /// and the first one is returned.
    pub(crate) fn shutdown(self) -> io::Result<()> {
        let (mut encoder, pending) = self.buffer.into_parts();
        let pending = pending.unwrap_or_else(|panicked| panicked.into_inner());

        let results = [
            encoder.write_all(&pending),
            encoder.flush(),
            encoder.try_finish(),
            encoder.get_mut().close(),
        ];

        let mut first_error = None;
        for (step, result) in CLOSE_STEPS.into_iter().zip(results) {
            if let Err(e) = result {
                warn!(step, error = %e, "Log close step failed");
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
