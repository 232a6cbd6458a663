//! Failure-injecting sink.

use super::MemorySink;
use crate::sink::Sink;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Faults {
    writes: AtomicBool,
    flushes: AtomicBool,
    closes: AtomicBool,
    every: AtomicU64,
    write_calls: AtomicU64,
    injected: AtomicU64,
    close_calls: AtomicU64,
    writes_after_close: AtomicU64,
}

/// In-memory sink with switchable I/O faults.
///
/// Clones share both the byte vector and the fault switches, so a test can
/// flip a fault on while the writer owns its clone.
#[derive(Debug, Clone, Default)]
pub struct FaultySink {
    inner: MemorySink,
    faults: Arc<Faults>,
}

impl FaultySink {
    /// Create a sink with every fault switched off
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every `write` while set
    pub fn fail_writes(&self, on: bool) {
        self.faults.writes.store(on, Ordering::SeqCst);
    }

    /// Fail every `n`th `write` call, counted across all clones.
    ///
    /// `0` switches the periodic fault off.
    pub fn fail_every(&self, n: u64) {
        self.faults.every.store(n, Ordering::SeqCst);
    }

    /// Fail every `flush` while set
    pub fn fail_flushes(&self, on: bool) {
        self.faults.flushes.store(on, Ordering::SeqCst);
    }

    /// Fail `close` while set
    pub fn fail_closes(&self, on: bool) {
        self.faults.closes.store(on, Ordering::SeqCst);
    }

    /// Number of calls that were failed on purpose
    pub fn injected_faults(&self) -> u64 {
        self.faults.injected.load(Ordering::SeqCst)
    }

    /// Number of times `close` was called, failed or not
    pub fn close_calls(&self) -> u64 {
        self.faults.close_calls.load(Ordering::SeqCst)
    }

    /// Number of `write` calls that arrived after a successful `close`
    pub fn writes_after_close(&self) -> u64 {
        self.faults.writes_after_close.load(Ordering::SeqCst)
    }

    /// Copy of everything written so far
    pub fn contents(&self) -> Vec<u8> {
        self.inner.contents()
    }

    fn inject(&self, what: &str) -> io::Error {
        self.faults.injected.fetch_add(1, Ordering::SeqCst);
        io::Error::new(io::ErrorKind::Other, format!("injected {} fault", what))
    }
}

impl Write for FaultySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.inner.is_closed() {
            self.faults.writes_after_close.fetch_add(1, Ordering::SeqCst);
        }
        let call = self.faults.write_calls.fetch_add(1, Ordering::SeqCst) + 1;
        let every = self.faults.every.load(Ordering::SeqCst);
        if self.faults.writes.load(Ordering::SeqCst) || (every > 0 && call % every == 0) {
            return Err(self.inject("write"));
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.faults.flushes.load(Ordering::SeqCst) {
            return Err(self.inject("flush"));
        }
        self.inner.flush()
    }
}

impl Sink for FaultySink {
    fn close(&mut self) -> io::Result<()> {
        self.faults.close_calls.fetch_add(1, Ordering::SeqCst);
        if self.faults.closes.load(Ordering::SeqCst) {
            return Err(self.inject("close"));
        }
        self.inner.close()
    }
}
