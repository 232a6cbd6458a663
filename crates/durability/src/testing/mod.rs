//! Testing utilities for the log writer
//!
//! In-memory sinks that let tests look at the compressed bytes a writer
//! produced and inject I/O failures at the bottom of the pipeline:
//!
//! - **MemorySink**: Shared in-memory sink, cloneable so the test keeps a handle
//! - **FaultySink**: MemorySink with switchable write, flush and close faults
//!
//! # Example
//!
//! ```ignore
//! use gzlog_durability::testing::FaultySink;
//! use gzlog_durability::LogWriter;
//!
//! let sink = FaultySink::new();
//! let writer = LogWriter::with_sink(sink.clone(), LogConfig::for_testing())?;
//! sink.fail_writes(true);
//! assert!(writer.write_two_lines(b"req", b"resp").is_err());
//! ```

mod faulty_sink;
mod memory_sink;

pub use faulty_sink::FaultySink;
pub use memory_sink::MemorySink;
