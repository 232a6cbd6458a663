//! Durability layer for gzlog
//!
//! This crate handles everything that touches the output sink:
//!
//! - Sink: append-only byte destination (`FileSink`, or any `Sink` impl)
//! - Pipeline: fixed-size buffer in front of a streaming gzip encoder
//! - LogWriter: one lock serializing all writers, whole records per critical section
//! - Read-back: independent decode of every gzip member in a log file
//! - Testing: in-memory and fault-injecting sinks

#![warn(missing_docs)]
#![warn(clippy::all)]

mod pipeline;
pub mod reader;
pub mod sink;
pub mod testing;
pub mod writer;

pub use reader::{decode_members, read_all};
pub use sink::{FileSink, Sink};
pub use writer::{LogCounters, LogWriter};
