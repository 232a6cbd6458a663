//! gzlog - Concurrency-safe, compressing, append-only line logger
//!
//! Many threads append records to one gzip-compressed file. Writes are
//! buffered, compressed at a high level and serialized behind a single lock,
//! so records never interleave and a closed file always decodes.
//!
//! # Quick Start
//!
//! ```ignore
//! use gzlog::LogWriter;
//!
//! let log = LogWriter::open("requests.log.gz")?;
//!
//! // "\n{request}\n{response}"
//! log.write_two_lines(request_body, response_body)?;
//!
//! // Same record shape, assembled from fragments without concatenating
//! log.write_line_fragments(
//!     &[Some(b"{\"body\":\""), Some(escaped_body), Some(b"\"}")],
//!     &[Some(response_body)],
//! )?;
//!
//! log.close()?;
//! ```
//!
//! # Architecture
//!
//! - [`gzlog_core`]: errors, configuration, record framing
//! - [`gzlog_durability`]: sinks, the buffer/compressor pipeline, the
//!   writer and the verification read-back

pub use gzlog_core::*;
pub use gzlog_durability::{
    decode_members, read_all, testing, FileSink, LogCounters, LogWriter, Sink,
};
