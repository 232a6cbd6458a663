//! Verification read-back.
//!
//! Decodes a log file independently of any live writer. This is a
//! diagnostic path: it never fails, it returns what it could decode.

use flate2::read::MultiGzDecoder;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read and decompress the whole log file at `path`.
///
/// Concatenated gzip members (one per writer session) are decoded in order.
/// Decoding stops at the first error and the bytes decoded up to that point
/// are returned, so a member that was flushed but not yet closed yields its
/// flushed prefix. An unreadable file yields an empty vector.
pub fn read_all(path: impl AsRef<Path>) -> Vec<u8> {
    let path = path.as_ref();
    match std::fs::read(path) {
        Ok(compressed) => decode_members(&compressed),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Log read-back failed to open file");
            Vec::new()
        }
    }
}

/// Decompress a byte slice holding one or more gzip members.
///
/// Same error policy as [`read_all`].
pub fn decode_members(compressed: &[u8]) -> Vec<u8> {
    let mut decoded = Vec::new();
    if compressed.is_empty() {
        return decoded;
    }

    let mut decoder = MultiGzDecoder::new(compressed);
    if let Err(e) = decoder.read_to_end(&mut decoded) {
        // read_to_end keeps everything read before the error
        debug!(
            error = %e,
            decoded = decoded.len(),
            "Log read-back stopped at first decode error"
        );
    }
    decoded
}
