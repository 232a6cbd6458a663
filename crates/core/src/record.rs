//! In-band record framing
//!
//! A two-line record is emitted as
//!
//! ```text
//! \n <line 1 fragments> \n <line 2 fragments>
//! ```
//!
//! Fragments are concatenated with no delimiter and there is no trailing
//! newline, so the next record's leading `\n` terminates this one. The
//! framing lives inside the decompressed stream and is independent of gzip
//! member boundaries.

/// Byte that opens a record and separates its two lines
pub const LINE_DELIMITER: u8 = b'\n';

/// Framing bytes added per two-line record (leading and separating newline)
pub const RECORD_FRAMING_LEN: usize = 2;

/// One piece of a line; `None` contributes nothing
pub type Fragment<'a> = Option<&'a [u8]>;

/// Total payload length of a line built from `fragments`
pub fn fragments_len(fragments: &[Fragment<'_>]) -> usize {
    fragments.iter().flatten().map(|f| f.len()).sum()
}

/// Encoded length of a two-line record, framing included
pub fn record_len(line1: &[Fragment<'_>], line2: &[Fragment<'_>]) -> usize {
    RECORD_FRAMING_LEN + fragments_len(line1) + fragments_len(line2)
}
