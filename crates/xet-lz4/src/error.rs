use thiserror::Error;

/// Errors produced while decoding the restricted raw-block LZ4 dialect used
/// by CAS xorb chunks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Lz4Error {
    /// The input ended before a token, literal run, offset, or extended
    /// length byte that the stream still required.
    #[error("truncated LZ4 block: expected more input bytes")]
    TruncatedInput,

    /// A match offset was zero, or pointed further back than any byte
    /// written to the output so far.
    #[error("invalid LZ4 match offset {0} (must be in 1..=bytes already written)")]
    InvalidOffset(usize),

    /// Decoding would write past the end of the caller-provided output
    /// buffer.
    #[error("LZ4 decompression overflowed the output buffer")]
    OutputOverflow,
}
