use thiserror::Error;

use xet_lz4::Lz4Error;

/// Errors from parsing or decoding a xorb chunk stream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum XorbError {
    /// The chunk header's `version` field was not 0.
    #[error("unsupported xorb chunk version {0}")]
    UnsupportedVersion(u8),

    /// The chunk header's `scheme` byte named a dispatch value this decoder
    /// does not recognize.
    #[error("unsupported xorb chunk scheme {0}")]
    UnsupportedScheme(u8),

    /// A header was shorter than the mandatory 8 bytes (only reachable when
    /// a caller constructs one from a malformed slice directly).
    #[error("invalid xorb chunk header length {0}, expected 8")]
    InvalidHeaderLength(usize),

    /// Scheme 0 requires `compressed_length == uncompressed_length`.
    #[error(
        "scheme-0 chunk length mismatch: compressed_length={compressed} uncompressed_length={uncompressed}"
    )]
    LengthMismatch {
        /// The header's `compressed_length` field.
        compressed: u32,
        /// The header's `uncompressed_length` field.
        uncompressed: u32,
    },

    /// LZ4 (optionally BG4-wrapped) decompression of a chunk payload failed.
    #[error("xorb chunk decompression failed: {0}")]
    Decompression(#[from] Lz4Error),

    /// The byte source ended with a non-empty residual buffer that did not
    /// form a complete chunk.
    #[error("truncated xorb stream: {0} residual bytes could not form a chunk")]
    TruncatedStream(usize),

    /// The byte source yielded an I/O error while being read.
    #[error("xorb byte source failed: {0}")]
    Source(String),

    /// A preallocated-batch decode wrote fewer or more bytes than the
    /// caller's declared total.
    #[error("xorb batch decode length mismatch: expected {expected} bytes, decoded {actual}")]
    BatchLengthMismatch {
        /// The caller's declared total output length.
        expected: usize,
        /// The number of bytes actually decoded before the mismatch was
        /// detected.
        actual: usize,
    },
}

impl XorbError {
    /// Wraps a byte-source I/O error (the stream feeding the cursor failed),
    /// as opposed to a malformed xorb payload.
    pub fn from_source_error(err: impl std::fmt::Display) -> Self {
        Self::Source(err.to_string())
    }
}
