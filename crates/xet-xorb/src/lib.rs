#![deny(unsafe_code)]
#![deny(missing_docs)]

//! # Overview
//!
//! `xet_xorb` parses the chunked binary container ("xorb") that CAS stores
//! deduplicated file data in: a flat concatenation of chunks, each an
//! 8-byte header followed by a compressed payload, with no outer length —
//! chunks are read until the byte source is exhausted.
//!
//! # Design
//!
//! Two decode modes share one cursor ([`cursor::ByteCursor`]):
//! - [`cursor::decode_chunks`] streams chunks one at a time as a `Stream`,
//!   for callers that want to process a xorb incrementally.
//! - [`batch::decode_batch`] is used when the total decompressed length is
//!   known up front (the scheduler always knows it, from the sum of
//!   `unpacked_length` across the terms sharing a fetch). It writes every
//!   chunk contiguously into one preallocated buffer and records a
//!   chunk-index-to-byte-offset table so a term's sub-range of chunks can
//!   be sliced out with no further allocation.
//!
//! # Invariants
//!
//! - `version` must be 0; any other value is [`XorbError::UnsupportedVersion`].
//! - Scheme 0 requires `compressed_length == uncompressed_length`; anything
//!   else is [`XorbError::LengthMismatch`].
//! - A byte source that ends mid-chunk is [`XorbError::TruncatedStream`],
//!   never a silently short result.

pub mod batch;
pub mod cursor;
pub mod decode;
pub mod error;
pub mod header;

pub use batch::{decode_batch, BatchDecoded};
pub use cursor::{decode_chunks, ByteCursor};
pub use decode::decode_payload;
pub use error::XorbError;
pub use header::ChunkHeader;
