#![deny(unsafe_code)]
#![deny(missing_docs)]

//! # Overview
//!
//! `xet_lz4` decodes the restricted LZ4 dialect carried inside CAS xorb
//! chunks: raw compressed blocks with no frame header, optionally preceded
//! by a BG4 byte-regrouping pass (handled by the sibling `xet_bg4` crate,
//! not here).
//!
//! # Design
//!
//! [`raw::decompress_into`] is the entry point a chunk decoder should call:
//! it tries the vendored [`lz4_flex`] block decoder and falls back to the
//! portable reference implementation in [`raw`] whenever the fast path
//! can't guarantee an exact-length output. [`frame`] additionally decodes
//! standard LZ4-framed streams (magic number, FLG/BD header, block loop) for
//! interoperability testing only; production xorb payloads never use it.
//!
//! # Invariants
//!
//! - Decoders never allocate more than the caller's requested output size
//!   for the hot path; [`raw::decompress_into`] writes directly into the
//!   buffer the caller owns.
//! - A truncated input, a zero or out-of-range match offset, and an
//!   output buffer too small for the decoded stream are always reported as
//!   distinct [`Lz4Error`] variants, never panics.

pub mod error;
pub mod frame;
pub mod raw;

pub use error::Lz4Error;
pub use frame::{FrameError, decode_frame};
pub use raw::{decompress_into, decompress_into_portable};
