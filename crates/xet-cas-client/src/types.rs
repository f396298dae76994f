//! Wire types for the reconstruction endpoint's JSON response.
//!
//! Field names match the wire format exactly (`snake_case`, see the spec
//! this crate implements) rather than being renamed to a more Rust-idiomatic
//! style, since they are deserialized directly from the response body.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::CasClientError;

/// A half-open `[start, end)` chunk index interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ChunkRange {
    /// Inclusive lower bound chunk index.
    pub start: i32,
    /// Exclusive upper bound chunk index.
    pub end: i32,
}

impl ChunkRange {
    /// Whether `self` fully contains `other` (`self.start <= other.start`
    /// and `other.end <= self.end`).
    #[must_use]
    pub fn contains(&self, other: ChunkRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Number of chunks in this range. Zero for an empty range.
    #[must_use]
    pub fn len(&self) -> i32 {
        (self.end - self.start).max(0)
    }

    /// Whether this range contains no chunks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A contiguous chunk-index range within one xorb, referenced by a file's
/// reconstruction plan.
#[derive(Debug, Clone, Deserialize)]
pub struct Term {
    /// The xorb hash (64-hex) this term's chunks live in.
    pub hash: String,
    /// Expected total decompressed byte count over this term's chunks.
    pub unpacked_length: u32,
    /// Half-open chunk index range within the xorb.
    pub range: ChunkRange,
}

/// A half-open `[start, end]` byte interval used for HTTP `Range` requests.
/// Inclusive on both ends, per HTTP's own `Range` header semantics — unlike
/// [`ChunkRange`], which is half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct UrlRange {
    /// Inclusive range start, in bytes.
    pub start: u64,
    /// Inclusive range end, in bytes.
    pub end: u64,
}

/// A presigned HTTP GET plus byte range covering one or more chunks of a
/// xorb.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchInfo {
    /// Presigned URL to `GET`.
    pub url: String,
    /// Half-open chunk index range this fetch-info covers.
    pub range: ChunkRange,
    /// Inclusive byte range to request via the HTTP `Range` header.
    pub url_range: UrlRange,
}

/// The reconstruction plan for one file: an offset to discard from the
/// first term's output, the ordered terms, and the fetch-infos needed to
/// retrieve each term's xorb.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconstructionPlan {
    /// Bytes to discard from the start of the first term's output.
    pub offset_into_first_range: u64,
    /// Ordered terms making up the file.
    pub terms: Vec<Term>,
    /// Xorb hash to the fetch-infos that can serve its chunks.
    pub fetch_info: HashMap<String, Vec<FetchInfo>>,
}

impl ReconstructionPlan {
    /// Finds the first fetch-info for `term`'s hash whose chunk range fully
    /// contains the term's range. A term not covered by any fetch-info
    /// makes the plan malformed.
    pub fn fetch_info_for(&self, term: &Term) -> Result<&FetchInfo, CasClientError> {
        self.fetch_info
            .get(&term.hash)
            .and_then(|infos| infos.iter().find(|info| info.range.contains(term.range)))
            .ok_or_else(|| CasClientError::UncoveredTermRange {
                hash: term.hash.clone(),
                lo: term.range.start,
                hi: term.range.end,
            })
    }
}
