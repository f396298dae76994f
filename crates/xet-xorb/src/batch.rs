//! Preallocated-batch decoding: when the total decompressed length of a
//! xorb's chunks is known ahead of time, decode straight into one
//! contiguous buffer instead of yielding a `Bytes` per chunk. This is what
//! the downloader's scheduler uses so a term's chunk range can be sliced
//! out of the result with no further copies.

use bytes::{Bytes, BytesMut};
use futures::Stream;

use crate::cursor::ByteCursor;
use crate::error::XorbError;

/// The result of decoding a xorb in batch mode.
#[derive(Debug, Clone)]
pub struct BatchDecoded {
    /// The concatenation of every chunk's decompressed payload, contiguous
    /// and exactly `total_len` bytes.
    pub bytes: Bytes,
    /// Chunk index to byte offset into `bytes`. Has one more entry than
    /// there are chunks; the final entry is the sentinel `bytes.len()`.
    pub chunk_byte_indices: Vec<u64>,
}

impl BatchDecoded {
    /// The decompressed byte range covering chunk indices `[lo, hi)`
    /// relative to this xorb's own indexing (not a term's absolute chunk
    /// range — callers translate first).
    pub fn chunk_range_bytes(&self, lo: usize, hi: usize) -> Option<&[u8]> {
        let start = *self.chunk_byte_indices.get(lo)?;
        let end = *self.chunk_byte_indices.get(hi)?;
        self.bytes.get(start as usize..end as usize)
    }
}

/// Streams `source` through a [`ByteCursor`], writing each decoded chunk
/// contiguously into a single `total_len`-byte buffer.
///
/// `total_len` must equal the sum of `uncompressed_length` across every
/// chunk the source will yield; a shortfall or overrun is reported as
/// [`XorbError::BatchLengthMismatch`] rather than silently truncating or
/// panicking.
pub async fn decode_batch<S, E>(source: S, total_len: usize) -> Result<BatchDecoded, XorbError>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: std::fmt::Display,
{
    let mut output = BytesMut::zeroed(total_len);
    let mut chunk_byte_indices = vec![0u64];
    let mut cursor = ByteCursor::new(source);
    let mut offset = 0usize;

    while let Some(chunk) = cursor.next_chunk().await? {
        let end = offset + chunk.len();
        if end > total_len {
            return Err(XorbError::BatchLengthMismatch {
                expected: total_len,
                actual: end,
            });
        }
        output[offset..end].copy_from_slice(&chunk);
        offset = end;
        chunk_byte_indices.push(offset as u64);
    }

    if offset != total_len {
        return Err(XorbError::BatchLengthMismatch {
            expected: total_len,
            actual: offset,
        });
    }

    Ok(BatchDecoded {
        bytes: output.freeze(),
        chunk_byte_indices,
    })
}
