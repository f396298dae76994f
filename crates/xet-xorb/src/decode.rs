//! Dispatches a single chunk's payload to the scheme its header selected.

use bytes::Bytes;

use crate::error::XorbError;
use crate::header::{ChunkHeader, SCHEME_BG4_LZ4, SCHEME_LZ4, SCHEME_NONE};

/// Decompresses one chunk payload according to `header.scheme`.
///
/// `payload` must be exactly `header.compressed_length` bytes; the caller
/// (the byte cursor) is responsible for slicing it out of the buffered
/// stream before calling this.
pub fn decode_payload(header: &ChunkHeader, payload: &[u8]) -> Result<Bytes, XorbError> {
    let uncompressed_len = header.uncompressed_length as usize;

    match header.scheme {
        SCHEME_NONE => Ok(Bytes::copy_from_slice(payload)),
        SCHEME_LZ4 => {
            let mut out = vec![0u8; uncompressed_len];
            xet_lz4::decompress_into(payload, &mut out)?;
            Ok(Bytes::from(out))
        }
        SCHEME_BG4_LZ4 => {
            let mut grouped = vec![0u8; uncompressed_len];
            xet_lz4::decompress_into(payload, &mut grouped)?;
            Ok(Bytes::from(xet_bg4::regroup(&grouped)))
        }
        other => Err(XorbError::UnsupportedScheme(other)),
    }
}
