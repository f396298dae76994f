//! Standard LZ4 frame decoder.
//!
//! CAS xorb chunks never carry frame-wrapped payloads — only the raw blocks
//! handled by [`crate::raw`] — so this module exists solely so interop
//! tests can assert this crate reads frames produced by a standard LZ4
//! encoder. Block and content checksums are read and discarded; they are
//! never validated.

use thiserror::Error;

use crate::error::Lz4Error;
use crate::raw;

/// The 4-byte magic number that opens a standard LZ4 frame.
pub const MAGIC: [u8; 4] = [0x04, 0x22, 0x4D, 0x18];

const FLG_VERSION_MASK: u8 = 0b1100_0000;
const FLG_VERSION_BITS: u8 = 0b0100_0000;
const FLG_BLOCK_CHECKSUM: u8 = 0b0001_0000;
const FLG_CONTENT_SIZE: u8 = 0b0000_1000;
const FLG_CONTENT_CHECKSUM: u8 = 0b0000_0100;
const FLG_DICT_ID: u8 = 0b0000_0001;

const BLOCK_UNCOMPRESSED_FLAG: u32 = 0x8000_0000;

/// Errors from parsing a standard LZ4 frame.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Input did not begin with the LZ4 frame magic number.
    #[error("input does not start with the LZ4 frame magic number")]
    BadMagic,

    /// The FLG byte's version bits were not `01`.
    #[error("unsupported LZ4 frame version")]
    UnsupportedVersion,

    /// The header ended before a mandatory or flag-selected field.
    #[error("truncated LZ4 frame header")]
    TruncatedHeader,

    /// A block's declared size byte or body ran past the end of input.
    #[error("truncated LZ4 frame block")]
    TruncatedBlock,

    /// A compressed block failed to decode.
    #[error("LZ4 frame block decompression failed: {0}")]
    Block(#[from] Lz4Error),
}

/// Block-size descriptor values named in the frame format (FLG/BD byte 1,
/// bits 6-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockMaxSize {
    Kib64,
    Kib256,
    Mib1,
    Mib4,
}

impl BlockMaxSize {
    fn from_bd(bd: u8) -> Self {
        match (bd >> 4) & 0x7 {
            4 => Self::Kib64,
            5 => Self::Kib256,
            6 => Self::Mib1,
            _ => Self::Mib4,
        }
    }

    const fn bytes(self) -> usize {
        match self {
            Self::Kib64 => 64 * 1024,
            Self::Kib256 => 256 * 1024,
            Self::Mib1 => 1024 * 1024,
            Self::Mib4 => 4 * 1024 * 1024,
        }
    }
}

/// Decodes a complete standard LZ4 frame and returns the decompressed
/// content.
pub fn decode_frame(input: &[u8]) -> Result<Vec<u8>, FrameError> {
    let mut pos = 0usize;

    if input.len() < MAGIC.len() || input[..MAGIC.len()] != MAGIC {
        return Err(FrameError::BadMagic);
    }
    pos += MAGIC.len();

    let flg = *input.get(pos).ok_or(FrameError::TruncatedHeader)?;
    pos += 1;
    let bd = *input.get(pos).ok_or(FrameError::TruncatedHeader)?;
    pos += 1;

    if flg & FLG_VERSION_MASK != FLG_VERSION_BITS {
        return Err(FrameError::UnsupportedVersion);
    }

    if flg & FLG_CONTENT_SIZE != 0 {
        pos = pos.checked_add(8).ok_or(FrameError::TruncatedHeader)?;
    }
    if flg & FLG_DICT_ID != 0 {
        pos = pos.checked_add(4).ok_or(FrameError::TruncatedHeader)?;
    }
    if pos >= input.len() {
        return Err(FrameError::TruncatedHeader);
    }
    pos += 1; // header checksum byte, not validated

    let block_max = BlockMaxSize::from_bd(bd).bytes();
    let block_checksum = flg & FLG_BLOCK_CHECKSUM != 0;
    let content_checksum = flg & FLG_CONTENT_CHECKSUM != 0;

    let mut out = Vec::new();
    loop {
        let size_field = input
            .get(pos..pos + 4)
            .ok_or(FrameError::TruncatedBlock)?;
        let raw_size = u32::from_le_bytes([
            size_field[0],
            size_field[1],
            size_field[2],
            size_field[3],
        ]);
        pos += 4;

        if raw_size == 0 {
            break;
        }

        let uncompressed = raw_size & BLOCK_UNCOMPRESSED_FLAG != 0;
        let block_len = (raw_size & !BLOCK_UNCOMPRESSED_FLAG) as usize;

        let block = input
            .get(pos..pos + block_len)
            .ok_or(FrameError::TruncatedBlock)?;
        pos += block_len;

        if block_checksum {
            pos = pos.checked_add(4).ok_or(FrameError::TruncatedBlock)?;
            if pos > input.len() {
                return Err(FrameError::TruncatedBlock);
            }
        }

        if uncompressed {
            out.extend_from_slice(block);
        } else {
            let mut scratch = vec![0u8; block_max];
            let written = raw::decompress_into_portable(block, &mut scratch)?;
            out.extend_from_slice(&scratch[..written]);
        }
    }

    if content_checksum {
        let _ = input.get(pos..pos + 4); // discarded, not validated
    }

    Ok(out)
}
