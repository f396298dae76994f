//! Portable decoder for the raw-block LZ4 dialect carried inside xorb
//! chunks (see `xet_xorb::chunk` for the framing that wraps these blocks).
//!
//! This is deliberately *not* a general LZ4 decoder: it implements exactly
//! the token/literal/match grammar a raw block can contain, with no frame
//! header, no dictionary, and no streaming state carried between blocks.
//!
//! # Wire grammar
//!
//! Each sequence starts with a one-byte token split into two nibbles,
//! `(literal_length_hi, match_length_hi)`. A literal run of `literal_length`
//! bytes follows (length-extended past 15 by summing subsequent `0..=255`
//! bytes until one is less than 255), then — unless the block ends here — a
//! little-endian 2-byte match offset and a length-extended match length
//! (with an implicit `+4`, LZ4's `MINMATCH`). The match is copied
//! byte-by-byte so that overlapping copies (offset smaller than the match
//! length, including `offset == 1` for run-length patterns) are well
//! defined.

use crate::error::Lz4Error;

const MIN_MATCH: usize = 4;

/// Decodes `src` into `output`, which must be sized to exactly the expected
/// decompressed length. Returns the number of bytes written, which equals
/// `output.len()` on success.
///
/// Tries the vendored `lz4_flex` block decoder first — it is the
/// battle-tested path — and falls back to [`decompress_into_portable`] when
/// it doesn't produce an exact match for the requested output size. Per the
/// open question in the spec this document is generalized from, the
/// optimized routine is only trusted when it reports filling the buffer
/// exactly; any other outcome (including its own decode errors) defers to
/// the portable decoder rather than surfacing a spurious failure.
pub fn decompress_into(src: &[u8], output: &mut [u8]) -> Result<usize, Lz4Error> {
    match lz4_flex::block::decompress_into(src, output) {
        Ok(n) if n == output.len() => Ok(n),
        _ => decompress_into_portable(src, output),
    }
}

/// Reference scalar decoder with no external dependency. Used as the
/// fallback path for [`decompress_into`] and directly by callers (such as
/// the frame passthrough) that don't know the exact output length up front.
pub fn decompress_into_portable(src: &[u8], output: &mut [u8]) -> Result<usize, Lz4Error> {
    let mut in_pos = 0usize;
    let mut out_pos = 0usize;

    loop {
        let token = *src.get(in_pos).ok_or(Lz4Error::TruncatedInput)?;
        in_pos += 1;

        let literal_length_hi = (token >> 4) as usize;
        let match_length_hi = (token & 0x0F) as usize;

        let literal_length = read_extended_length(src, &mut in_pos, literal_length_hi)?;
        copy_literals(src, &mut in_pos, output, &mut out_pos, literal_length)?;

        if in_pos >= src.len() {
            // The final sequence in a block carries no match: exhausting the
            // input right after its literals is the normal end-of-block
            // condition, not truncation.
            break;
        }

        let offset = read_offset(src, &mut in_pos)?;
        if offset == 0 || offset > out_pos {
            return Err(Lz4Error::InvalidOffset(offset));
        }

        let match_length = MIN_MATCH + read_extended_length(src, &mut in_pos, match_length_hi)?;
        copy_match(output, &mut out_pos, offset, match_length)?;
    }

    Ok(out_pos)
}

fn read_extended_length(src: &[u8], pos: &mut usize, initial: usize) -> Result<usize, Lz4Error> {
    if initial < 15 {
        return Ok(initial);
    }
    let mut total = initial;
    loop {
        let byte = *src.get(*pos).ok_or(Lz4Error::TruncatedInput)?;
        *pos += 1;
        total += byte as usize;
        if byte != 0xFF {
            break;
        }
    }
    Ok(total)
}

fn read_offset(src: &[u8], pos: &mut usize) -> Result<usize, Lz4Error> {
    let bytes = src.get(*pos..*pos + 2).ok_or(Lz4Error::TruncatedInput)?;
    let offset = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
    *pos += 2;
    Ok(offset)
}

fn copy_literals(
    src: &[u8],
    in_pos: &mut usize,
    output: &mut [u8],
    out_pos: &mut usize,
    literal_length: usize,
) -> Result<(), Lz4Error> {
    let out_end = out_pos
        .checked_add(literal_length)
        .filter(|&end| end <= output.len())
        .ok_or(Lz4Error::OutputOverflow)?;
    let in_end = in_pos
        .checked_add(literal_length)
        .ok_or(Lz4Error::TruncatedInput)?;
    let literal_src = src.get(*in_pos..in_end).ok_or(Lz4Error::TruncatedInput)?;
    output[*out_pos..out_end].copy_from_slice(literal_src);
    *out_pos = out_end;
    *in_pos = in_end;
    Ok(())
}

/// Copies `match_length` bytes from `output[out_pos - offset..]` to
/// `output[out_pos..]`, one byte at a time so a match may legally read bytes
/// it just wrote (overlapping runs, RLE when `offset == 1`).
fn copy_match(
    output: &mut [u8],
    out_pos: &mut usize,
    offset: usize,
    match_length: usize,
) -> Result<(), Lz4Error> {
    let match_end = out_pos
        .checked_add(match_length)
        .filter(|&end| end <= output.len())
        .ok_or(Lz4Error::OutputOverflow)?;

    let mut read_pos = *out_pos - offset;
    for write_pos in *out_pos..match_end {
        output[write_pos] = output[read_pos];
        read_pos += 1;
    }
    *out_pos = match_end;
    Ok(())
}
