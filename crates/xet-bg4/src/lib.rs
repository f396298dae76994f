#![deny(unsafe_code)]
#![deny(missing_docs)]

//! # Overview
//!
//! `xet_bg4` implements BG4 ("byte-grouping of 4"), the 4-way byte
//! deinterleave CAS xorb chunks apply before LZ4 when a chunk's `scheme`
//! byte is `2`. Grouping like-position bytes together before compression
//! improves the ratio on structured/columnar data; [`regroup`] undoes it
//! after LZ4 has already produced the grouped bytes.
//!
//! # Design
//!
//! Four segments partition the `n`-byte buffer as unevenly as `n mod 4`
//! requires (segments 0..=2 each absorb one extra byte before segment 3,
//! in that order). [`regroup`] reads output position `i` from
//! `segment(i mod 4)[i / 4]`; [`split`] is its inverse, used only by tests
//! and by interoperability fixtures — production code never needs to
//! regroup-then-split, since the decode path only ever calls [`regroup`].
//!
//! A SIMD planar-transpose fast path is valid per spec for `n >= 256`, but
//! is not implemented here: this crate denies `unsafe_code`, and the
//! `#[target_feature]` intrinsics such a path needs require it.

/// Computes the four segment byte-lengths for an `n`-byte grouped buffer.
///
/// Segment 0 absorbs the first leftover byte, segment 1 the second, segment
/// 2 the third; segment 3 never does (`n mod 4` is at most 3, so segment 3
/// is always exactly `n / 4`).
const fn segment_lengths(n: usize) -> [usize; 4] {
    let split = n / 4;
    let rem = n % 4;
    [
        split + if rem >= 1 { 1 } else { 0 },
        split + if rem >= 2 { 1 } else { 0 },
        split + usize::from(rem == 3),
        split,
    ]
}

const fn segment_starts(lengths: [usize; 4]) -> [usize; 4] {
    [
        0,
        lengths[0],
        lengths[0] + lengths[1],
        lengths[0] + lengths[1] + lengths[2],
    ]
}

/// Un-interleaves a BG4-grouped buffer back into its original byte order.
///
/// `input.len()` bytes in, the same number out; every length from 0 upward
/// is valid (there is no minimum block size).
pub fn regroup(input: &[u8]) -> Vec<u8> {
    let n = input.len();
    let lengths = segment_lengths(n);
    let starts = segment_starts(lengths);

    let mut out = vec![0u8; n];
    for (seg, (&start, &len)) in starts.iter().zip(lengths.iter()).enumerate() {
        let segment = &input[start..start + len];
        for (idx, &byte) in segment.iter().enumerate() {
            out[idx * 4 + seg] = byte;
        }
    }
    out
}

/// Interleaves a plain buffer into BG4-grouped order. This is the inverse
/// of [`regroup`] and is provided for round-trip tests and interop
/// fixtures; the decode pipeline never calls it.
pub fn split(input: &[u8]) -> Vec<u8> {
    let n = input.len();
    let lengths = segment_lengths(n);
    let starts = segment_starts(lengths);

    let mut out = vec![0u8; n];
    for (i, &byte) in input.iter().enumerate() {
        let seg = i % 4;
        let idx = i / 4;
        out[starts[seg] + idx] = byte;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(regroup(&[]), Vec::<u8>::new());
        assert_eq!(split(&[]), Vec::<u8>::new());
    }

    #[test]
    fn seven_byte_example_from_spec() {
        // Grouped form [0,4,1,5,2,6,3] regroups to [0,1,2,3,4,5,6].
        let grouped = [0u8, 4, 1, 5, 2, 6, 3];
        assert_eq!(regroup(&grouped), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn round_trip_small_lengths() {
        for n in 0..=16usize {
            let data: Vec<u8> = (0..n as u8).collect();
            let grouped = split(&data);
            assert_eq!(regroup(&grouped), data, "length {n} failed to round-trip");
        }
    }

    #[test]
    fn round_trip_across_simd_threshold() {
        for n in 250..=270usize {
            let data: Vec<u8> = (0..n).map(|i| (i % 256) as u8).collect();
            let grouped = split(&data);
            assert_eq!(regroup(&grouped), data, "length {n} failed to round-trip");
        }
    }

    #[test]
    fn segment_lengths_sum_to_total() {
        for n in 0..=300usize {
            let lengths = segment_lengths(n);
            assert_eq!(lengths.iter().sum::<usize>(), n);
        }
    }

    #[test]
    fn single_byte_goes_to_segment_zero() {
        assert_eq!(split(&[0x99]), vec![0x99]);
        assert_eq!(regroup(&[0x99]), vec![0x99]);
    }

    proptest::proptest! {
        #[test]
        fn round_trip_arbitrary_bytes(data in proptest::collection::vec(proptest::prelude::any::<u8>(), 0..600)) {
            let grouped = split(&data);
            proptest::prop_assert_eq!(regroup(&grouped), data);
        }
    }
}
