//! SSE2 (128-bit) backend.
//!
//! SSE2 is part of the x86-64 baseline, so no runtime feature check is
//! needed on that architecture; elsewhere we fall back to [`super::scalar`],
//! which is always byte-for-byte equivalent by definition.

use super::{Op, scalar};

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

const LANES: usize = 16;

pub fn find_max(buf: &[u8], start: usize, end: usize) -> u8 {
    #[cfg(target_arch = "x86_64")]
    {
        return unsafe { find_max_sse(buf, start, end) };
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        scalar::find_max(buf, start, end)
    }
}

pub fn find_min(buf: &[u8], start: usize, end: usize) -> u8 {
    #[cfg(target_arch = "x86_64")]
    {
        return unsafe { find_min_sse(buf, start, end) };
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        scalar::find_min(buf, start, end)
    }
}

pub fn range_scan_first(buf: &[u8], start: usize, end: usize, target: u8, op: Op) -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        return unsafe { range_scan_first_sse(buf, start, end, target, op) };
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        scalar::range_scan_first(buf, start, end, target, op)
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
unsafe fn find_max_sse(buf: &[u8], start: usize, end: usize) -> u8 {
    let region = &buf[start..end];
    let mut chunks = region.chunks_exact(LANES);
    let mut acc = match chunks.next() {
        Some(first) => unsafe { _mm_loadu_si128(first.as_ptr() as *const __m128i) },
        None => return scalar::find_max(buf, start, end),
    };
    for chunk in chunks {
        let v = unsafe { _mm_loadu_si128(chunk.as_ptr() as *const __m128i) };
        acc = unsafe { _mm_max_epu8(acc, v) };
    }
    let mut lanes = [0u8; LANES];
    unsafe { _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, acc) };
    let mut best = lanes.into_iter().max().unwrap();
    for &b in chunks.remainder() {
        best = best.max(b);
    }
    best
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
unsafe fn find_min_sse(buf: &[u8], start: usize, end: usize) -> u8 {
    let region = &buf[start..end];
    let mut chunks = region.chunks_exact(LANES);
    let mut acc = match chunks.next() {
        Some(first) => unsafe { _mm_loadu_si128(first.as_ptr() as *const __m128i) },
        None => return scalar::find_min(buf, start, end),
    };
    for chunk in chunks {
        let v = unsafe { _mm_loadu_si128(chunk.as_ptr() as *const __m128i) };
        acc = unsafe { _mm_min_epu8(acc, v) };
    }
    let mut lanes = [0u8; LANES];
    unsafe { _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, acc) };
    let mut best = lanes.into_iter().min().unwrap();
    for &b in chunks.remainder() {
        best = best.min(b);
    }
    best
}

/// Unsigned byte comparison helpers; SSE2 only exposes signed `pcmpgtb`,
/// so unsigned ordering is derived from `_mm_max_epu8`/`_mm_min_epu8`.
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
unsafe fn cmp_mask(op: Op, v: __m128i, target: __m128i) -> i32 {
    let result = unsafe {
        match op {
            Op::Geq => _mm_cmpeq_epi8(_mm_max_epu8(v, target), v),
            Op::Leq => _mm_cmpeq_epi8(_mm_min_epu8(v, target), v),
            Op::Gt => {
                let leq = _mm_cmpeq_epi8(_mm_min_epu8(v, target), v);
                _mm_andnot_si128(leq, _mm_set1_epi8(-1))
            }
            Op::Lt => {
                let geq = _mm_cmpeq_epi8(_mm_max_epu8(v, target), v);
                _mm_andnot_si128(geq, _mm_set1_epi8(-1))
            }
        }
    };
    unsafe { _mm_movemask_epi8(result) }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2")]
unsafe fn range_scan_first_sse(buf: &[u8], start: usize, end: usize, target: u8, op: Op) -> u64 {
    let region = &buf[start..end];
    let chunks = region.chunks_exact(LANES);
    let remainder_start = region.len() - chunks.remainder().len();
    let target_v = unsafe { _mm_set1_epi8(target as i8) };

    for (i, chunk) in chunks.enumerate() {
        let v = unsafe { _mm_loadu_si128(chunk.as_ptr() as *const __m128i) };
        let mask = unsafe { cmp_mask(op, v, target_v) };
        if mask != 0 {
            let lane = mask.trailing_zeros() as usize;
            return (start + i * LANES + lane) as u64;
        }
    }
    for (i, &b) in region[remainder_start..].iter().enumerate() {
        if op.apply(b, target) {
            return (start + remainder_start + i) as u64;
        }
    }
    end as u64
}
