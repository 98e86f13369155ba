//! AVX-512BW (512-bit) backend.
//!
//! AVX-512 provides direct unsigned byte comparison predicates
//! (`_mm512_cmp_epu8_mask`), unlike SSE2/AVX2 which need the
//! max/min-equality trick. Falls back to scalar when the host CPU lacks
//! `avx512bw`.

use super::{Op, scalar};

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

const LANES: usize = 64;

pub fn find_max(buf: &[u8], start: usize, end: usize) -> u8 {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx512bw") {
            return unsafe { find_max_avx512(buf, start, end) };
        }
    }
    scalar::find_max(buf, start, end)
}

pub fn find_min(buf: &[u8], start: usize, end: usize) -> u8 {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx512bw") {
            return unsafe { find_min_avx512(buf, start, end) };
        }
    }
    scalar::find_min(buf, start, end)
}

pub fn range_scan_first(buf: &[u8], start: usize, end: usize, target: u8, op: Op) -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx512bw") {
            return unsafe { range_scan_first_avx512(buf, start, end, target, op) };
        }
    }
    scalar::range_scan_first(buf, start, end, target, op)
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx512bw")]
unsafe fn find_max_avx512(buf: &[u8], start: usize, end: usize) -> u8 {
    let region = &buf[start..end];
    let mut chunks = region.chunks_exact(LANES);
    let mut acc = match chunks.next() {
        Some(first) => unsafe { _mm512_loadu_si512(first.as_ptr() as *const i32) },
        None => return scalar::find_max(buf, start, end),
    };
    for chunk in chunks {
        let v = unsafe { _mm512_loadu_si512(chunk.as_ptr() as *const i32) };
        acc = unsafe { _mm512_max_epu8(acc, v) };
    }
    let mut lanes = [0u8; LANES];
    unsafe { _mm512_storeu_si512(lanes.as_mut_ptr() as *mut i32, acc) };
    let mut best = lanes.into_iter().max().unwrap();
    for &b in chunks.remainder() {
        best = best.max(b);
    }
    best
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx512bw")]
unsafe fn find_min_avx512(buf: &[u8], start: usize, end: usize) -> u8 {
    let region = &buf[start..end];
    let mut chunks = region.chunks_exact(LANES);
    let mut acc = match chunks.next() {
        Some(first) => unsafe { _mm512_loadu_si512(first.as_ptr() as *const i32) },
        None => return scalar::find_min(buf, start, end),
    };
    for chunk in chunks {
        let v = unsafe { _mm512_loadu_si512(chunk.as_ptr() as *const i32) };
        acc = unsafe { _mm512_min_epu8(acc, v) };
    }
    let mut lanes = [0u8; LANES];
    unsafe { _mm512_storeu_si512(lanes.as_mut_ptr() as *mut i32, acc) };
    let mut best = lanes.into_iter().min().unwrap();
    for &b in chunks.remainder() {
        best = best.min(b);
    }
    best
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx512bw")]
unsafe fn cmp_mask(op: Op, v: __m512i, target: __m512i) -> u64 {
    let predicate = match op {
        Op::Gt => _MM_CMPINT_NLE,
        Op::Geq => _MM_CMPINT_NLT,
        Op::Lt => _MM_CMPINT_LT,
        Op::Leq => _MM_CMPINT_LE,
    };
    unsafe { _mm512_cmp_epu8_mask(v, target, predicate) }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx512bw")]
unsafe fn range_scan_first_avx512(buf: &[u8], start: usize, end: usize, target: u8, op: Op) -> u64 {
    let region = &buf[start..end];
    let chunks = region.chunks_exact(LANES);
    let remainder_start = region.len() - chunks.remainder().len();
    let target_v = unsafe { _mm512_set1_epi8(target as i8) };

    for (i, chunk) in chunks.enumerate() {
        let v = unsafe { _mm512_loadu_si512(chunk.as_ptr() as *const i32) };
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
