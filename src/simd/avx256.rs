//! AVX2 (256-bit) backend.
//!
//! Unlike SSE2, AVX2 is not guaranteed present on every x86-64 CPU, so
//! availability is checked at runtime and the scalar path is used as a
//! fallback when the feature is absent. The fallback is still byte-for-byte
//! identical to every other backend, it is just not vectorised on that host.

use super::{Op, scalar};

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

const LANES: usize = 32;

pub fn find_max(buf: &[u8], start: usize, end: usize) -> u8 {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            return unsafe { find_max_avx(buf, start, end) };
        }
    }
    scalar::find_max(buf, start, end)
}

pub fn find_min(buf: &[u8], start: usize, end: usize) -> u8 {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            return unsafe { find_min_avx(buf, start, end) };
        }
    }
    scalar::find_min(buf, start, end)
}

pub fn range_scan_first(buf: &[u8], start: usize, end: usize, target: u8, op: Op) -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx2") {
            return unsafe { range_scan_first_avx(buf, start, end, target, op) };
        }
    }
    scalar::range_scan_first(buf, start, end, target, op)
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn find_max_avx(buf: &[u8], start: usize, end: usize) -> u8 {
    let region = &buf[start..end];
    let mut chunks = region.chunks_exact(LANES);
    let mut acc = match chunks.next() {
        Some(first) => unsafe { _mm256_loadu_si256(first.as_ptr() as *const __m256i) },
        None => return scalar::find_max(buf, start, end),
    };
    for chunk in chunks {
        let v = unsafe { _mm256_loadu_si256(chunk.as_ptr() as *const __m256i) };
        acc = unsafe { _mm256_max_epu8(acc, v) };
    }
    let mut lanes = [0u8; LANES];
    unsafe { _mm256_storeu_si256(lanes.as_mut_ptr() as *mut __m256i, acc) };
    let mut best = lanes.into_iter().max().unwrap();
    for &b in chunks.remainder() {
        best = best.max(b);
    }
    best
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn find_min_avx(buf: &[u8], start: usize, end: usize) -> u8 {
    let region = &buf[start..end];
    let mut chunks = region.chunks_exact(LANES);
    let mut acc = match chunks.next() {
        Some(first) => unsafe { _mm256_loadu_si256(first.as_ptr() as *const __m256i) },
        None => return scalar::find_min(buf, start, end),
    };
    for chunk in chunks {
        let v = unsafe { _mm256_loadu_si256(chunk.as_ptr() as *const __m256i) };
        acc = unsafe { _mm256_min_epu8(acc, v) };
    }
    let mut lanes = [0u8; LANES];
    unsafe { _mm256_storeu_si256(lanes.as_mut_ptr() as *mut __m256i, acc) };
    let mut best = lanes.into_iter().min().unwrap();
    for &b in chunks.remainder() {
        best = best.min(b);
    }
    best
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn cmp_mask(op: Op, v: __m256i, target: __m256i) -> i32 {
    unsafe {
        match op {
            Op::Geq => _mm256_movemask_epi8(_mm256_cmpeq_epi8(_mm256_max_epu8(v, target), v)),
            Op::Leq => _mm256_movemask_epi8(_mm256_cmpeq_epi8(_mm256_min_epu8(v, target), v)),
            Op::Gt => {
                let leq = _mm256_cmpeq_epi8(_mm256_min_epu8(v, target), v);
                _mm256_movemask_epi8(_mm256_andnot_si256(leq, _mm256_set1_epi8(-1)))
            }
            Op::Lt => {
                let geq = _mm256_cmpeq_epi8(_mm256_max_epu8(v, target), v);
                _mm256_movemask_epi8(_mm256_andnot_si256(geq, _mm256_set1_epi8(-1)))
            }
        }
    }
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2")]
unsafe fn range_scan_first_avx(buf: &[u8], start: usize, end: usize, target: u8, op: Op) -> u64 {
    let region = &buf[start..end];
    let chunks = region.chunks_exact(LANES);
    let remainder_start = region.len() - chunks.remainder().len();
    let target_v = unsafe { _mm256_set1_epi8(target as i8) };

    for (i, chunk) in chunks.enumerate() {
        let v = unsafe { _mm256_loadu_si256(chunk.as_ptr() as *const __m256i) };
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
