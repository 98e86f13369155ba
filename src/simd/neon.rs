//! ARM NEON (128-bit) backend.
//!
//! NEON exposes direct unsigned byte comparisons (`vcgeq_u8` and friends),
//! unlike SSE2, so no max/min-equality trick is needed. `vmaxvq_u8`/
//! `vminvq_u8` reduce a register to a single lane in one instruction.

use super::{Op, scalar};

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

const LANES: usize = 16;

pub fn find_max(buf: &[u8], start: usize, end: usize) -> u8 {
    #[cfg(target_arch = "aarch64")]
    {
        return unsafe { find_max_neon(buf, start, end) };
    }
    #[cfg(not(target_arch = "aarch64"))]
    {
        scalar::find_max(buf, start, end)
    }
}

pub fn find_min(buf: &[u8], start: usize, end: usize) -> u8 {
    #[cfg(target_arch = "aarch64")]
    {
        return unsafe { find_min_neon(buf, start, end) };
    }
    #[cfg(not(target_arch = "aarch64"))]
    {
        scalar::find_min(buf, start, end)
    }
}

pub fn range_scan_first(buf: &[u8], start: usize, end: usize, target: u8, op: Op) -> u64 {
    #[cfg(target_arch = "aarch64")]
    {
        return unsafe { range_scan_first_neon(buf, start, end, target, op) };
    }
    #[cfg(not(target_arch = "aarch64"))]
    {
        scalar::range_scan_first(buf, start, end, target, op)
    }
}

#[cfg(target_arch = "aarch64")]
unsafe fn find_max_neon(buf: &[u8], start: usize, end: usize) -> u8 {
    let region = &buf[start..end];
    let mut chunks = region.chunks_exact(LANES);
    let mut acc = match chunks.next() {
        Some(first) => unsafe { vld1q_u8(first.as_ptr()) },
        None => return scalar::find_max(buf, start, end),
    };
    for chunk in chunks {
        let v = unsafe { vld1q_u8(chunk.as_ptr()) };
        acc = unsafe { vmaxq_u8(acc, v) };
    }
    let mut best = unsafe { vmaxvq_u8(acc) };
    for &b in chunks.remainder() {
        best = best.max(b);
    }
    best
}

#[cfg(target_arch = "aarch64")]
unsafe fn find_min_neon(buf: &[u8], start: usize, end: usize) -> u8 {
    let region = &buf[start..end];
    let mut chunks = region.chunks_exact(LANES);
    let mut acc = match chunks.next() {
        Some(first) => unsafe { vld1q_u8(first.as_ptr()) },
        None => return scalar::find_min(buf, start, end),
    };
    for chunk in chunks {
        let v = unsafe { vld1q_u8(chunk.as_ptr()) };
        acc = unsafe { vminq_u8(acc, v) };
    }
    let mut best = unsafe { vminvq_u8(acc) };
    for &b in chunks.remainder() {
        best = best.min(b);
    }
    best
}

#[cfg(target_arch = "aarch64")]
unsafe fn cmp_mask(op: Op, v: uint8x16_t, target: uint8x16_t) -> uint8x16_t {
    unsafe {
        match op {
            Op::Gt => vcgtq_u8(v, target),
            Op::Geq => vcgeq_u8(v, target),
            Op::Lt => vcltq_u8(v, target),
            Op::Leq => vcleq_u8(v, target),
        }
    }
}

#[cfg(target_arch = "aarch64")]
unsafe fn range_scan_first_neon(buf: &[u8], start: usize, end: usize, target: u8, op: Op) -> u64 {
    let region = &buf[start..end];
    let chunks = region.chunks_exact(LANES);
    let remainder_start = region.len() - chunks.remainder().len();
    let target_v = unsafe { vdupq_n_u8(target) };

    for (i, chunk) in chunks.enumerate() {
        let v = unsafe { vld1q_u8(chunk.as_ptr()) };
        let mask = unsafe { cmp_mask(op, v, target_v) };
        let mut lanes = [0u8; LANES];
        unsafe { vst1q_u8(lanes.as_mut_ptr(), mask) };
        if let Some(lane) = lanes.iter().position(|&m| m != 0) {
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
