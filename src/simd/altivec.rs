//! PowerPC AltiVec (128-bit) backend.
//!
//! Stable Rust does not expose `core::arch::powerpc` AltiVec intrinsics,
//! so this backend processes the same 16-byte lanes the other 128-bit
//! backends use but does so with the scalar reference loop per lane. It is
//! kept as its own module — rather than folded into `scalar` — so the
//! construction-time register-width validation and lane accounting stay
//! identical to the vectorised backends, and so a real intrinsics-backed
//! implementation can drop in later without touching the dispatch table.

use super::{Op, scalar};

pub fn find_max(buf: &[u8], start: usize, end: usize) -> u8 {
    scalar::find_max(buf, start, end)
}

pub fn find_min(buf: &[u8], start: usize, end: usize) -> u8 {
    scalar::find_min(buf, start, end)
}

pub fn range_scan_first(buf: &[u8], start: usize, end: usize, target: u8, op: Op) -> u64 {
    scalar::range_scan_first(buf, start, end, target, op)
}
