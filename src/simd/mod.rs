//! Vectorised scan primitives shared by the extremum-seeking algorithms
//! (AE, MAXP, RAM).
//!
//! Each [`SimdMode`] picks a register width and a concrete backend at
//! algorithm construction time; there is no per-call branching in the hot
//! path afterward. [`scalar`] is the reference implementation every other
//! backend is tested against byte-for-byte (see `tests/properties.rs`).

pub mod altivec;
pub mod avx256;
pub mod avx512;
pub mod neon;
pub mod scalar;
pub mod sse128;

use crate::error::ConfigError;

/// Comparison predicate used by [`Simd::range_scan_first`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Gt,
    Geq,
    Lt,
    Leq,
}

impl Op {
    #[inline]
    pub fn apply(self, byte: u8, target: u8) -> bool {
        match self {
            Op::Gt => byte > target,
            Op::Geq => byte >= target,
            Op::Lt => byte < target,
            Op::Leq => byte <= target,
        }
    }
}

/// The SIMD backend selected for an algorithm instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimdMode {
    Scalar,
    Sse128,
    Avx256,
    Avx512,
    Neon,
    Altivec,
}

impl SimdMode {
    /// Register byte width enforced on window sizes passed to this mode.
    /// `Scalar` has no register and therefore no width constraint.
    pub fn register_width(self) -> Option<usize> {
        match self {
            SimdMode::Scalar => None,
            SimdMode::Sse128 => Some(16),
            SimdMode::Avx256 => Some(32),
            SimdMode::Avx512 => Some(64),
            SimdMode::Neon => Some(16),
            SimdMode::Altivec => Some(16),
        }
    }

    /// Validates that `window` is a positive even multiple of this mode's
    /// register byte width. Construction-time check per spec: impossible
    /// states (odd or sub-register windows) are rejected before the hot
    /// path, not discovered mid-scan.
    pub fn validate_window(self, window: usize) -> Result<(), ConfigError> {
        let Some(register) = self.register_width() else {
            return Ok(());
        };
        let valid = window > 0 && window % 2 == 0 && window % register == 0;
        if valid {
            Ok(())
        } else {
            Err(ConfigError::IncompatibleSimdWindow { window, register })
        }
    }
}

/// A dispatched scan engine, cached on the owning algorithm instance.
#[derive(Debug, Clone, Copy)]
pub struct Simd {
    mode: SimdMode,
}

impl Simd {
    pub fn new(mode: SimdMode) -> Self {
        Self { mode }
    }

    pub fn mode(self) -> SimdMode {
        self.mode
    }

    /// Largest byte value in `buf[start..end)`.
    ///
    /// # Panics
    /// Panics if `start >= end` or the range is out of bounds.
    #[inline]
    pub fn find_max(self, buf: &[u8], start: usize, end: usize) -> u8 {
        match self.mode {
            SimdMode::Scalar => scalar::find_max(buf, start, end),
            SimdMode::Sse128 => sse128::find_max(buf, start, end),
            SimdMode::Avx256 => avx256::find_max(buf, start, end),
            SimdMode::Avx512 => avx512::find_max(buf, start, end),
            SimdMode::Neon => neon::find_max(buf, start, end),
            SimdMode::Altivec => altivec::find_max(buf, start, end),
        }
    }

    /// Smallest byte value in `buf[start..end)`.
    #[inline]
    pub fn find_min(self, buf: &[u8], start: usize, end: usize) -> u8 {
        match self.mode {
            SimdMode::Scalar => scalar::find_min(buf, start, end),
            SimdMode::Sse128 => sse128::find_min(buf, start, end),
            SimdMode::Avx256 => avx256::find_min(buf, start, end),
            SimdMode::Avx512 => avx512::find_min(buf, start, end),
            SimdMode::Neon => neon::find_min(buf, start, end),
            SimdMode::Altivec => altivec::find_min(buf, start, end),
        }
    }

    /// Position of the first byte in `buf[start..end)` satisfying
    /// `byte op target`, scanning in strictly increasing position order.
    /// Returns `end` if no byte matches.
    #[inline]
    pub fn range_scan_first(self, buf: &[u8], start: usize, end: usize, target: u8, op: Op) -> u64 {
        match self.mode {
            SimdMode::Scalar => scalar::range_scan_first(buf, start, end, target, op),
            SimdMode::Sse128 => sse128::range_scan_first(buf, start, end, target, op),
            SimdMode::Avx256 => avx256::range_scan_first(buf, start, end, target, op),
            SimdMode::Avx512 => avx512::range_scan_first(buf, start, end, target, op),
            SimdMode::Neon => neon::range_scan_first(buf, start, end, target, op),
            SimdMode::Altivec => altivec::range_scan_first(buf, start, end, target, op),
        }
    }
}
