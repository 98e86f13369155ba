//! Immutable algorithm parameter bundles.
//!
//! One variant per recognised `chunking_algo` value. Parameters are
//! validated and any derived values (masks, SIMD window checks) are
//! computed once when the bundle is turned into an [`crate::algo::Algorithm`];
//! nothing here mutates for the lifetime of a run.

use crate::error::ConfigError;
use crate::simd::SimdMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AeMode {
    Max,
    Min,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqMode {
    Increasing,
    Decreasing,
}

#[derive(Debug, Clone, Copy)]
pub struct FixedParams {
    pub fixed_size: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct AeParams {
    pub window_size: usize,
    pub mode: AeMode,
    pub simd_mode: SimdMode,
}

#[derive(Debug, Clone, Copy)]
pub struct MaxpParams {
    pub window_size: usize,
    pub max_block: usize,
    pub simd_mode: SimdMode,
}

#[derive(Debug, Clone, Copy)]
pub struct RamParams {
    pub window_size: usize,
    pub max_block: usize,
    pub simd_mode: SimdMode,
}

#[derive(Debug, Clone, Copy)]
pub struct GearParams {
    pub min_block: usize,
    pub avg_block: usize,
    pub max_block: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct FastCdcParams {
    pub min_block: usize,
    pub avg_block: usize,
    pub max_block: usize,
    pub norm_level: u8,
}

#[derive(Debug, Clone, Copy)]
pub struct RabinParams {
    pub window_size: usize,
    pub min_block: usize,
    pub avg_block: usize,
    pub max_block: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct TttdParams {
    pub min: usize,
    pub avg: usize,
    pub max: usize,
    pub window_size: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct SeqParams {
    pub length_threshold: usize,
    pub jump_trigger: usize,
    pub jump_size: usize,
    pub mode: SeqMode,
    pub min: usize,
    pub max: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct CrcParams {
    pub min: usize,
    pub avg: usize,
    pub max: usize,
    pub window_size: usize,
    pub window_step: usize,
    pub hash_bits: u32,
}

/// Parameter bundle for one of the ten recognised chunking algorithms.
#[derive(Debug, Clone, Copy)]
pub enum AlgoParams {
    Fixed(FixedParams),
    Ae(AeParams),
    Maxp(MaxpParams),
    Ram(RamParams),
    Gear(GearParams),
    FastCdc(FastCdcParams),
    Rabin(RabinParams),
    Tttd(TttdParams),
    Seq(SeqParams),
    Crc(CrcParams),
}

impl AlgoParams {
    pub fn name(&self) -> &'static str {
        match self {
            AlgoParams::Fixed(_) => "fixed",
            AlgoParams::Ae(_) => "ae",
            AlgoParams::Maxp(_) => "maxp",
            AlgoParams::Ram(_) => "ram",
            AlgoParams::Gear(_) => "gear",
            AlgoParams::FastCdc(_) => "fastcdc",
            AlgoParams::Rabin(_) => "rabins",
            AlgoParams::Tttd(_) => "tttd",
            AlgoParams::Seq(_) => "seq",
            AlgoParams::Crc(_) => "crc",
        }
    }
}

/// `ceil(log2(n))` for `n >= 1`, used to size mask popcounts from an
/// average chunk size.
pub fn ceil_log2(n: usize) -> u32 {
    debug_assert!(n >= 1);
    if n <= 1 {
        0
    } else {
        (usize::BITS - (n - 1).leading_zeros()) as u32
    }
}

/// `round(log2(n))`, used by FastCDC to pick its central bit count `b`.
pub fn round_log2(n: usize) -> u32 {
    debug_assert!(n >= 1);
    let lo = n.ilog2();
    let hi = lo + 1;
    if n as f64 - 2f64.powi(lo as i32) < 2f64.powi(hi as i32) - n as f64 {
        lo
    } else {
        hi
    }
}

/// A contiguous run of `bits` set bits placed at the top of a 64-bit word.
pub fn high_mask(bits: u32) -> u64 {
    if bits == 0 {
        0
    } else {
        u64::MAX << (64 - bits)
    }
}

/// A contiguous run of `bits` set bits starting from bit 0, i.e. `(1 << bits) - 1`.
pub fn low_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Checks `min < avg < max`, the ordering every bounded algorithm requires
/// of its three size parameters.
pub fn validate_order(algorithm: &'static str, min: usize, avg: usize, max: usize) -> Result<(), ConfigError> {
    if min < avg && avg < max {
        Ok(())
    } else {
        Err(ConfigError::OutOfOrderBounds(algorithm, min, avg, max))
    }
}
