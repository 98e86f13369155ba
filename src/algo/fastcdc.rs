//! FastCDC: two-phase normalized Gear chunking.
//!
//! Tightens the chunk-size distribution around `avg_block` by testing a
//! looser mask before `avg_block` and a stricter one after, rather than a
//! single mask across the whole range.

use crate::error::ConfigError;
use crate::gear::GEAR;
use crate::params::{FastCdcParams, low_mask, round_log2, validate_order};

#[derive(Debug, Clone, Copy)]
pub struct FastCdc {
    min_block: usize,
    avg_block: usize,
    max_block: usize,
    small_mask: u64,
    large_mask: u64,
}

impl FastCdc {
    pub fn new(params: FastCdcParams) -> Result<Self, ConfigError> {
        validate_order("fastcdc", params.min_block, params.avg_block, params.max_block)?;
        if params.norm_level > 3 {
            return Err(ConfigError::InvalidValue {
                key: "fastcdc_norm_level",
                reason: "must be in 0..=3".into(),
            });
        }
        let b = round_log2(params.avg_block) as i32;
        let l = params.norm_level as i32;
        let small_bits = (b + l).max(0) as u32;
        let large_bits = (b - l).max(0) as u32;
        Ok(Self {
            min_block: params.min_block,
            avg_block: params.avg_block,
            max_block: params.max_block,
            small_mask: low_mask(small_bits),
            large_mask: low_mask(large_bits),
        })
    }

    pub fn find_cutpoint(&mut self, buf: &[u8], len: usize) -> usize {
        let cap = self.max_block.min(len);
        let mut h: u64 = 0;
        for pos in 0..cap {
            h = h.wrapping_shl(1).wrapping_add(GEAR[buf[pos] as usize]);
            let count = pos + 1;
            if count <= self.min_block {
                continue;
            }
            let mask = if count < self.avg_block { self.small_mask } else { self.large_mask };
            if h & mask == 0 {
                return count;
            }
        }
        cap
    }
}
