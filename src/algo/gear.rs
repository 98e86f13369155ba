//! Gear rolling-hash chunking.
//!
//! `h := (h << 1) + GEAR[byte]` accumulated from the start of the buffer;
//! bytes before `min_block` still roll the hash but are never tested so
//! the hash is warm once testing begins.

use crate::error::ConfigError;
use crate::gear::GEAR;
use crate::params::{GearParams, high_mask};

#[derive(Debug, Clone, Copy)]
pub struct Gear {
    min_block: usize,
    max_block: usize,
    mask: u64,
}

impl Gear {
    pub fn new(params: GearParams) -> Result<Self, ConfigError> {
        crate::params::validate_order("gear", params.min_block, params.avg_block, params.max_block)?;
        let bits = crate::params::ceil_log2(params.avg_block);
        Ok(Self {
            min_block: params.min_block,
            max_block: params.max_block,
            mask: high_mask(bits),
        })
    }

    pub fn find_cutpoint(&mut self, buf: &[u8], len: usize) -> usize {
        let cap = self.max_block.min(len);
        let mut h: u64 = 0;
        for pos in 0..cap {
            h = h.wrapping_shl(1).wrapping_add(GEAR[buf[pos] as usize]);
            let count = pos + 1;
            if count > self.min_block && h & self.mask == 0 {
                return count;
            }
        }
        cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gear(min_block: usize, avg_block: usize, max_block: usize) -> Gear {
        Gear::new(GearParams { min_block, avg_block, max_block }).unwrap()
    }

    #[test]
    fn never_cuts_before_min_block() {
        let mut algo = gear(16, 64, 4096);
        let data = vec![0x42u8; 4096];
        let cut = algo.find_cutpoint(&data, data.len());
        assert!(cut > 16 || cut == 4096);
    }

    #[test]
    fn respects_max_block_bound() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let mut algo = gear(64, 256, 1024);
        let mut offset = 0;
        while offset < data.len() {
            let cut = algo.find_cutpoint(&data[offset..], data.len() - offset);
            assert!(cut <= 1024);
            assert!(cut > 0);
            offset += cut;
        }
    }

    #[test]
    fn rejects_out_of_order_bounds() {
        assert!(Gear::new(GearParams { min_block: 64, avg_block: 32, max_block: 1024 }).is_err());
    }
}
