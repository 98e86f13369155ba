//! MAXP (maximum-value point) chunking.
//!
//! Cuts at the first position whose byte dominates a trailing window (is
//! the max-or-tied) and strictly dominates a leading window (is strictly
//! greater than everything ahead of it). The backward check is a SIMD
//! reduction; the forward check is a SIMD range scan that can short-circuit
//! as soon as a disqualifying byte is found.

use crate::error::ConfigError;
use crate::params::MaxpParams;
use crate::simd::{Op, Simd};

#[derive(Debug, Clone, Copy)]
pub struct Maxp {
    window_size: usize,
    max_block: usize,
    simd: Simd,
}

impl Maxp {
    pub fn new(params: MaxpParams) -> Result<Self, ConfigError> {
        if params.window_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "maxp_window_size",
                reason: "must be greater than zero".into(),
            });
        }
        if params.max_block <= params.window_size {
            return Err(ConfigError::InvalidValue {
                key: "maxp_max_block",
                reason: "must be greater than maxp_window_size".into(),
            });
        }
        params.simd_mode.validate_window(params.window_size)?;
        Ok(Self {
            window_size: params.window_size,
            max_block: params.max_block,
            simd: Simd::new(params.simd_mode),
        })
    }

    pub fn find_cutpoint(&mut self, buf: &[u8], len: usize) -> usize {
        let cap = self.max_block.min(len);
        let mut p = self.window_size;
        while p < cap {
            if p + self.window_size >= len {
                return len;
            }
            let back_max = self.simd.find_max(buf, p - self.window_size, p);
            if buf[p] >= back_max {
                let forward_end = p + self.window_size + 1;
                let first_ge = self.simd.range_scan_first(buf, p + 1, forward_end, buf[p], Op::Geq);
                if first_ge as usize >= forward_end {
                    return p;
                }
            }
            p += 1;
        }
        cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::SimdMode;

    fn maxp(window_size: usize, max_block: usize) -> Maxp {
        Maxp::new(MaxpParams { window_size, max_block, simd_mode: SimdMode::Scalar }).unwrap()
    }

    #[test]
    fn cuts_at_an_isolated_spike() {
        let mut data = vec![1u8; 40];
        data[20] = 200;
        let mut algo = maxp(8, 32);
        let cut = algo.find_cutpoint(&data, data.len());
        assert_eq!(cut, 20);
    }

    #[test]
    fn falls_back_to_max_block_on_flat_input() {
        let data = vec![5u8; 64];
        let mut algo = maxp(8, 32);
        assert_eq!(algo.find_cutpoint(&data, data.len()), 32);
    }

    #[test]
    fn rejects_window_not_smaller_than_max_block() {
        assert!(Maxp::new(MaxpParams { window_size: 32, max_block: 32, simd_mode: SimdMode::Scalar }).is_err());
    }
}
