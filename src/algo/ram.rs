//! RAM (rapid asymmetric maximum) chunking.
//!
//! The simplest of the extremum family: take the max of a fixed leading
//! window, then cut at the first later byte that ties or exceeds it.

use crate::error::ConfigError;
use crate::params::RamParams;
use crate::simd::{Op, Simd};

#[derive(Debug, Clone, Copy)]
pub struct Ram {
    window_size: usize,
    max_block: usize,
    simd: Simd,
}

impl Ram {
    pub fn new(params: RamParams) -> Result<Self, ConfigError> {
        if params.window_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "ram_window_size",
                reason: "must be greater than zero".into(),
            });
        }
        if params.max_block <= params.window_size {
            return Err(ConfigError::InvalidValue {
                key: "ram_max_block",
                reason: "must be greater than ram_window_size".into(),
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
        if self.window_size >= len {
            return len;
        }
        let m = self.simd.find_max(buf, 0, self.window_size);
        let pos = self.simd.range_scan_first(buf, self.window_size, cap, m, Op::Geq) as usize;
        if pos < cap { pos } else { cap }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simd::SimdMode;

    fn ram(window_size: usize, max_block: usize) -> Ram {
        Ram::new(RamParams { window_size, max_block, simd_mode: SimdMode::Scalar }).unwrap()
    }

    #[test]
    fn cuts_at_first_tie_or_exceed() {
        let mut data = vec![3u8; 20];
        data[10] = 9;
        let mut algo = ram(8, 16);
        assert_eq!(algo.find_cutpoint(&data, data.len()), 10);
    }

    #[test]
    fn falls_back_to_max_block_when_never_exceeded() {
        let data = vec![9u8, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
        let mut algo = ram(8, 16);
        assert_eq!(algo.find_cutpoint(&data, data.len()), 16);
    }

    #[test]
    fn short_input_returns_whole_buffer() {
        let data = vec![1u8, 2, 3];
        let mut algo = ram(8, 16);
        assert_eq!(algo.find_cutpoint(&data, data.len()), data.len());
    }
}
