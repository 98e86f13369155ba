//! CRC32C window chunking.
//!
//! Rather than a single rolling hash, CRC re-hashes a fixed-size trailing
//! window from scratch every `window_step` bytes using the library
//! CRC32C (Castagnoli, reflected) implementation.

use crate::error::ConfigError;
use crate::params::{CrcParams, low_mask};

#[derive(Debug, Clone, Copy)]
pub struct Crc {
    min: usize,
    max: usize,
    window_size: usize,
    window_step: usize,
    mask: u64,
}

impl Crc {
    pub fn new(params: CrcParams) -> Result<Self, ConfigError> {
        crate::params::validate_order("crc", params.min, params.avg, params.max)?;
        if params.window_size == 0 || params.window_step == 0 {
            return Err(ConfigError::InvalidValue {
                key: "crc_window_size/crc_window_step",
                reason: "must be greater than zero".into(),
            });
        }
        if params.hash_bits == 0 || params.hash_bits > 32 {
            return Err(ConfigError::InvalidValue {
                key: "crc_hash_bits",
                reason: "must be in 1..=32".into(),
            });
        }
        Ok(Self {
            min: params.min,
            max: params.max,
            window_size: params.window_size,
            window_step: params.window_step,
            mask: low_mask(params.hash_bits),
        })
    }

    pub fn find_cutpoint(&mut self, buf: &[u8], len: usize) -> usize {
        let cap = self.max.min(len);
        let mut pos = self.min;
        while pos < cap {
            if pos >= self.window_size {
                let digest = crc32c::crc32c(&buf[pos - self.window_size..pos]);
                if (digest as u64) & self.mask == 0 {
                    return pos;
                }
            }
            pos += self.window_step;
        }
        cap
    }
}
