//! Rabin fingerprint chunking.
//!
//! Slides one byte at a time through a [`crate::rabin::RabinState`] and
//! tests the fingerprint against a mask of all-ones (not all-zeros: a
//! constant-zero fingerprint would otherwise pass trivially on a short run
//! of zero bytes). The rolling state is resumable across calls that return
//! without emitting a cut — it is only reset once a cut is actually
//! returned, since the driver only rewinds the buffer offset at that point.

use crate::error::ConfigError;
use crate::params::{RabinParams, low_mask};
use crate::rabin::RabinState;

#[derive(Debug, Clone)]
pub struct Rabin {
    min_block: usize,
    max_block: usize,
    mask: u64,
    state: RabinState,
    processed: usize,
}

impl Rabin {
    pub fn new(params: RabinParams) -> Result<Self, ConfigError> {
        crate::params::validate_order("rabins", params.min_block, params.avg_block, params.max_block)?;
        if params.window_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "rabin_window_size",
                reason: "must be greater than zero".into(),
            });
        }
        let bits = params.avg_block.max(2).ilog2();
        Ok(Self {
            min_block: params.min_block,
            max_block: params.max_block,
            mask: low_mask(bits),
            state: RabinState::new(params.window_size),
            processed: 0,
        })
    }

    pub fn find_cutpoint(&mut self, buf: &[u8], len: usize) -> usize {
        let cap = self.max_block.min(len);
        for pos in self.processed..cap {
            self.state.slide(buf[pos]);
            let count = pos + 1;
            if count >= self.min_block {
                let matched = count == self.max_block || (self.state.digest() & self.mask) == self.mask;
                if matched {
                    self.reset();
                    return count;
                }
            }
        }
        self.processed = cap;
        cap
    }

    /// Clears the rolling fingerprint and the resumability cursor. Called
    /// both when an in-progress cut is emitted and, by the driver, between
    /// independent streams sharing this algorithm instance.
    pub fn reset(&mut self) {
        self.state.reset();
        self.processed = 0;
    }
}
