//! TTTD (two-threshold two-divisor) chunking.
//!
//! Runs a single Rabin rolling state against two masks at once: a primary
//! mask sized from the average, and a coarser backup mask sized from half
//! the average. The backup mask fires more often and its last matching
//! position is kept as a fallback if the primary mask never fires before
//! `max_block`.

use crate::error::ConfigError;
use crate::params::{TttdParams, low_mask, validate_order};
use crate::rabin::RabinState;

#[derive(Debug, Clone)]
pub struct Tttd {
    min: usize,
    max: usize,
    primary_mask: u64,
    backup_mask: u64,
    state: RabinState,
    processed: usize,
    last_backup: Option<usize>,
}

impl Tttd {
    pub fn new(params: TttdParams) -> Result<Self, ConfigError> {
        validate_order("tttd", params.min, params.avg, params.max)?;
        if params.window_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "tttd_window_size",
                reason: "must be greater than zero".into(),
            });
        }
        let primary_bits = params.avg.max(2).ilog2();
        let backup_bits = (params.avg / 2).max(2).ilog2();
        Ok(Self {
            min: params.min,
            max: params.max,
            primary_mask: low_mask(primary_bits),
            backup_mask: low_mask(backup_bits),
            state: RabinState::new(params.window_size),
            processed: 0,
            last_backup: None,
        })
    }

    /// Clears the rolling fingerprint, the resumability cursor, and any
    /// recorded backup cut. Called both when an in-progress cut is emitted
    /// and, by the driver, between independent streams sharing this
    /// algorithm instance.
    pub fn reset(&mut self) {
        self.state.reset();
        self.processed = 0;
        self.last_backup = None;
    }

    pub fn find_cutpoint(&mut self, buf: &[u8], len: usize) -> usize {
        let cap = self.max.min(len);
        for pos in self.processed..cap {
            self.state.slide(buf[pos]);
            let count = pos + 1;
            if count < self.min {
                continue;
            }
            if count >= self.max {
                // max_block reached without a primary match: fall back to
                // the last recorded backup cut, or force max_block itself.
                let result = self.last_backup.unwrap_or(count);
                self.reset();
                return result;
            }
            let digest = self.state.digest();
            if digest & self.primary_mask == self.primary_mask {
                self.reset();
                return count;
            }
            if digest & self.backup_mask == self.backup_mask {
                self.last_backup = Some(count);
            }
        }
        self.processed = cap;
        cap
    }
}
