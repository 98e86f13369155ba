//! Seq: opposing-slope chunking.
//!
//! Counts a run of consecutive steps in the configured direction and an
//! opposing counter for steps against it; equal-valued steps are absorbed
//! into neither. A long opposing run triggers a forward jump rather than
//! cutting, to skip low-entropy regions cheaply.

use crate::error::ConfigError;
use crate::params::{SeqMode, SeqParams};

#[derive(Debug, Clone, Copy)]
pub struct Seq {
    length_threshold: usize,
    jump_trigger: usize,
    jump_size: usize,
    mode: SeqMode,
    min: usize,
    max: usize,
}

impl Seq {
    pub fn new(params: SeqParams) -> Result<Self, ConfigError> {
        if params.min >= params.max {
            return Err(ConfigError::OutOfOrderBounds("seq", params.min, params.min, params.max));
        }
        if params.length_threshold == 0 || params.jump_trigger == 0 || params.jump_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "seq_length_threshold/seq_jump_trigger/seq_jump_size",
                reason: "must all be greater than zero".into(),
            });
        }
        Ok(Self {
            length_threshold: params.length_threshold,
            jump_trigger: params.jump_trigger,
            jump_size: params.jump_size,
            mode: params.mode,
            min: params.min,
            max: params.max,
        })
    }

    pub fn find_cutpoint(&mut self, buf: &[u8], len: usize) -> usize {
        let cap = self.max.min(len);
        if self.min >= cap {
            return cap;
        }
        let mut pos = self.min;
        let mut run = 0usize;
        let mut opposing = 0usize;
        while pos + 1 < cap {
            let rising = buf[pos + 1] > buf[pos];
            let falling = buf[pos + 1] < buf[pos];
            let (is_run, is_opposing) = match self.mode {
                SeqMode::Increasing => (rising, falling),
                SeqMode::Decreasing => (falling, rising),
            };
            pos += 1;
            if is_run {
                run += 1;
                if run >= self.length_threshold {
                    return pos;
                }
            } else if is_opposing {
                opposing += 1;
                if opposing >= self.jump_trigger {
                    pos = (pos + self.jump_size).min(cap - 1);
                    opposing = 0;
                }
            }
        }
        cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(length_threshold: usize, jump_trigger: usize, jump_size: usize, mode: SeqMode, min: usize, max: usize) -> Seq {
        Seq::new(SeqParams { length_threshold, jump_trigger, jump_size, mode, min, max }).unwrap()
    }

    #[test]
    fn increasing_run_triggers_a_cut() {
        let mut data = vec![5u8; 20];
        for (i, b) in data.iter_mut().enumerate().skip(10) {
            *b = (i - 9) as u8;
        }
        let mut algo = seq(4, 100, 8, SeqMode::Increasing, 8, 64);
        let cut = algo.find_cutpoint(&data, data.len());
        assert!(cut > 10 && cut <= data.len());
    }

    #[test]
    fn falls_back_to_max_block_on_flat_input() {
        let data = vec![5u8; 64];
        let mut algo = seq(4, 100, 8, SeqMode::Increasing, 8, 32);
        assert_eq!(algo.find_cutpoint(&data, data.len()), 32);
    }

    #[test]
    fn equal_steps_are_absorbed_identically_in_both_modes() {
        let data = vec![5u8; 64];
        let mut inc = seq(2, 2, 4, SeqMode::Increasing, 4, 48);
        let mut dec = seq(2, 2, 4, SeqMode::Decreasing, 4, 48);
        assert_eq!(inc.find_cutpoint(&data, data.len()), dec.find_cutpoint(&data, data.len()));
    }
}
