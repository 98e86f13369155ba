//! The cut-point algorithm registry.
//!
//! [`Algorithm`] is a tagged union over the ten recognised chunking
//! algorithms. It is the sole type the streaming driver talks to: one
//! constructor that validates a parameter bundle, one method that returns
//! the next cut offset. Adding an eleventh algorithm means adding a
//! variant here and a module below it, nothing else in the driver changes.

pub mod ae;
pub mod crc;
pub mod fastcdc;
pub mod fixed;
pub mod gear;
pub mod maxp;
pub mod ram;
pub mod rabin;
pub mod seq;
pub mod tttd;

use crate::error::ConfigError;
use crate::params::AlgoParams;

#[derive(Debug, Clone)]
pub enum Algorithm {
    Fixed(fixed::Fixed),
    Ae(ae::Ae),
    Maxp(maxp::Maxp),
    Ram(ram::Ram),
    Gear(gear::Gear),
    FastCdc(fastcdc::FastCdc),
    Rabin(rabin::Rabin),
    Tttd(tttd::Tttd),
    Seq(seq::Seq),
    Crc(crc::Crc),
}

impl Algorithm {
    pub fn new(params: AlgoParams) -> Result<Self, ConfigError> {
        Ok(match params {
            AlgoParams::Fixed(p) => Algorithm::Fixed(fixed::Fixed::new(p)?),
            AlgoParams::Ae(p) => Algorithm::Ae(ae::Ae::new(p)?),
            AlgoParams::Maxp(p) => Algorithm::Maxp(maxp::Maxp::new(p)?),
            AlgoParams::Ram(p) => Algorithm::Ram(ram::Ram::new(p)?),
            AlgoParams::Gear(p) => Algorithm::Gear(gear::Gear::new(p)?),
            AlgoParams::FastCdc(p) => Algorithm::FastCdc(fastcdc::FastCdc::new(p)?),
            AlgoParams::Rabin(p) => Algorithm::Rabin(rabin::Rabin::new(p)?),
            AlgoParams::Tttd(p) => Algorithm::Tttd(tttd::Tttd::new(p)?),
            AlgoParams::Seq(p) => Algorithm::Seq(seq::Seq::new(p)?),
            AlgoParams::Crc(p) => Algorithm::Crc(crc::Crc::new(p)?),
        })
    }

    /// Name of the underlying algorithm, for diagnostics and invariant
    /// violation messages.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fixed(_) => "fixed",
            Algorithm::Ae(_) => "ae",
            Algorithm::Maxp(_) => "maxp",
            Algorithm::Ram(_) => "ram",
            Algorithm::Gear(_) => "gear",
            Algorithm::FastCdc(_) => "fastcdc",
            Algorithm::Rabin(_) => "rabins",
            Algorithm::Tttd(_) => "tttd",
            Algorithm::Seq(_) => "seq",
            Algorithm::Crc(_) => "crc",
        }
    }

    /// Returns the next cut offset `c` with `0 < c <= len`.
    pub fn find_cutpoint(&mut self, buf: &[u8], len: usize) -> usize {
        debug_assert!(len > 0);
        let cut = match self {
            Algorithm::Fixed(a) => a.find_cutpoint(buf, len),
            Algorithm::Ae(a) => a.find_cutpoint(buf, len),
            Algorithm::Maxp(a) => a.find_cutpoint(buf, len),
            Algorithm::Ram(a) => a.find_cutpoint(buf, len),
            Algorithm::Gear(a) => a.find_cutpoint(buf, len),
            Algorithm::FastCdc(a) => a.find_cutpoint(buf, len),
            Algorithm::Rabin(a) => a.find_cutpoint(buf, len),
            Algorithm::Tttd(a) => a.find_cutpoint(buf, len),
            Algorithm::Seq(a) => a.find_cutpoint(buf, len),
            Algorithm::Crc(a) => a.find_cutpoint(buf, len),
        };
        debug_assert!(cut > 0 && cut <= len, "{} returned an out-of-range cut {} for len {}", self.name(), cut, len);
        cut
    }

    /// Clears any rolling state carried across `find_cutpoint` calls.
    /// A no-op for every stateless-per-call algorithm; Rabin and TTTD own
    /// a resumable fingerprint that must not leak between independent
    /// streams driven by the same algorithm instance.
    pub fn reset_stream(&mut self) {
        match self {
            Algorithm::Rabin(a) => a.reset(),
            Algorithm::Tttd(a) => a.reset(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{AeMode, AeParams, FixedParams};
    use crate::simd::SimdMode;

    #[test]
    fn registry_dispatches_to_the_right_variant() {
        let mut algo = Algorithm::new(AlgoParams::Fixed(FixedParams { fixed_size: 4 })).unwrap();
        assert_eq!(algo.name(), "fixed");
        assert_eq!(algo.find_cutpoint(b"abcdef", 6), 4);
    }

    #[test]
    fn construction_rejects_bad_parameters() {
        let err = Algorithm::new(AlgoParams::Ae(AeParams {
            window_size: 0,
            mode: AeMode::Max,
            simd_mode: SimdMode::Scalar,
        }));
        assert!(err.is_err());
    }
}
