//! Universal invariants checked over arbitrary inputs with `proptest`:
//! conservation, order, bounds, determinism, and buffer-size invariance.

use std::io::Cursor;

use cdcbench::algo::Algorithm;
use cdcbench::driver::StreamingDriver;
use cdcbench::params::{
    AeMode, AeParams, AlgoParams, CrcParams, FastCdcParams, FixedParams, GearParams, MaxpParams, RabinParams,
    RamParams, SeqMode, SeqParams, TttdParams,
};
use cdcbench::simd::SimdMode;
use proptest::prelude::*;

/// Runs `algo` over `data` through a fresh driver and returns the emitted
/// chunk sizes in order.
fn run(algo_params: AlgoParams, data: &[u8], buffer_capacity: usize) -> Vec<usize> {
    let algo = Algorithm::new(algo_params).unwrap();
    let mut driver = StreamingDriver::new(algo, buffer_capacity, None);
    let mut sizes = Vec::new();
    let mut cursor = Cursor::new(data.to_vec());
    driver.process_stream(&mut cursor, |rec| sizes.push(rec.size)).unwrap();
    sizes
}

/// A representative spread of bounded-algorithm parameter bundles, each
/// with its associated max_block so buffer-size invariance can pick a
/// capacity that is guaranteed safe.
fn bounded_algo_params() -> Vec<(AlgoParams, usize)> {
    vec![
        (AlgoParams::Fixed(FixedParams { fixed_size: 37 }), 37),
        (
            AlgoParams::Maxp(MaxpParams { window_size: 16, max_block: 256, simd_mode: SimdMode::Scalar }),
            256,
        ),
        (
            AlgoParams::Ram(RamParams { window_size: 16, max_block: 256, simd_mode: SimdMode::Scalar }),
            256,
        ),
        (AlgoParams::Gear(GearParams { min_block: 64, avg_block: 256, max_block: 1024 }), 1024),
        (
            AlgoParams::FastCdc(FastCdcParams { min_block: 64, avg_block: 256, max_block: 1024, norm_level: 2 }),
            1024,
        ),
        (
            AlgoParams::Rabin(RabinParams { window_size: 16, min_block: 64, avg_block: 256, max_block: 1024 }),
            1024,
        ),
        (AlgoParams::Tttd(TttdParams { min: 64, avg: 256, max: 1024, window_size: 16 }), 1024),
        (
            AlgoParams::Seq(SeqParams {
                length_threshold: 4,
                jump_trigger: 8,
                jump_size: 16,
                mode: SeqMode::Increasing,
                min: 64,
                max: 1024,
            }),
            1024,
        ),
        (
            AlgoParams::Crc(CrcParams { min: 64, avg: 256, max: 1024, window_size: 8, window_step: 4, hash_bits: 8 }),
            1024,
        ),
    ]
}

proptest! {
    /// Conservation + order + bounds over every bounded algorithm.
    #[test]
    fn conservation_order_and_bounds_hold(data in proptest::collection::vec(any::<u8>(), 1..4096)) {
        for (params, max_block) in bounded_algo_params() {
            let sizes = run(params, &data, (max_block + 1).max(4096));
            prop_assert_eq!(sizes.iter().sum::<usize>(), data.len());
            let mut offset = 0usize;
            for (i, &size) in sizes.iter().enumerate() {
                prop_assert!(size > 0);
                offset += size;
                let is_last = i == sizes.len() - 1;
                if !is_last {
                    prop_assert!(size <= max_block, "chunk {} exceeds max_block {}", size, max_block);
                }
            }
            prop_assert_eq!(offset, data.len());
        }
    }

    /// Same input, same parameters: identical chunk sequence every time.
    #[test]
    fn determinism_holds(data in proptest::collection::vec(any::<u8>(), 1..4096)) {
        let params = AlgoParams::FastCdc(FastCdcParams { min_block: 64, avg_block: 256, max_block: 1024, norm_level: 2 });
        let first = run(params, &data, 4096);
        let second = run(params, &data, 4096);
        prop_assert_eq!(first, second);
    }

    /// The chunk sequence does not depend on the driver's working-buffer
    /// capacity, provided it is at least max_block + 1.
    #[test]
    fn buffer_size_invariance_holds(data in proptest::collection::vec(any::<u8>(), 1..4096)) {
        let params = AlgoParams::Gear(GearParams { min_block: 32, avg_block: 128, max_block: 512 });
        let small = run(params, &data, 513);
        let large = run(params, &data, 1 << 16);
        prop_assert_eq!(small, large);
    }

    /// Fixed-size chunking: every non-terminal chunk is exactly fixed_size.
    #[test]
    fn fixed_chunks_are_exactly_fixed_size(data in proptest::collection::vec(any::<u8>(), 1..2048), fixed_size in 1usize..128) {
        let sizes = run(AlgoParams::Fixed(FixedParams { fixed_size }), &data, fixed_size + 1);
        for (i, &size) in sizes.iter().enumerate() {
            if i != sizes.len() - 1 {
                prop_assert_eq!(size, fixed_size);
            } else {
                prop_assert!(size <= fixed_size);
            }
        }
    }

    /// AE scalar and sse128 agree on arbitrary inputs (the construction-time
    /// window validation requires a multiple-of-16 window for sse128).
    #[test]
    fn ae_simd_modes_agree(data in proptest::collection::vec(any::<u8>(), 1..4096)) {
        let scalar = run(
            AlgoParams::Ae(AeParams { window_size: 32, mode: AeMode::Max, simd_mode: SimdMode::Scalar }),
            &data,
            1 << 16,
        );
        let sse = run(
            AlgoParams::Ae(AeParams { window_size: 32, mode: AeMode::Max, simd_mode: SimdMode::Sse128 }),
            &data,
            1 << 16,
        );
        prop_assert_eq!(scalar, sse);
    }
}
