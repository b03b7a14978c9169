//! Randomised property coverage: many shapes and sizes of input, always
//! round-tripped through both the block codec and the partitioned wrapper.

use brc::{block, partition};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Routes `log`/`trace` output from the codec through to the test harness's
/// captured stdout; a no-op after the first caller in the process.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A handful of distributions that stress different parts of the
/// pipeline: uniform noise (worst case for RLT), mostly-zero (best case),
/// and a small alphabet (stresses VSRC's bucket/rank bookkeeping).
fn random_sample(rng: &mut StdRng, len: usize, alphabet: &[u8]) -> Vec<u8> {
    (0..len).map(|_| alphabet[rng.gen_range(0..alphabet.len())]).collect()
}

#[test]
fn block_codec_round_trips_random_inputs() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(0xB2C0_DE42);
    let full_alphabet: Vec<u8> = (0..=255u8).collect();
    let sparse_alphabet = [0u8, 0, 0, 0, 1, 2, 0xfe, 0xff];

    for &len in &[0usize, 1, 2, 17, 255, 1024, 4096, 9973] {
        for alphabet in [full_alphabet.as_slice(), &sparse_alphabet] {
            let sample = random_sample(&mut rng, len, alphabet);
            let stored = block::encode(&sample).unwrap();
            assert!(stored.len() <= block::safe_bound(sample.len()));
            let decoded = block::decode(&stored, sample.len()).unwrap();
            assert_eq!(decoded, sample);
        }
    }
}

#[test]
fn partitioned_codec_round_trips_random_inputs() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(0x5EED_F00D);
    let alphabet: Vec<u8> = (0..=255u8).collect();

    for &len in &[0usize, 3, 31, 1000, 12_345, 200_003] {
        let sample = random_sample(&mut rng, len, &alphabet);
        for &threads in &[1usize, 3, 16] {
            let container = partition::encode(&sample, threads).unwrap();
            let decoded = partition::decode(&container, threads).unwrap();
            assert_eq!(decoded, sample);
        }
    }
}

#[test]
fn single_byte_alphabet_packs_maximally() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..8 {
        let len = rng.gen_range(0..20_000);
        let value = rng.gen::<u8>();
        let sample = vec![value; len];
        let stored = block::encode(&sample).unwrap();
        let decoded = block::decode(&stored, len).unwrap();
        assert_eq!(decoded, sample);
    }
}
