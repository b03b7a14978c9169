//! End-to-end round-trip coverage for the full `partition -> block ->
//! vsrc/rlt` pipeline, exercising the testable properties and boundary
//! behaviours of the whole codec.

use brc::block;
use brc::partition;

/// Routes `log`/`trace` output from the codec through to the test harness's
/// captured stdout. Safe to call from every test: `try_init` is a no-op
/// (returns `Err`, ignored) once the first caller has already set the
/// global logger.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample_corpus() -> Vec<Vec<u8>> {
    vec![
        Vec::new(),
        b"the quick brown fox jumps over the lazy dog".to_vec(),
        vec![0x41u8; 4000],
        (0..=255u8).collect(),
        b"abracadabra".repeat(37),
        vec![0xfeu8, 0xff, 0xff, 0xfe, 0xfe, 0xff],
        (0..50_000u32).map(|i| (i % 7) as u8).collect(),
    ]
}

#[test]
fn block_codec_round_trips_the_sample_corpus() {
    init_logging();
    for sample in sample_corpus() {
        let stored = block::encode(&sample).unwrap();
        assert!(stored.len() <= block::safe_bound(sample.len()));
        let decoded = block::decode(&stored, sample.len()).unwrap();
        assert_eq!(decoded, sample);
    }
}

#[test]
fn partitioned_codec_round_trips_the_sample_corpus() {
    init_logging();
    for sample in sample_corpus() {
        for threads in [1, 4, 16] {
            let container = partition::encode(&sample, threads).unwrap();
            let decoded = partition::decode(&container, threads).unwrap();
            assert_eq!(decoded, sample);
        }
    }
}

#[test]
fn increasing_thread_count_does_not_change_output_bytes() {
    init_logging();
    let sample: Vec<u8> = b"mississippi".repeat(500);
    let baseline = partition::encode(&sample, 1).unwrap();
    for threads in [2, 8, 16, 64] {
        let other = partition::encode(&sample, threads).unwrap();
        assert_eq!(baseline, other);
    }
}

#[test]
fn all_zero_buffer_packs_to_a_single_run() {
    init_logging();
    let sample = vec![0u8; 10_000];
    let stored = block::encode(&sample).unwrap();
    // 1024-byte histogram footer plus a handful of packed run-length bits
    // and the marker byte; nowhere close to the unpacked length.
    assert!(stored.len() < 2048);
    let decoded = block::decode(&stored, sample.len()).unwrap();
    assert_eq!(decoded, sample);
}

#[test]
fn only_escape_bytes_round_trip() {
    init_logging();
    let sample: Vec<u8> = [0xfeu8, 0xff].iter().cycle().take(2048).copied().collect();
    let stored = block::encode(&sample).unwrap();
    let decoded = block::decode(&stored, sample.len()).unwrap();
    assert_eq!(decoded, sample);
}

#[test]
fn partition_decode_rejects_truncated_containers() {
    init_logging();
    let sample = b"hello, partitioned world".to_vec();
    let container = partition::encode(&sample, 4).unwrap();
    let truncated = &container[..container.len() / 2];
    assert!(partition::decode(truncated, 4).is_err());
}
