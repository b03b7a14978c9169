//! Throughput benchmarks for the block codec and the partitioned wrapper.
//!
//! Uses `criterion` rather than a nightly-only `#[bench]` harness, since
//! this crate targets stable Rust.

use brc::{block, partition};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn text_like(len: usize) -> Vec<u8> {
    let words = [
        "the", "quick", "brown", "fox", "jumps", "over", "the", "lazy", "dog",
    ];
    let mut rng = StdRng::seed_from_u64(42);
    let mut out = Vec::with_capacity(len + 16);
    while out.len() < len {
        out.extend_from_slice(words[rng.gen_range(0..words.len())].as_bytes());
        out.push(b' ');
    }
    out.truncate(len);
    out
}

fn uniform_noise(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..len).map(|_| rng.gen::<u8>()).collect()
}

fn bench_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("block");
    for &size in &[4 * 1024usize, 64 * 1024, 1024 * 1024] {
        let text = text_like(size);
        let noise = uniform_noise(size);
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("encode_text", size), &text, |b, data| {
            b.iter(|| block::encode(black_box(data)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("encode_noise", size), &noise, |b, data| {
            b.iter(|| block::encode(black_box(data)).unwrap());
        });

        let stored_text = block::encode(&text).unwrap();
        group.bench_with_input(
            BenchmarkId::new("decode_text", size),
            &stored_text,
            |b, data| {
                b.iter(|| block::decode(black_box(data), size).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");
    let size = 4 * 1024 * 1024usize;
    let text = text_like(size);
    group.throughput(Throughput::Bytes(size as u64));

    for &threads in &[1usize, 4, 16] {
        group.bench_with_input(
            BenchmarkId::new("encode", threads),
            &threads,
            |b, &threads| {
                b.iter(|| partition::encode(black_box(&text), threads).unwrap());
            },
        );
    }

    let container = partition::encode(&text, 16).unwrap();
    for &threads in &[1usize, 4, 16] {
        group.bench_with_input(
            BenchmarkId::new("decode", threads),
            &threads,
            |b, &threads| {
                b.iter(|| partition::decode(black_box(&container), threads).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_block, bench_partition);
criterion_main!(benches);
