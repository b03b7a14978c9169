//! Partitioned parallel wrapper (C4): splits a buffer into a fixed number
//! of independently-coded sub-blocks and codes them across a bounded
//! thread pool.
//!
//! # Container layout
//!
//! ```text
//! offset 0    : step        (LE u32, nominal per-partition source length)
//! offset 4    : magic<<16 | version (LE u32)
//! offset 8    : total_len   (LE u32, full decoded buffer length, N)
//! offset 12   : length table, PARTITION_COUNT LE u32 stored lengths
//! offset 12+4P: partition bytes, packed back-to-back per the length table
//! ```
//!
//! A fixed `1024 + step` slot per partition has no room for RLT's trailing
//! marker byte and no way to locate a partition shorter than the worst
//! case. This module instead records each partition's exact stored length
//! (and the overall decoded length, needed to size the last partition's
//! output buffer) up front.
//!
//! # Credit
//!
//! The scoped-thread-pool-per-call pattern is the `rayon` idiom this
//! pack's other parallel codecs (`lz4r`, `streaming-libdeflate-rs`,
//! `oxiarc`, `DJVULibRust`) all reach for in place of hand-rolled
//! `std::thread::spawn`/join bookkeeping.

use crate::block::Block;
use crate::error::{BrcError, ContainerErrorReason, Result};
use byteorder::{ByteOrder, LittleEndian};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Format tag occupying the high 16 bits of the header's second word.
pub const MAGIC: u16 = 0x4252; // "BR"

/// Format revision occupying the low 16 bits of the header's second word.
pub const VERSION: u16 = 4;

/// Number of partitions a buffer is always split into. A format-level
/// constant fixed per [`VERSION`], not derived from the caller's requested
/// thread count: varying partition count with runtime thread count would
/// make the container format itself non-portable across machines.
pub const PARTITION_COUNT: usize = 16;

/// Upper clamp on the caller-requested thread count.
pub const MAX_THREADS: usize = 16;

const HEADER_WORDS: usize = 3;
const HEADER_SIZE: usize = HEADER_WORDS * 4;
const LENGTH_TABLE_SIZE: usize = PARTITION_COUNT * 4;
const PREAMBLE_SIZE: usize = HEADER_SIZE + LENGTH_TABLE_SIZE;

/// Source byte ranges for each of the [`PARTITION_COUNT`] partitions of an
/// `n`-byte buffer: `step = n / PARTITION_COUNT`, the last partition
/// absorbing the remainder.
fn partition_ranges(n: usize) -> [(usize, usize); PARTITION_COUNT] {
    let step = n / PARTITION_COUNT;
    let mut ranges = [(0usize, 0usize); PARTITION_COUNT];
    let mut offset = 0usize;
    for (i, slot) in ranges.iter_mut().enumerate() {
        let len = if i + 1 == PARTITION_COUNT {
            n - offset
        } else {
            step
        };
        *slot = (offset, len);
        offset += len;
    }
    ranges
}

/// Clamp a caller-requested thread count into `[1, MAX_THREADS]`.
pub fn clamp_thread_count(requested: usize) -> usize {
    requested.clamp(1, MAX_THREADS)
}

/// A reasonable default thread count for [`encode`]/[`decode`]: the number
/// of logical CPUs on the host, clamped into `[1, MAX_THREADS]`.
#[cfg(feature = "parallel")]
pub fn default_thread_count() -> usize {
    clamp_thread_count(num_cpus::get())
}

#[cfg(feature = "parallel")]
fn run_with_pool<T, F>(thread_count: usize, f: F) -> T
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(clamp_thread_count(thread_count))
        .build()
        .expect("failed to build partition thread pool");
    pool.install(f)
}

/// Encode `src` as a partitioned container using up to `thread_count`
/// worker threads (clamped to `[1, MAX_THREADS]`).
pub fn encode(src: &[u8], thread_count: usize) -> Result<Vec<u8>> {
    let n = src.len();
    let ranges = partition_ranges(n);
    let step = n / PARTITION_COUNT;

    let encode_one = |(offset, len): (usize, usize)| -> Result<Vec<u8>> {
        let mut block = Block::new(len);
        block.encode(&src[offset..offset + len])?;
        Ok(block.encoded().to_vec())
    };

    #[cfg(feature = "parallel")]
    let stored: Vec<Result<Vec<u8>>> =
        run_with_pool(thread_count, || ranges.par_iter().map(|&r| encode_one(r)).collect());
    #[cfg(not(feature = "parallel"))]
    let stored: Vec<Result<Vec<u8>>> = ranges.iter().map(|&r| encode_one(r)).collect();

    let stored = stored.into_iter().collect::<Result<Vec<Vec<u8>>>>()?;

    let mut out = Vec::with_capacity(PREAMBLE_SIZE + stored.iter().map(Vec::len).sum::<usize>());
    let mut header = [0u8; HEADER_SIZE];
    LittleEndian::write_u32(&mut header[0..4], step as u32);
    LittleEndian::write_u32(&mut header[4..8], ((MAGIC as u32) << 16) | VERSION as u32);
    LittleEndian::write_u32(&mut header[8..12], n as u32);
    out.extend_from_slice(&header);

    let mut table = vec![0u8; LENGTH_TABLE_SIZE];
    for (i, part) in stored.iter().enumerate() {
        LittleEndian::write_u32(&mut table[i * 4..i * 4 + 4], part.len() as u32);
    }
    out.extend_from_slice(&table);

    for part in &stored {
        out.extend_from_slice(part);
    }

    log::info!(
        "partition::encode: {} bytes across {} partitions (step={}) -> {} bytes",
        n,
        PARTITION_COUNT,
        step,
        out.len()
    );
    Ok(out)
}

/// Decode a partitioned container produced by [`encode`], using up to
/// `thread_count` worker threads (clamped to `[1, MAX_THREADS]`).
///
/// Fails with [`BrcError::InvalidContainer`] if the magic or version do
/// not match, and propagates any per-partition [`BrcError`] (most notably
/// `InvalidSubHeader`) from the block codec.
pub fn decode(container: &[u8], thread_count: usize) -> Result<Vec<u8>> {
    if container.len() < PREAMBLE_SIZE {
        return Err(BrcError::BufferTooSmall {
            needed: PREAMBLE_SIZE,
            got: container.len(),
        });
    }

    let word1 = LittleEndian::read_u32(&container[4..8]);
    let magic = (word1 >> 16) as u16;
    let version = (word1 & 0xffff) as u16;
    if magic != MAGIC {
        return Err(BrcError::InvalidContainer {
            reason: ContainerErrorReason::BadMagic {
                found: magic,
                expected: MAGIC,
            },
        });
    }
    if version > VERSION {
        return Err(BrcError::InvalidContainer {
            reason: ContainerErrorReason::UnsupportedVersion { found: version },
        });
    }

    let n = LittleEndian::read_u32(&container[8..12]) as usize;
    let mut lengths = [0u32; PARTITION_COUNT];
    LittleEndian::read_u32_into(
        &container[HEADER_SIZE..HEADER_SIZE + LENGTH_TABLE_SIZE],
        &mut lengths,
    );

    let ranges = partition_ranges(n);
    let mut stored_offset = PREAMBLE_SIZE;
    let mut stored_ranges = [(0usize, 0usize); PARTITION_COUNT];
    for (i, &len) in lengths.iter().enumerate() {
        stored_ranges[i] = (stored_offset, len as usize);
        stored_offset += len as usize;
    }
    if stored_offset > container.len() {
        return Err(BrcError::BufferTooSmall {
            needed: stored_offset,
            got: container.len(),
        });
    }

    let decode_one = |i: usize| -> Result<Vec<u8>> {
        let (decoded_offset, decoded_len) = ranges[i];
        let (stored_start, stored_len) = stored_ranges[i];
        // `decoded_len` alone sizes the working buffer to `safe_bound(decoded_len)`,
        // but `stored_len` is an attacker-controlled length-table entry and can
        // exceed that bound on a malformed container; size against both so the
        // copy below can never index past the buffer.
        let mut block = Block::new(decoded_len.max(stored_len));
        block.working_mut()[..stored_len]
            .copy_from_slice(&container[stored_start..stored_start + stored_len]);
        let mut out = vec![0u8; decoded_len];
        let written = block.decode(stored_len, &mut out)?;
        debug_assert_eq!(written, decoded_len);
        let _ = decoded_offset;
        Ok(out)
    };

    #[cfg(feature = "parallel")]
    let decoded: Vec<Result<Vec<u8>>> = run_with_pool(thread_count, || {
        (0..PARTITION_COUNT).into_par_iter().map(decode_one).collect()
    });
    #[cfg(not(feature = "parallel"))]
    let decoded: Vec<Result<Vec<u8>>> = (0..PARTITION_COUNT).map(decode_one).collect();

    let decoded = decoded.into_iter().collect::<Result<Vec<Vec<u8>>>>()?;

    let mut out = vec![0u8; n];
    for (i, part) in decoded.into_iter().enumerate() {
        let (offset, len) = ranges[i];
        out[offset..offset + len].copy_from_slice(&part);
    }

    log::info!(
        "partition::decode: {} bytes -> {} bytes across {} partitions",
        container.len(),
        n,
        PARTITION_COUNT
    );
    Ok(out)
}
