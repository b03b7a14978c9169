//! Per-block byte-frequency histogram (`H`) and the frequency-sorted
//! symbol order (`σ`) derived from it.
//!
//! Factored out of [`crate::vsrc`] because both the block codec and the
//! partition wrapper want to gather or log symbol counts without
//! re-deriving `σ` themselves.

use byteorder::{ByteOrder, LittleEndian};

/// Number of distinct byte values.
pub const ALPHABET_SIZE: usize = 0x100;

/// Serialised footer size: 256 little-endian `u32` counts.
pub const FOOTER_SIZE: usize = ALPHABET_SIZE * 4;

/// A per-block byte-frequency histogram, `H[0..=255]`.
#[derive(Clone, Copy)]
pub struct Histogram {
    counts: [u32; ALPHABET_SIZE],
}

impl Default for Histogram {
    fn default() -> Self {
        Histogram {
            counts: [0u32; ALPHABET_SIZE],
        }
    }
}

impl Histogram {
    /// An all-zero histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count occurrences of every byte value in `src`.
    pub fn gather(src: &[u8]) -> Self {
        let mut h = Self::new();
        for &b in src {
            h.counts[b as usize] += 1;
        }
        h
    }

    /// The count for byte value `v`.
    #[inline]
    pub fn get(&self, v: u8) -> u32 {
        self.counts[v as usize]
    }

    #[inline]
    pub(crate) fn set(&mut self, v: u8, count: u32) {
        self.counts[v as usize] = count;
    }

    #[inline]
    pub(crate) fn increment(&mut self, v: u8) {
        self.counts[v as usize] += 1;
    }

    /// ΣH, the total number of bytes the histogram describes.
    pub fn sum(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// U, the number of byte values with a non-zero count.
    pub fn unique_count(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Write the 1024-byte little-endian footer into `dst`.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than [`FOOTER_SIZE`]; callers are expected
    /// to have already validated buffer sizes via `safe_bound`.
    pub fn write_footer(&self, dst: &mut [u8]) {
        assert!(dst.len() >= FOOTER_SIZE);
        LittleEndian::write_u32_into(&self.counts, &mut dst[..FOOTER_SIZE]);
    }

    /// Parse a 1024-byte little-endian footer out of `src`.
    ///
    /// # Panics
    ///
    /// Panics if `src` is shorter than [`FOOTER_SIZE`].
    pub fn read_footer(src: &[u8]) -> Self {
        assert!(src.len() >= FOOTER_SIZE);
        let mut counts = [0u32; ALPHABET_SIZE];
        LittleEndian::read_u32_into(&src[..FOOTER_SIZE], &mut counts);
        Histogram { counts }
    }

    /// Compute σ: the permutation of byte values in non-increasing frequency
    /// order, ties broken by ascending byte value. Only the first
    /// `unique_count()` entries are meaningful; the remainder hold the
    /// (unspecified, never-dereferenced) zero-frequency tail.
    ///
    /// This is the same repeated-max-selection the original C reference
    /// (`generate_sorted_map` in `brc.cpp`) uses rather than a comparison
    /// sort: with only 256 possible symbols the O(256^2) scan is simpler
    /// than a sort and just as fast in practice.
    pub fn sorted_order(&self) -> [u8; ALPHABET_SIZE] {
        let mut remaining = self.counts;
        let mut sigma = [0u8; ALPHABET_SIZE];
        for slot in sigma.iter_mut() {
            let mut best_sym = 0usize;
            let mut best_count = 0u32;
            for (sym, &count) in remaining.iter().enumerate() {
                if count > best_count {
                    best_count = count;
                    best_sym = sym;
                }
            }
            if best_count == 0 {
                break;
            }
            *slot = best_sym as u8;
            remaining[best_sym] = 0;
        }
        sigma
    }
}
