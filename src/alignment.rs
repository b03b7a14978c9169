//! An 8-byte aligned byte buffer, letting the block codec's hot buffers
//! use wider load/store instructions than a plain byte-aligned allocation
//! would.
//!
//! A plain `Vec<u8>` only ever guarantees 1-byte alignment from the
//! allocator's point of view. Backing the block codec's working and scratch
//! buffers with a `Vec<u64>` instead gets 8-byte alignment for free from the
//! global allocator, with no unsafe allocation calls, custom `Layout`, or
//! platform-specific `posix_memalign`/`_aligned_malloc` of our own — the
//! alignment is a property of `u64`'s own layout, not of any particular
//! allocator.

/// A byte buffer guaranteed to start on an 8-byte boundary.
pub struct AlignedBuf {
    words: Vec<u64>,
    len: usize,
}

impl AlignedBuf {
    /// An all-zero buffer of exactly `len` live bytes, backed by enough
    /// `u64` words to hold them.
    pub fn new(len: usize) -> Self {
        AlignedBuf {
            words: vec![0u64; Self::words_for(len)],
            len,
        }
    }

    fn words_for(len: usize) -> usize {
        (len + 7) / 8
    }

    /// Number of live bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Grow the backing storage (never shrinks) so it can hold at least
    /// `len` bytes, and record `len` as the new live length.
    pub fn ensure_len(&mut self, len: usize) {
        let words = Self::words_for(len);
        if self.words.len() < words {
            self.words.resize(words, 0);
        }
        if len > self.len {
            self.len = len;
        }
    }

    /// Release the backing storage, leaving the buffer empty.
    pub fn clear(&mut self) {
        self.words = Vec::new();
        self.len = 0;
    }

    /// The live bytes, as a slice starting on an 8-byte boundary.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: `words` is a `Vec<u64>`, so its allocation is 8-byte
        // aligned and at least `words.len() * 8 >= len` bytes long; u8 has
        // no alignment requirement of its own, and the reinterpreted slice
        // never outlives the borrow of `self.words` it is derived from.
        unsafe { std::slice::from_raw_parts(self.words.as_ptr().cast::<u8>(), self.len) }
    }

    /// The live bytes, mutably.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        // SAFETY: see `as_bytes`.
        unsafe { std::slice::from_raw_parts_mut(self.words.as_mut_ptr().cast::<u8>(), self.len) }
    }
}
