//! Block codec (C3): composes [`crate::vsrc`] and [`crate::rlt`] into a
//! single encode/decode step, and owns the scratch buffers both stages
//! share.
//!
//! # Credit
//!
//! The two-buffer (working/scratch) discipline and the `safe_bound`
//! over-allocation pattern reuse a caller-sized buffer across many blocks
//! rather than allocating fresh storage per call.

use crate::alignment::AlignedBuf;
use crate::error::{BrcError, Result};
use crate::histogram::FOOTER_SIZE;
use crate::{rlt, vsrc};

/// Minimum padding `safe_bound` reserves beyond the structural overhead of
/// VSRC's footer and RLT's marker, for alignment and future growth.
const SAFE_BOUND_PAD: usize = 16;

/// The smallest buffer capacity that is guaranteed to hold the encoded form
/// of an `n`-byte block: `n` raw bytes, VSRC's 1024-byte histogram footer,
/// RLT's one-byte marker, and a small fixed pad.
pub fn safe_bound(n: usize) -> usize {
    n + FOOTER_SIZE + 1 + SAFE_BOUND_PAD
}

/// A reusable block encoder/decoder.
///
/// Holds a working buffer and a scratch buffer, both sized by
/// [`safe_bound`] for the largest block the instance has been asked to
/// handle. Re-using a [`Block`] across many same-sized inputs (as
/// [`crate::partition`] does, one per worker thread) avoids repeated
/// allocation.
pub struct Block {
    working: AlignedBuf,
    scratch: AlignedBuf,
    stored_len: usize,
}

impl Block {
    /// Create a block codec sized for inputs of up to `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        let bound = safe_bound(capacity);
        Block {
            working: AlignedBuf::new(bound),
            scratch: AlignedBuf::new(bound),
            stored_len: 0,
        }
    }

    /// Ensure both buffers can hold `safe_bound(capacity)` bytes, growing
    /// them in place if the block is reused for a larger input than it was
    /// constructed for.
    fn ensure_capacity(&mut self, capacity: usize) {
        let bound = safe_bound(capacity);
        self.working.ensure_len(bound);
        self.scratch.ensure_len(bound);
    }

    /// Release the buffers back to empty, freeing their backing storage.
    pub fn free(&mut self) {
        self.working.clear();
        self.scratch.clear();
        self.stored_len = 0;
    }

    /// Number of bytes the most recent [`Self::encode`] produced.
    pub fn stored_len(&self) -> usize {
        self.stored_len
    }

    /// Encode `src` (`N` bytes): VSRC forward into the working buffer,
    /// then RLT forward from a scratch copy back into the working buffer.
    /// Returns the number of bytes written, which is also recorded as
    /// [`Self::stored_len`].
    pub fn encode(&mut self, src: &[u8]) -> Result<usize> {
        let n = src.len();
        self.ensure_capacity(n);

        let vsrc_len = n + FOOTER_SIZE;
        vsrc::forward(src, &mut self.working.as_bytes_mut()[..vsrc_len])?;

        self.scratch.as_bytes_mut()[..vsrc_len].copy_from_slice(&self.working.as_bytes()[..vsrc_len]);
        let packed_len = rlt::forward(&self.scratch.as_bytes()[..vsrc_len], self.working.as_bytes_mut())?;

        self.stored_len = packed_len;
        log::debug!("block::encode: {} bytes -> {} bytes stored", n, packed_len);
        Ok(packed_len)
    }

    /// The encoded bytes from the most recent [`Self::encode`] call.
    pub fn encoded(&self) -> &[u8] {
        &self.working.as_bytes()[..self.stored_len]
    }

    /// Decode a stored block of `stored_size` bytes (held in the working
    /// buffer, e.g. via [`Self::working_mut`]) into `out`. Returns the
    /// number of bytes written to `out`.
    ///
    /// Propagates [`BrcError::InvalidSubHeader`] if the VSRC footer does
    /// not sum to the length implied by unpacking the RLT body.
    pub fn decode(&mut self, stored_size: usize, out: &mut [u8]) -> Result<usize> {
        self.ensure_capacity(out.len());

        self.scratch.as_bytes_mut()[..stored_size]
            .copy_from_slice(&self.working.as_bytes()[..stored_size]);
        let vsrc_len = rlt::inverse(&self.scratch.as_bytes()[..stored_size], self.working.as_bytes_mut())?;

        let n = vsrc::inverse(&self.working.as_bytes()[..vsrc_len], out)?;
        log::debug!("block::decode: {} bytes stored -> {} bytes", stored_size, n);
        Ok(n)
    }

    /// Direct access to the working buffer, for callers (such as
    /// [`crate::partition`]) that need to place a stored block's bytes
    /// into it before calling [`Self::decode`].
    pub fn working_mut(&mut self) -> &mut [u8] {
        self.working.as_bytes_mut()
    }
}

/// One-shot encode without retaining a [`Block`] across calls. Convenience
/// wrapper for callers that do not need buffer reuse.
pub fn encode(src: &[u8]) -> Result<Vec<u8>> {
    let mut block = Block::new(src.len());
    block.encode(src)?;
    Ok(block.encoded().to_vec())
}

/// One-shot decode without retaining a [`Block`] across calls. `expected_len`
/// is the caller's upper bound on the decoded length (the original block
/// size it is recovering).
pub fn decode(stored: &[u8], expected_len: usize) -> Result<Vec<u8>> {
    let mut block = Block::new(expected_len);
    block.working.ensure_len(stored.len());
    block.working_mut()[..stored.len()].copy_from_slice(stored);
    let mut out = vec![0u8; expected_len];
    let n = block.decode(stored.len(), &mut out)?;
    out.truncate(n);
    Ok(out)
}
