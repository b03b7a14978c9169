//! Error types shared by every stage of the BRC pipeline.
//!
//! The original C reference implementation reports failures by printing to
//! `stderr` and returning `EXIT_FAILURE`. BRC has no `Reader`/`Writer`
//! pipeline and no I/O of its own, so failures are modelled as a closed
//! enum instead of `std::io::Error`.
//!
//! Allocation failure is not one of these variants: every buffer here is
//! sized with an ordinary `Vec`, which aborts the process on exhaustion
//! rather than returning control to the caller, so there is no path by
//! which this crate could construct a recoverable allocation error. If
//! fallible allocation is ever needed, the working and scratch buffers in
//! [`crate::block`] are the place to switch to `Vec::try_reserve_exact`.

use thiserror::Error;

/// Every failure mode BRC can surface: invalid container, invalid
/// sub-header, and buffer too small. All are non-retryable and fatal to the
/// current block.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum BrcError {
    /// A caller-supplied destination buffer is smaller than `safe_bound(n)`.
    #[error("buffer too small: need at least {needed} bytes, got {got}")]
    BufferTooSmall {
        /// Minimum number of bytes required.
        needed: usize,
        /// Number of bytes actually supplied.
        got: usize,
    },

    /// The VSRC histogram footer does not sum to the expected decoded length.
    #[error("invalid sub-header: histogram sums to {sum}, expected {expected}")]
    InvalidSubHeader {
        /// ΣH as read from the footer.
        sum: u64,
        /// The decoded length the caller expected (N).
        expected: u64,
    },

    /// The partition container header's magic or version field did not match.
    #[error("invalid container: {reason}")]
    InvalidContainer {
        /// Human-readable reason (bad magic, or unsupported version).
        reason: ContainerErrorReason,
    },
}

/// Distinguishes the two ways a partition container header can fail to
/// validate, so callers can match on it without parsing `Display` text.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum ContainerErrorReason {
    /// The high 16 bits of the header's second word did not match [`crate::partition::MAGIC`].
    #[error("bad magic: found {found:#06x}, expected {expected:#06x}")]
    BadMagic {
        /// The observed high-16-bit tag.
        found: u16,
        /// The expected format tag.
        expected: u16,
    },
    /// The low 16 bits of the header's second word named an unsupported format revision.
    #[error("unsupported version: {found}")]
    UnsupportedVersion {
        /// The observed revision.
        found: u16,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BrcError>;
