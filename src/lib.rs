//! Behemoth Rank Coding (BRC): a BWT post-processing transform.
//!
//! BRC turns the output of a Burrows-Wheeler Transform into a form that is
//! friendlier to an entropy coder, without performing entropy coding
//! itself. It is two composed stages:
//!
//! - [`vsrc`] — a move-to-front variant seeded by frequency-sorted rank
//!   order, whose output is reordered into per-symbol buckets (hence
//!   "sorted rank code").
//! - [`rlt`] — a zero run-length transform that packs the long runs of
//!   zero ranks VSRC tends to produce.
//!
//! [`block`] composes the two into a single encode/decode step, and
//! [`partition`] splits a large buffer into independently-coded partitions
//! so the block codec can run across a thread pool.
//!
//! # Example
//!
//! ```rust
//! use brc::partition;
//!
//! let input = b"the quick brown fox jumps over the lazy dog".repeat(64);
//! let threads = partition::default_thread_count();
//! let encoded = partition::encode(&input, threads).unwrap();
//! let decoded = partition::decode(&encoded, threads).unwrap();
//! assert_eq!(decoded, input);
//! ```
//!
//! # Credit
//!
//! Ported from `loxxous/Behemoth-Rank-Coding`, a C++ BWT post-processing
//! transform. The overall crate layout — a small composable transform per
//! module, a reusable working buffer at the codec layer, and logging at
//! `trace!`/`debug!` density around each phase transition — follows this
//! crate's own pre-existing `bwt`/`rle` modules, which BRC's bucketed rank
//! coding supersedes for BWT post-processing.

#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod alignment;
pub mod block;
pub mod error;
pub mod histogram;
pub mod partition;
pub mod rlt;
pub mod vsrc;

pub use block::{safe_bound, Block};
pub use error::{BrcError, ContainerErrorReason, Result};
