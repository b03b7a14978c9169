//! Move-to-front rank bookkeeping used by [`super`]'s forward and inverse
//! transforms.
//!
//! Forward and inverse walk opposite directions through the same logical
//! state (a permutation of the 256 byte values), but it pays to represent
//! it differently on each side: the encoder looks up "what is symbol `s`'s
//! rank right now", so it indexes by symbol; the decoder looks up "what
//! symbol is at rank `r` right now", so it indexes by rank. Keeping them as
//! two small distinct types means each only ever does the update its side
//! actually needs.

use crate::histogram::ALPHABET_SIZE;

/// Symbol → current rank, as seen by the forward transform.
///
/// The update in [`EncodeRanks::advance`] is written as a full 256-entry
/// scan (`rank_of[t] += (rank_of[t] < r) as u8`) rather than a prefix walk.
/// This is the auto-vectorizable form: a scalar implementation that only
/// touches the entries below `r` is equally correct, just slower on wide
/// SIMD lanes.
pub struct EncodeRanks {
    rank_of: [u8; ALPHABET_SIZE],
}

impl EncodeRanks {
    /// Identity permutation: every byte value starts at its own rank. Ranks
    /// for symbols that actually occur are overwritten by
    /// [`Self::assign_first_seen`] before encoding begins; ranks for bytes
    /// that never occur are dead values, never read.
    pub fn identity() -> Self {
        let mut rank_of = [0u8; ALPHABET_SIZE];
        for (v, slot) in rank_of.iter_mut().enumerate() {
            *slot = v as u8;
        }
        EncodeRanks { rank_of }
    }

    /// Record the rank a symbol is given the first time it is observed,
    /// i.e. the order-of-first-appearance rank assignment the forward
    /// transform seeds its MTF state with.
    #[inline]
    pub fn assign_first_seen(&mut self, sym: u8, rank: u8) {
        self.rank_of[sym as usize] = rank;
    }

    /// Current rank of `sym`.
    #[inline]
    pub fn rank(&self, sym: u8) -> u8 {
        self.rank_of[sym as usize]
    }

    /// Move `sym` (whose rank was just observed as `r > 0`) to rank 0,
    /// shifting every symbol that was strictly below rank `r` down by one.
    #[inline]
    pub fn advance(&mut self, sym: u8, r: u8) {
        for slot in self.rank_of.iter_mut() {
            *slot += (*slot < r) as u8;
        }
        self.rank_of[sym as usize] = 0;
    }
}

/// Rank → current symbol, as seen by the inverse transform.
pub struct DecodeRanks {
    sym_of_rank: [u8; ALPHABET_SIZE],
}

impl DecodeRanks {
    /// Identity permutation, overwritten for present symbols by
    /// [`Self::seed`] before the output loop starts.
    pub fn identity() -> Self {
        let mut sym_of_rank = [0u8; ALPHABET_SIZE];
        for (r, slot) in sym_of_rank.iter_mut().enumerate() {
            *slot = r as u8;
        }
        DecodeRanks { sym_of_rank }
    }

    /// Place `sym` at rank `rank`, reconstructing the forward encoder's
    /// first-occurrence assignment.
    #[inline]
    pub fn seed(&mut self, rank: u8, sym: u8) {
        self.sym_of_rank[rank as usize] = sym;
    }

    /// The symbol currently at rank 0.
    #[inline]
    pub fn head(&self) -> u8 {
        self.sym_of_rank[0]
    }

    /// Move `sym` (observed at rank `r > 0`) to rank 0, shifting ranks
    /// `0..r` up by one, and return the new rank-0 symbol.
    #[inline]
    pub fn advance(&mut self, r: u8, sym: u8) -> u8 {
        let r = r as usize;
        for j in 0..r {
            self.sym_of_rank[j] = self.sym_of_rank[j + 1];
        }
        self.sym_of_rank[r] = sym;
        self.sym_of_rank[0]
    }
}
