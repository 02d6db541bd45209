//! Transposition table: direct-mapped, keyed by the full position hash.
//!
//! The search is single-threaded, so the table is a plain vector indexed by
//! the low bits of the hash. A slot is trusted only when its stored key
//! matches the full 64-bit probe key; index collisions therefore surface as
//! ordinary misses.

use rondo_core::Move;

use crate::search::negamax::MATE_THRESHOLD;

/// Kind of bound a stored score represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The score is exact (PV node).
    Exact,
    /// The score is a lower bound (beta cutoff).
    Lower,
    /// The score is an upper bound (fail low).
    Upper,
}

/// One table slot. `depth < 0` marks an empty slot.
#[derive(Debug, Clone)]
struct TtEntry {
    key: u64,
    depth: i32,
    score: i32,
    bound: Bound,
    best_move: Option<Move>,
}

impl TtEntry {
    const EMPTY: TtEntry = TtEntry {
        key: 0,
        depth: -1,
        score: 0,
        bound: Bound::Exact,
        best_move: None,
    };
}

/// Convert a search score into its stored form.
///
/// Mate scores encode distance from the root; the table must hold distance
/// from the node instead, so they are pushed further towards infinity by
/// `ply` on the way in.
pub fn score_to_tt(score: i32, ply: u32) -> i32 {
    if score > MATE_THRESHOLD {
        score + ply as i32
    } else if score < -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

/// Convert a stored score back into root-relative form, reversing
/// [`score_to_tt`].
pub fn score_from_tt(score: i32, ply: u32) -> i32 {
    if score > MATE_THRESHOLD {
        score - ply as i32
    } else if score < -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

/// Fixed-size direct-mapped transposition table.
pub struct TranspositionTable {
    entries: Vec<TtEntry>,
    mask: u64,
}

impl TranspositionTable {
    /// Default table size: 2^20 slots (~40 MB).
    pub const DEFAULT_ENTRIES: usize = 1 << 20;

    /// Create a table with `entries` slots, rounded up to a power of two so
    /// the hash can index it with a mask.
    pub fn new(entries: usize) -> Self {
        let size = entries.max(1).next_power_of_two();
        Self {
            entries: vec![TtEntry::EMPTY; size],
            mask: (size - 1) as u64,
        }
    }

    /// Reset every slot to empty.
    pub fn clear(&mut self) {
        self.entries.fill(TtEntry::EMPTY);
    }

    /// Probe for `key` at `depth` under the window `(alpha, beta)`.
    ///
    /// Returns the stored score (mate-adjusted for `ply`) and best-move hint
    /// only when the slot holds this exact key, was searched at least as
    /// deeply, and its bound can decide the current window: EXACT always,
    /// LOWER only when the score reaches `beta`, UPPER only when it stays
    /// at or below `alpha`.
    pub fn probe(
        &self,
        key: u64,
        depth: i32,
        alpha: i32,
        beta: i32,
        ply: u32,
    ) -> Option<(i32, Option<Move>)> {
        let entry = &self.entries[(key & self.mask) as usize];
        if entry.depth < 0 || entry.key != key || entry.depth < depth {
            return None;
        }

        let score = score_from_tt(entry.score, ply);
        let usable = match entry.bound {
            Bound::Exact => true,
            Bound::Lower => score >= beta,
            Bound::Upper => score <= alpha,
        };
        if !usable {
            return None;
        }

        Some((score, entry.best_move))
    }

    /// Return the stored best-move hint for `key`, if the slot holds one.
    /// Usable for move ordering even when the bound cannot cut.
    pub fn peek_best_move(&self, key: u64) -> Option<Move> {
        let entry = &self.entries[(key & self.mask) as usize];
        if entry.depth < 0 || entry.key != key {
            return None;
        }
        entry.best_move
    }

    /// Store an entry, preferring depth: an existing, deeper entry for the
    /// same key is left alone. The score is mate-adjusted by `ply` on the
    /// way in.
    pub fn store(
        &mut self,
        key: u64,
        depth: i32,
        score: i32,
        bound: Bound,
        best_move: Option<Move>,
        ply: u32,
    ) {
        let entry = &mut self.entries[(key & self.mask) as usize];
        if entry.depth >= depth && entry.key == key {
            return;
        }

        *entry = TtEntry {
            key,
            depth,
            score: score_to_tt(score, ply),
            bound,
            best_move,
        };
    }
}

impl std::fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("entries", &self.entries.len())
            .finish()
    }
}
