//! Castling rights as a 4-bit set.

use std::fmt;

use crate::color::Color;
use crate::error::FenError;

/// Which wing of the board to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

/// A set over the four castling rights: bit 0 = WK, 1 = WQ, 2 = BK, 3 = BQ.
///
/// The empty set is its own value (`NONE`); no string representation exists
/// at this layer.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

impl CastleRights {
    /// No castling rights.
    pub const NONE: CastleRights = CastleRights(0);
    /// All four castling rights.
    pub const ALL: CastleRights = CastleRights(0b1111);

    /// White king-side.
    pub const WHITE_KING: CastleRights = CastleRights(0b0001);
    /// White queen-side.
    pub const WHITE_QUEEN: CastleRights = CastleRights(0b0010);
    /// Black king-side.
    pub const BLACK_KING: CastleRights = CastleRights(0b0100);
    /// Black queen-side.
    pub const BLACK_QUEEN: CastleRights = CastleRights(0b1000);

    /// Both White rights.
    pub const WHITE_BOTH: CastleRights = CastleRights(0b0011);
    /// Both Black rights.
    pub const BLACK_BOTH: CastleRights = CastleRights(0b1100);

    /// Return the raw 4-bit value, used to index the Zobrist castling keys.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Return `true` if no rights remain.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return `true` if every right in `other` is present in `self`.
    #[inline]
    pub const fn contains(self, other: CastleRights) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Return the set with all rights from `other` added.
    #[inline]
    pub const fn insert(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 | other.0)
    }

    /// Return the set with all rights from `other` removed.
    #[inline]
    pub const fn remove(self, other: CastleRights) -> CastleRights {
        CastleRights(self.0 & !other.0)
    }

    /// Return `true` if `color` may still castle on `side`.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.contains(Self::flag(color, side))
    }

    /// Return the single-bit set for a color and wing.
    #[inline]
    pub const fn flag(color: Color, side: CastleSide) -> CastleRights {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => Self::WHITE_KING,
            (Color::White, CastleSide::QueenSide) => Self::WHITE_QUEEN,
            (Color::Black, CastleSide::KingSide) => Self::BLACK_KING,
            (Color::Black, CastleSide::QueenSide) => Self::BLACK_QUEEN,
        }
    }

    /// Parse the FEN castling field: `-` or a duplicate-free subset of `KQkq`.
    pub fn from_fen(s: &str) -> Result<CastleRights, FenError> {
        if s == "-" {
            return Ok(CastleRights::NONE);
        }

        let mut rights = CastleRights::NONE;
        for c in s.chars() {
            let flag = match c {
                'K' => Self::WHITE_KING,
                'Q' => Self::WHITE_QUEEN,
                'k' => Self::BLACK_KING,
                'q' => Self::BLACK_QUEEN,
                _ => return Err(FenError::InvalidCastlingChar { character: c }),
            };
            if rights.contains(flag) {
                return Err(FenError::DuplicateCastlingChar { character: c });
            }
            rights = rights.insert(flag);
        }
        Ok(rights)
    }

    /// Serialize to the FEN castling field.
    pub fn to_fen(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }

        let mut s = String::with_capacity(4);
        if self.contains(Self::WHITE_KING) {
            s.push('K');
        }
        if self.contains(Self::WHITE_QUEEN) {
            s.push('Q');
        }
        if self.contains(Self::BLACK_KING) {
            s.push('k');
        }
        if self.contains(Self::BLACK_QUEEN) {
            s.push('q');
        }
        s
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({})", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::{CastleRights, CastleSide};
    use crate::color::Color;

    #[test]
    fn insert_and_remove() {
        let rights = CastleRights::NONE
            .insert(CastleRights::WHITE_KING)
            .insert(CastleRights::BLACK_QUEEN);
        assert!(rights.contains(CastleRights::WHITE_KING));
        assert!(rights.contains(CastleRights::BLACK_QUEEN));
        assert!(!rights.contains(CastleRights::WHITE_QUEEN));

        let removed = rights.remove(CastleRights::WHITE_KING);
        assert!(!removed.contains(CastleRights::WHITE_KING));
        assert!(removed.contains(CastleRights::BLACK_QUEEN));
    }

    #[test]
    fn from_fen_to_fen_roundtrip() {
        for fen in ["KQkq", "Kq", "k", "-", "KQ", "kq", "Qk"] {
            let rights = CastleRights::from_fen(fen).unwrap();
            let reparsed = CastleRights::from_fen(&rights.to_fen()).unwrap();
            assert_eq!(rights, reparsed, "roundtrip failed for {fen}");
        }
    }

    #[test]
    fn from_fen_rejects_duplicates() {
        assert!(CastleRights::from_fen("KK").is_err());
        assert!(CastleRights::from_fen("KQkqK").is_err());
    }

    #[test]
    fn from_fen_rejects_unknown_chars() {
        assert!(CastleRights::from_fen("KQxq").is_err());
        assert!(CastleRights::from_fen("1").is_err());
    }

    #[test]
    fn has_by_color_and_side() {
        let rights = CastleRights::from_fen("Kq").unwrap();
        assert!(rights.has(Color::White, CastleSide::KingSide));
        assert!(!rights.has(Color::White, CastleSide::QueenSide));
        assert!(!rights.has(Color::Black, CastleSide::KingSide));
        assert!(rights.has(Color::Black, CastleSide::QueenSide));
    }

    #[test]
    fn empty_set_is_dash() {
        assert_eq!(format!("{}", CastleRights::NONE), "-");
        assert_eq!(format!("{}", CastleRights::ALL), "KQkq");
    }

    #[test]
    fn bits_index_range() {
        assert_eq!(CastleRights::NONE.bits(), 0);
        assert_eq!(CastleRights::ALL.bits(), 15);
    }
}
