//! Error types for FEN parsing and board validation.

use std::fmt;

/// Errors produced while parsing a FEN string.
///
/// Parsing is all-or-nothing: a failed parse leaves no partially built board
/// behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// The FEN string has fewer than 4 or more than 6 space-separated fields.
    WrongFieldCount {
        /// Number of fields found.
        found: usize,
    },
    /// The piece placement section does not have exactly 8 ranks.
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },
    /// A rank in the piece placement describes more or fewer than 8 squares.
    BadRankLength {
        /// Zero-based rank index as written (0 = rank 8, 7 = rank 1).
        rank_index: usize,
        /// Number of squares described.
        length: usize,
    },
    /// An unrecognized character appeared in the piece placement.
    InvalidPieceChar {
        /// The offending character.
        character: char,
    },
    /// The active color field is not "w" or "b".
    InvalidColor {
        /// The invalid color string.
        found: String,
    },
    /// An unrecognized character appeared in the castling field.
    InvalidCastlingChar {
        /// The offending character.
        character: char,
    },
    /// A castling right appeared more than once.
    DuplicateCastlingChar {
        /// The repeated character.
        character: char,
    },
    /// The en passant field is not "-" or a valid algebraic square.
    InvalidEnPassant {
        /// The invalid en passant string.
        found: String,
    },
    /// The halfmove clock is not a non-negative integer.
    InvalidHalfmoveClock {
        /// The invalid string.
        found: String,
    },
    /// The parsed position fails semantic validation.
    InvalidBoard {
        /// The underlying validation error.
        source: BoardError,
    },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongFieldCount { found } => {
                write!(f, "expected 4 to 6 FEN fields, found {found}")
            }
            FenError::WrongRankCount { found } => {
                write!(f, "expected 8 ranks in piece placement, found {found}")
            }
            FenError::BadRankLength { rank_index, length } => {
                write!(f, "rank {rank_index} describes {length} squares, expected 8")
            }
            FenError::InvalidPieceChar { character } => {
                write!(f, "invalid piece character: '{character}'")
            }
            FenError::InvalidColor { found } => {
                write!(f, "invalid active color: \"{found}\"")
            }
            FenError::InvalidCastlingChar { character } => {
                write!(f, "invalid castling character: '{character}'")
            }
            FenError::DuplicateCastlingChar { character } => {
                write!(f, "duplicate castling character: '{character}'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "invalid en passant square: \"{found}\"")
            }
            FenError::InvalidHalfmoveClock { found } => {
                write!(f, "invalid halfmove clock: \"{found}\"")
            }
            FenError::InvalidBoard { source } => {
                write!(f, "invalid board: {source}")
            }
        }
    }
}

impl std::error::Error for FenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FenError::InvalidBoard { source } => Some(source),
            _ => None,
        }
    }
}

impl From<BoardError> for FenError {
    fn from(source: BoardError) -> Self {
        FenError::InvalidBoard { source }
    }
}

/// Errors from semantic validation of a [`Board`](crate::board::Board).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount {
        /// Which side has the wrong king count.
        color: &'static str,
        /// Number of kings found.
        count: usize,
    },
    /// Pawns occupy the first or eighth rank.
    #[error("pawns found on back rank")]
    PawnsOnBackRank,
    /// The en passant target sits on a rank other than 3 or 6.
    #[error("en passant target on impossible rank")]
    EnPassantBadRank,
    /// The en passant target square is not empty.
    #[error("en passant target square is occupied")]
    EnPassantOccupied,
    /// The square covered by the en passant target holds no enemy pawn.
    #[error("no pawn behind the en passant target")]
    EnPassantNoPawn,
}
