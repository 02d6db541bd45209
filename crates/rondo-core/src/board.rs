//! The board: piece placement, side to move, castling, en passant, halfmove
//! clock, and an incrementally maintained Zobrist hash.

use std::fmt;

use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::BoardError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::rank::Rank;
use crate::square::Square;
use crate::zobrist;

/// Complete position state.
///
/// Every mutator keeps the Zobrist hash in sync, so `hash()` always equals a
/// full recomputation from the other fields. Higher layers (move application,
/// FEN parsing) are written purely in terms of these mutators and never touch
/// the hash directly.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// One cell per square; `None` is an empty square.
    squares: [Option<Piece>; 64],
    /// Which side moves next.
    side_to_move: Color,
    /// Remaining castling rights.
    castling: CastleRights,
    /// En passant target square, if the previous move was a double push.
    en_passant: Option<Square>,
    /// Plies since the last pawn move or capture, for the fifty-move rule.
    halfmove_clock: u32,
    /// Zobrist hash of the position.
    hash: u64,
}

impl Board {
    /// Return an empty board: no pieces, White to move, no castling rights.
    pub fn empty() -> Board {
        let mut board = Board {
            squares: [None; 64],
            side_to_move: Color::White,
            castling: CastleRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            hash: 0,
        };
        board.hash = zobrist::hash_from_scratch(&board);
        board
    }

    /// Return the standard starting position.
    pub fn starting_position() -> Board {
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut squares = [None; 64];
        for (file, &kind) in back_rank.iter().enumerate() {
            squares[file] = Some(Piece::new(kind, Color::White));
            squares[8 + file] = Some(Piece::WHITE_PAWN);
            squares[48 + file] = Some(Piece::BLACK_PAWN);
            squares[56 + file] = Some(Piece::new(kind, Color::Black));
        }

        let mut board = Board {
            squares,
            side_to_move: Color::White,
            castling: CastleRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            hash: 0,
        };
        board.hash = zobrist::hash_from_scratch(&board);
        board
    }

    /// Return the piece on the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Put `piece` on `sq` (or clear it with `None`), updating the hash.
    #[inline]
    pub fn set_piece_at(&mut self, sq: Square, piece: Option<Piece>) {
        if let Some(old) = self.squares[sq.index()] {
            self.hash ^= zobrist::PIECE_SQUARE[old.index()][sq.index()];
        }
        if let Some(new) = piece {
            self.hash ^= zobrist::PIECE_SQUARE[new.index()][sq.index()];
        }
        self.squares[sq.index()] = piece;
    }

    /// Return the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Set the side to move, toggling the side key when the value changes.
    #[inline]
    pub fn set_side_to_move(&mut self, color: Color) {
        if self.side_to_move != color {
            self.hash ^= zobrist::SIDE_TO_MOVE;
        }
        self.side_to_move = color;
    }

    /// Return the current castling rights.
    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    /// Set the castling rights, swapping the castling-set key in the hash.
    #[inline]
    pub fn set_castling(&mut self, rights: CastleRights) {
        self.hash ^= zobrist::CASTLING[self.castling.bits() as usize];
        self.hash ^= zobrist::CASTLING[rights.bits() as usize];
        self.castling = rights;
    }

    /// Return the en passant target square, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Set or clear the en passant target, swapping the file key in the hash.
    #[inline]
    pub fn set_en_passant(&mut self, sq: Option<Square>) {
        if let Some(old) = self.en_passant {
            self.hash ^= zobrist::EN_PASSANT_FILE[old.file().index()];
        }
        if let Some(new) = sq {
            self.hash ^= zobrist::EN_PASSANT_FILE[new.file().index()];
        }
        self.en_passant = sq;
    }

    /// Return the halfmove clock.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Set the halfmove clock. No hash effect.
    #[inline]
    pub fn set_halfmove_clock(&mut self, clock: u32) {
        self.halfmove_clock = clock;
    }

    /// Return the Zobrist hash of the position.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Recompute the hash from scratch. Only used by debug assertions and
    /// tests; the incrementally maintained value must always agree.
    pub fn recompute_hash(&self) -> u64 {
        zobrist::hash_from_scratch(self)
    }

    /// Return the square of the king for the given side.
    ///
    /// # Panics
    ///
    /// Panics if the board has no king of that color (invalid position).
    pub fn king_square(&self, color: Color) -> Square {
        let king = Piece::new(PieceKind::King, color);
        Square::all()
            .find(|&sq| self.squares[sq.index()] == Some(king))
            .expect("board must have a king for each side")
    }

    /// Validate the semantic invariants FEN input must satisfy: exactly one
    /// king per side, no pawns on the back ranks, and a plausible en passant
    /// target (on rank 3 or 6, empty, covering an enemy pawn).
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let king = Piece::new(PieceKind::King, color);
            let count = Square::all()
                .filter(|&sq| self.squares[sq.index()] == Some(king))
                .count();
            if count != 1 {
                let color = match color {
                    Color::White => "white",
                    Color::Black => "black",
                };
                return Err(BoardError::InvalidKingCount { color, count });
            }
        }

        for sq in Square::all() {
            if let Some(piece) = self.squares[sq.index()]
                && piece.kind() == PieceKind::Pawn
                && matches!(sq.rank(), Rank::Rank1 | Rank::Rank8)
            {
                return Err(BoardError::PawnsOnBackRank);
            }
        }

        if let Some(ep_sq) = self.en_passant {
            // A white double push leaves the target on rank 3, a black one on
            // rank 6; the pushed pawn sits one rank nearer its owner.
            let (pawn_delta, pawn_color) = match ep_sq.rank() {
                Rank::Rank3 => (1i8, Color::White),
                Rank::Rank6 => (-1i8, Color::Black),
                _ => return Err(BoardError::EnPassantBadRank),
            };

            if self.piece_at(ep_sq).is_some() {
                return Err(BoardError::EnPassantOccupied);
            }

            let covered = ep_sq
                .offset(0, pawn_delta)
                .expect("rank 3/6 always has a neighbour rank");
            match self.piece_at(covered) {
                Some(p) if p.kind() == PieceKind::Pawn && p.color() == pawn_color => {}
                _ => return Err(BoardError::EnPassantNoPawn),
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{}\")", self)
    }
}
