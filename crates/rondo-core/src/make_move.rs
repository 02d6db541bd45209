//! Move application and reversal.
//!
//! `apply` mutates the board in place and returns a [`MoveUndo`] holding
//! everything needed for exact reversal; `undo` consumes it. Side to move is
//! deliberately *not* toggled by `apply` — callers toggle it themselves, which
//! lets perft, the search, and book replay share one primitive. `undo`
//! restores the recorded mover as the side to move.
//!
//! Both operations are written purely in terms of the board's hash-aware
//! mutators, so the incremental Zobrist hash stays consistent for free.

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Castling rights revoked when a square is the source or destination of a
/// move. Covers the king leaving home, a rook leaving its corner, and a rook
/// being captured on its corner — and nothing else, because only these six
/// squares carry an entry.
const CASTLE_RIGHTS_REVOKE: [CastleRights; 64] = {
    let mut table = [CastleRights::NONE; 64];
    table[Square::E1.index()] = CastleRights::WHITE_BOTH;
    table[Square::A1.index()] = CastleRights::WHITE_QUEEN;
    table[Square::H1.index()] = CastleRights::WHITE_KING;
    table[Square::E8.index()] = CastleRights::BLACK_BOTH;
    table[Square::A8.index()] = CastleRights::BLACK_QUEEN;
    table[Square::H8.index()] = CastleRights::BLACK_KING;
    table
};

/// Record of one applied move, consumed exactly once by [`Board::undo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveUndo {
    from: Square,
    to: Square,
    moved: Piece,
    captured: Option<Piece>,
    side: Color,
    prev_en_passant: Option<Square>,
    prev_castling: CastleRights,
    prev_halfmove: u32,
    /// Set only for en passant: the captured pawn and where it stood.
    en_passant_capture: Option<(Square, Piece)>,
    /// Set only for castling: the rook's corner, its post-castling square,
    /// and the rook itself.
    castle_rook: Option<(Square, Square, Piece)>,
}

impl MoveUndo {
    /// The side that made the recorded move.
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }
}

impl Board {
    /// Return `true` if `mv` is an en passant capture in this position: a
    /// pawn moving onto the (empty) en passant target square.
    pub fn is_en_passant_capture(&self, mv: Move) -> bool {
        self.en_passant() == Some(mv.to())
            && self
                .piece_at(mv.from())
                .is_some_and(|p| p.kind() == PieceKind::Pawn)
            && self.piece_at(mv.to()).is_none()
    }

    /// Return `true` if `mv` captures something (including en passant).
    pub fn is_capture(&self, mv: Move) -> bool {
        self.piece_at(mv.to()).is_some() || self.is_en_passant_capture(mv)
    }

    /// Apply a move in place and return the undo record.
    ///
    /// Trusts its input: `mv` must come from the move generator for this
    /// position. Side to move is not toggled — that is the caller's job.
    ///
    /// # Panics
    ///
    /// Panics if the source square is empty (an illegal move slipped past
    /// the generator).
    pub fn apply(&mut self, mv: Move) -> MoveUndo {
        let us = self.side_to_move();
        let from = mv.from();
        let to = mv.to();
        let moved = self
            .piece_at(from)
            .expect("apply: source square must hold a piece");

        let mut undo = MoveUndo {
            from,
            to,
            moved,
            captured: None,
            side: us,
            prev_en_passant: self.en_passant(),
            prev_castling: self.castling(),
            prev_halfmove: self.halfmove_clock(),
            en_passant_capture: None,
            castle_rook: None,
        };

        let is_en_passant = self.is_en_passant_capture(mv);
        self.set_en_passant(None);

        // En passant: the captured pawn stands beside the destination, on the
        // mover's rank.
        if is_en_passant {
            let captured_sq = Square::new(from.rank(), to.file());
            let captured_pawn = Piece::new(PieceKind::Pawn, us.flip());
            debug_assert_eq!(self.piece_at(captured_sq), Some(captured_pawn));
            self.set_piece_at(captured_sq, None);
            undo.en_passant_capture = Some((captured_sq, captured_pawn));
        }

        undo.captured = self.piece_at(to);

        // Place the moved piece, promoted and capitalised by side if needed.
        let placed = match mv.promotion_piece() {
            Some(promo) => Piece::new(promo.to_piece_kind(), us),
            None => moved,
        };
        self.set_piece_at(to, Some(placed));
        self.set_piece_at(from, None);

        // Rights die when the king leaves home, a rook leaves its corner, or
        // a rook is captured on its corner.
        let rights = self
            .castling()
            .remove(CASTLE_RIGHTS_REVOKE[from.index()])
            .remove(CASTLE_RIGHTS_REVOKE[to.index()]);
        self.set_castling(rights);

        // A king stepping two files is castling: bring the rook across.
        if moved.kind() == PieceKind::King
            && (from.file().index() as i8 - to.file().index() as i8).abs() == 2
        {
            let (rook_from, rook_to) = match to {
                Square::G1 => (Square::H1, Square::F1),
                Square::C1 => (Square::A1, Square::D1),
                Square::G8 => (Square::H8, Square::F8),
                Square::C8 => (Square::A8, Square::D8),
                _ => unreachable!("castling destination must be c1/g1/c8/g8"),
            };
            let rook = Piece::new(PieceKind::Rook, us);
            debug_assert_eq!(self.piece_at(rook_from), Some(rook));
            self.set_piece_at(rook_from, None);
            self.set_piece_at(rook_to, Some(rook));
            undo.castle_rook = Some((rook_from, rook_to, rook));
        }

        // A pawn double push leaves an en passant target behind it.
        if moved.kind() == PieceKind::Pawn
            && (from.rank().index() as i8 - to.rank().index() as i8).abs() == 2
        {
            let behind = match us {
                Color::White => from.offset(0, 1),
                Color::Black => from.offset(0, -1),
            };
            self.set_en_passant(behind);
        }

        if moved.kind() == PieceKind::Pawn || undo.captured.is_some() || is_en_passant {
            self.set_halfmove_clock(0);
        } else {
            self.set_halfmove_clock(self.halfmove_clock() + 1);
        }

        debug_assert_eq!(self.hash(), self.recompute_hash());
        undo
    }

    /// Reverse a move applied with [`Board::apply`], restoring the recorded
    /// mover as the side to move.
    pub fn undo(&mut self, undo: MoveUndo) {
        self.set_side_to_move(undo.side);

        if let Some((rook_from, rook_to, rook)) = undo.castle_rook {
            self.set_piece_at(rook_to, None);
            self.set_piece_at(rook_from, Some(rook));
        }

        self.set_piece_at(undo.from, Some(undo.moved));
        self.set_piece_at(undo.to, undo.captured);

        if let Some((captured_sq, captured_pawn)) = undo.en_passant_capture {
            self.set_piece_at(captured_sq, Some(captured_pawn));
        }

        self.set_en_passant(undo.prev_en_passant);
        self.set_castling(undo.prev_castling);
        self.set_halfmove_clock(undo.prev_halfmove);

        debug_assert_eq!(self.hash(), self.recompute_hash());
    }
}
