//! Pseudo-legal and legal move generation.

mod attacks;
mod king;
mod knights;
mod pawns;
mod sliders;

pub use attacks::is_square_attacked;

use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use self::attacks::{DIAGONAL_DIRS, ORTHOGONAL_DIRS};
use self::king::gen_king;
use self::knights::gen_knight;
use self::pawns::gen_pawn;
use self::sliders::gen_slider;

/// Return `true` if `color`'s king is attacked.
pub fn in_check(board: &Board, color: Color) -> bool {
    is_square_attacked(board, board.king_square(color), color.flip())
}

/// Generate all pseudo-legal moves for the side to move: every move the
/// piece geometry allows, without asking whether the mover's king is left
/// in check. Castling is the exception — it is fully validated here.
pub fn generate_pseudo_legal_moves(board: &Board) -> Vec<Move> {
    let us = board.side_to_move();
    let mut moves = Vec::with_capacity(64);

    for sq in Square::all() {
        let Some(piece) = board.piece_at(sq) else {
            continue;
        };
        if piece.color() != us {
            continue;
        }

        match piece.kind() {
            PieceKind::Pawn => gen_pawn(board, sq, us, &mut moves),
            PieceKind::Knight => gen_knight(board, sq, us, &mut moves),
            PieceKind::Bishop => gen_slider(board, sq, us, &DIAGONAL_DIRS, &mut moves),
            PieceKind::Rook => gen_slider(board, sq, us, &ORTHOGONAL_DIRS, &mut moves),
            PieceKind::Queen => {
                gen_slider(board, sq, us, &ORTHOGONAL_DIRS, &mut moves);
                gen_slider(board, sq, us, &DIAGONAL_DIRS, &mut moves);
            }
            PieceKind::King => gen_king(board, sq, us, &mut moves),
        }
    }

    moves
}

/// Generate all legal moves: pseudo-legal moves that do not leave the
/// mover's king in check, tried via apply/undo on a scratch copy.
///
/// A pseudo-legal move that would capture the opposing king is pruned before
/// being tried. Legal positions never produce one, but callers probing
/// speculative move lists should not be able to decapitate a king.
pub fn generate_legal_moves(board: &Board) -> Vec<Move> {
    let us = board.side_to_move();
    let pseudo = generate_pseudo_legal_moves(board);
    let mut legal = Vec::with_capacity(pseudo.len());

    let mut scratch = *board;
    for mv in pseudo {
        if scratch
            .piece_at(mv.to())
            .is_some_and(|p| p.kind() == PieceKind::King)
        {
            continue;
        }
        let undo = scratch.apply(mv);
        if !in_check(&scratch, us) {
            legal.push(mv);
        }
        scratch.undo(undo);
    }

    legal
}
