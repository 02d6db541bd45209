//! Knight move generation.

use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::square::Square;

use super::attacks::KNIGHT_JUMPS;

/// Generate pseudo-legal moves for the knight on `from`.
pub(super) fn gen_knight(board: &Board, from: Square, us: Color, moves: &mut Vec<Move>) {
    for (df, dr) in KNIGHT_JUMPS {
        if let Some(to) = from.offset(df, dr)
            && board.piece_at(to).is_none_or(|p| p.color() != us)
        {
            moves.push(Move::new(from, to));
        }
    }
}
