//! Sliding piece move generation: bishops, rooks, queens.

use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::square::Square;

/// Walk each ray direction from `from`, pushing empty squares and stopping
/// at the first occupied one (included only if it holds an enemy).
pub(super) fn gen_slider(
    board: &Board,
    from: Square,
    us: Color,
    dirs: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(df, dr) in dirs {
        let mut current = from;
        while let Some(next) = current.offset(df, dr) {
            match board.piece_at(next) {
                None => {
                    moves.push(Move::new(from, next));
                    current = next;
                }
                Some(piece) => {
                    if piece.color() != us {
                        moves.push(Move::new(from, next));
                    }
                    break;
                }
            }
        }
    }
}
