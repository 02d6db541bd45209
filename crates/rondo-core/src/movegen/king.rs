//! King move and castling generation.

use crate::board::Board;
use crate::castle_rights::{CastleRights, CastleSide};
use crate::chess_move::Move;
use crate::color::Color;
use crate::square::Square;

use super::attacks::{KING_STEPS, is_square_attacked};

/// Generate pseudo-legal king moves, including castling.
///
/// Castling is fully validated here (corridor empty, king not in check, the
/// crossed and destination squares unattacked), so the legality filter only
/// has to re-check the generic king-safety condition.
pub(super) fn gen_king(board: &Board, from: Square, us: Color, moves: &mut Vec<Move>) {
    for (df, dr) in KING_STEPS {
        if let Some(to) = from.offset(df, dr)
            && board.piece_at(to).is_none_or(|p| p.color() != us)
        {
            moves.push(Move::new(from, to));
        }
    }

    gen_castling(board, us, moves);
}

/// Squares involved in castling for (color, side): the corridor that must be
/// empty, and the two squares the king traverses (which must be safe).
fn castle_geometry(us: Color, side: CastleSide) -> (&'static [Square], [Square; 2], Square, Square) {
    match (us, side) {
        (Color::White, CastleSide::KingSide) => (
            &[Square::F1, Square::G1],
            [Square::F1, Square::G1],
            Square::E1,
            Square::G1,
        ),
        (Color::White, CastleSide::QueenSide) => (
            &[Square::B1, Square::C1, Square::D1],
            [Square::D1, Square::C1],
            Square::E1,
            Square::C1,
        ),
        (Color::Black, CastleSide::KingSide) => (
            &[Square::F8, Square::G8],
            [Square::F8, Square::G8],
            Square::E8,
            Square::G8,
        ),
        (Color::Black, CastleSide::QueenSide) => (
            &[Square::B8, Square::C8, Square::D8],
            [Square::D8, Square::C8],
            Square::E8,
            Square::C8,
        ),
    }
}

fn gen_castling(board: &Board, us: Color, moves: &mut Vec<Move>) {
    let rights = board.castling();
    if !rights.has(us, CastleSide::KingSide) && !rights.has(us, CastleSide::QueenSide) {
        return;
    }

    let them = us.flip();
    let king_sq = board.king_square(us);
    if is_square_attacked(board, king_sq, them) {
        return;
    }

    for side in [CastleSide::KingSide, CastleSide::QueenSide] {
        if !rights.has(us, side) {
            continue;
        }
        let (corridor, crossed, king_from, king_to) = castle_geometry(us, side);

        let corridor_clear = corridor.iter().all(|&sq| board.piece_at(sq).is_none());
        let path_safe = crossed
            .iter()
            .all(|&sq| !is_square_attacked(board, sq, them));

        if corridor_clear && path_safe {
            moves.push(Move::new(king_from, king_to));
        }
    }
}
