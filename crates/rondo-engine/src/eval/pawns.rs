//! Pawn structure terms.

use rondo_core::{Board, Color, PieceKind, Square};

/// Base bonus for a passed pawn.
const PASSED_PAWN_BASE: i32 = 20;

/// Extra bonus per rank of advance beyond the start rank.
const PASSED_PAWN_PER_RANK: i32 = 4;

/// Return `true` if the pawn of `color` on `sq` is passed: no enemy pawn on
/// the same or an adjacent file on any square ahead of it.
pub fn is_passed_pawn(board: &Board, sq: Square, color: Color) -> bool {
    let rank_dir: i8 = match color {
        Color::White => 1,
        Color::Black => -1,
    };
    let enemy = color.flip();

    for file_delta in [-1, 0, 1] {
        let Some(mut current) = sq.offset(file_delta, rank_dir) else {
            continue;
        };
        loop {
            if board
                .piece_at(current)
                .is_some_and(|p| p.kind() == PieceKind::Pawn && p.color() == enemy)
            {
                return false;
            }
            match current.offset(0, rank_dir) {
                Some(next) => current = next,
                None => break,
            }
        }
    }
    true
}

/// Bonus for the pawn of `color` on `sq`: `20 + 4 · advance` if passed,
/// where advance counts ranks beyond the start rank. Zero otherwise.
pub fn passed_pawn_bonus(board: &Board, sq: Square, color: Color) -> i32 {
    if !is_passed_pawn(board, sq, color) {
        return 0;
    }
    let advance = match color {
        Color::White => sq.rank().index() as i32 - 1,
        Color::Black => 6 - sq.rank().index() as i32,
    };
    PASSED_PAWN_BASE + PASSED_PAWN_PER_RANK * advance
}
