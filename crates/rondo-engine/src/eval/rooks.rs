//! Rook placement terms.

use rondo_core::{Color, Rank, Square};

/// Bonus for a rook on the opponent's second rank, where it eats pawns and
/// boxes in the king.
const ROOK_ON_SEVENTH: i32 = 20;

/// Bonus for the rook of `color` on `sq`.
pub fn rook_bonus(sq: Square, color: Color) -> i32 {
    let seventh = match color {
        Color::White => Rank::Rank7,
        Color::Black => Rank::Rank2,
    };
    if sq.rank() == seventh { ROOK_ON_SEVENTH } else { 0 }
}
