//! Game phase from remaining non-pawn material.

use rondo_core::{Board, PieceKind, Square};

/// Maximum phase value, reached with the full starting complement of
/// non-pawn material: 4 minors + 4 rooks + 2 queens = 4·1 + 4·2 + 2·4 = 24.
pub const MAX_PHASE: i32 = 24;

/// Compute the game phase in `0..=MAX_PHASE`.
///
/// Weights: minor = 1, rook = 2, queen = 4, summed over both sides and
/// clamped so promoted queens cannot push past the maximum. `MAX_PHASE`
/// means full middlegame; 0 means a pure pawn ending.
pub fn game_phase(board: &Board) -> i32 {
    let mut phase = 0;
    for sq in Square::all() {
        if let Some(piece) = board.piece_at(sq) {
            phase += match piece.kind() {
                PieceKind::Knight | PieceKind::Bishop => 1,
                PieceKind::Rook => 2,
                PieceKind::Queen => 4,
                PieceKind::Pawn | PieceKind::King => 0,
            };
        }
    }
    phase.min(MAX_PHASE)
}

#[cfg(test)]
mod tests {
    use super::{MAX_PHASE, game_phase};
    use rondo_core::Board;

    #[test]
    fn starting_position_is_full_phase() {
        assert_eq!(game_phase(&Board::starting_position()), MAX_PHASE);
    }

    #[test]
    fn bare_kings_are_phase_zero() {
        let board: Board = "4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        assert_eq!(game_phase(&board), 0);
    }

    #[test]
    fn phase_is_clamped_with_promoted_queens() {
        // A stack of promoted queens would overflow without the clamp.
        let board: Board = "QQQ1kQQQ/QQ6/8/8/8/8/8/RNBQKBNR w - - 0 1".parse().unwrap();
        assert_eq!(game_phase(&board), MAX_PHASE);
    }

    #[test]
    fn rook_ending_phase() {
        let board: Board = "4k3/8/8/8/8/8/8/R3K3 w - - 0 1".parse().unwrap();
        assert_eq!(game_phase(&board), 2);
    }
}
