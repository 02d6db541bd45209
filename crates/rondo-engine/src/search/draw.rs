//! Draw detection context and the contempt-adjusted draw score.

use rondo_core::Board;

use crate::eval::material::material_balance;

/// Score returned for a draw when the mover is ahead in material: slightly
/// negative so the engine keeps playing for a win instead of shuffling into
/// repetition.
const CONTEMPT: i32 = 15;

/// Per-search draw bookkeeping, set by the caller before each top-level
/// search and threaded through the recursion.
///
/// `current_ply` is the game ply of the root position; added to the search
/// ply it gives the effective game ply that `max_plies` caps.
/// `repetition_count` is how often the root position's hash appears in the
/// caller's game history.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawContext {
    /// Game ply at the root of the search.
    pub current_ply: u32,
    /// Optional hard cap on the effective game ply; reaching it scores as a draw.
    pub max_plies: Option<u32>,
    /// Occurrences of the root position in the game history.
    pub repetition_count: u32,
}

impl DrawContext {
    /// Return `true` if the position at search `ply` is a draw under this
    /// context: halfmove clock at 100, threefold repetition, or the ply cap.
    pub fn is_draw(&self, board: &Board, ply: u32) -> bool {
        if board.halfmove_clock() >= 100 {
            return true;
        }
        if self.repetition_count >= 3 {
            return true;
        }
        if let Some(max) = self.max_plies
            && self.current_ply + ply >= max
        {
            return true;
        }
        false
    }
}

/// Contempt-adjusted draw score for the side to move: −15 when ahead in
/// material (a draw wastes an advantage), 0 otherwise.
pub fn draw_score(board: &Board) -> i32 {
    if material_balance(board, board.side_to_move()) > 0 {
        -CONTEMPT
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawContext, draw_score};
    use rondo_core::Board;

    #[test]
    fn halfmove_100_is_a_draw() {
        let board: Board = "4k3/8/8/8/8/8/8/4K3 w - - 100 1".parse().unwrap();
        assert!(DrawContext::default().is_draw(&board, 0));
        let board: Board = "4k3/8/8/8/8/8/8/4K3 w - - 99 1".parse().unwrap();
        assert!(!DrawContext::default().is_draw(&board, 0));
    }

    #[test]
    fn threefold_repetition_is_a_draw() {
        let board = Board::starting_position();
        let ctx = DrawContext {
            repetition_count: 3,
            ..DrawContext::default()
        };
        assert!(ctx.is_draw(&board, 5));
        let ctx = DrawContext {
            repetition_count: 2,
            ..DrawContext::default()
        };
        assert!(!ctx.is_draw(&board, 5));
    }

    #[test]
    fn ply_cap_counts_from_the_game_start() {
        let board = Board::starting_position();
        let ctx = DrawContext {
            current_ply: 90,
            max_plies: Some(100),
            repetition_count: 1,
        };
        assert!(!ctx.is_draw(&board, 9));
        assert!(ctx.is_draw(&board, 10));
        assert!(ctx.is_draw(&board, 11));
    }

    #[test]
    fn no_cap_means_no_ply_draw() {
        let board = Board::starting_position();
        let ctx = DrawContext::default();
        assert!(!ctx.is_draw(&board, 10_000));
    }

    #[test]
    fn draw_score_prefers_playing_on_when_ahead() {
        // White is up a rook; a draw is a small loss for the mover.
        let board: Board = "4k3/8/8/8/8/8/8/R3K3 w - - 0 1".parse().unwrap();
        assert_eq!(draw_score(&board), -15);
        // For the side behind, a draw is fine.
        let board: Board = "4k3/8/8/8/8/8/8/R3K3 b - - 0 1".parse().unwrap();
        assert_eq!(draw_score(&board), 0);
        // Equal material: neutral.
        assert_eq!(draw_score(&Board::starting_position()), 0);
    }
}
