//! Static evaluation.

pub mod material;
pub mod pawns;
pub mod phase;
pub mod pst;
pub mod rooks;

use rondo_core::{Board, Color, PieceKind, Square};

use material::piece_value;
use pawns::passed_pawn_bonus;
use phase::game_phase;
use pst::{king_pst_value, pst_value};
use rooks::rook_bonus;

/// Penalty for a knight or bishop still sitting on its starting square.
const UNDEVELOPED_MINOR: i32 = 10;

/// Starting squares of the minor pieces, per color.
const MINOR_HOME_SQUARES: [[Square; 4]; 2] = [
    [Square::B1, Square::C1, Square::F1, Square::G1],
    [Square::B8, Square::C8, Square::F8, Square::G8],
];

/// Evaluate the position from the side to move's perspective, in centipawns.
///
/// Sums, per piece: material, piece-square bonus (the king's blended by game
/// phase), a development penalty for minors still at home, a passed-pawn
/// bonus, and a bonus for rooks on the opponent's second rank. The total is
/// computed White-positive and negated when Black is to move.
pub fn evaluate(board: &Board) -> i32 {
    let phase = game_phase(board);
    let mut score = 0;

    for sq in Square::all() {
        let Some(piece) = board.piece_at(sq) else {
            continue;
        };
        let color = piece.color();
        let kind = piece.kind();

        let mut value = piece_value(kind);
        value += match kind {
            PieceKind::King => king_pst_value(color, sq, phase),
            _ => pst_value(kind, color, sq),
        };

        match kind {
            PieceKind::Knight | PieceKind::Bishop => {
                if MINOR_HOME_SQUARES[color.index()].contains(&sq) {
                    value -= UNDEVELOPED_MINOR;
                }
            }
            PieceKind::Pawn => value += passed_pawn_bonus(board, sq, color),
            PieceKind::Rook => value += rook_bonus(sq, color),
            _ => {}
        }

        match color {
            Color::White => score += value,
            Color::Black => score -= value,
        }
    }

    match board.side_to_move() {
        Color::White => score,
        Color::Black => -score,
    }
}

#[cfg(test)]
mod tests {
    use super::evaluate;
    use rondo_core::Board;

    #[test]
    fn starting_position_is_symmetric() {
        let board = Board::starting_position();
        assert_eq!(evaluate(&board), 0);
    }

    #[test]
    fn evaluation_is_from_the_movers_perspective() {
        let white_view: Board = "rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
            .parse()
            .unwrap();
        let black_view: Board = "rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1"
            .parse()
            .unwrap();
        assert_eq!(evaluate(&white_view), -evaluate(&black_view));
        assert!(evaluate(&white_view) > 0, "White is up a queen");
    }

    #[test]
    fn extra_queen_dominates_positional_terms() {
        let board: Board = "rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
            .parse()
            .unwrap();
        let score = evaluate(&board);
        assert!((800..=1000).contains(&score), "score was {score}");
    }

    #[test]
    fn developed_knight_beats_home_knight() {
        // Same material, one knight developed to f3 versus parked on g1.
        let home: Board = "4k3/8/8/8/8/8/8/4K1N1 w - - 0 1".parse().unwrap();
        let developed: Board = "4k3/8/8/8/8/5N2/8/4K3 w - - 0 1".parse().unwrap();
        assert!(evaluate(&developed) > evaluate(&home));
    }

    #[test]
    fn advanced_passed_pawn_is_worth_more() {
        let far: Board = "4k3/3P4/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let near: Board = "4k3/8/8/8/8/3P4/8/4K3 w - - 0 1".parse().unwrap();
        assert!(evaluate(&far) > evaluate(&near));
    }

    #[test]
    fn mirrored_positions_cancel() {
        // A fully mirrored position must evaluate to zero for either mover.
        let board: Board = "r3k3/pp6/8/8/8/8/PP6/R3K3 w - - 0 1".parse().unwrap();
        assert_eq!(evaluate(&board), 0);
    }
}
