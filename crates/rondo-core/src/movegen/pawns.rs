//! Pawn move generation: pushes, captures, en passant, promotions.

use crate::board::Board;
use crate::chess_move::{Move, PromotionPiece};
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::rank::Rank;
use crate::square::Square;

/// Push `from → to`, fanning out into the four promotions when `to` is on
/// the mover's promotion rank.
fn push_pawn_move(from: Square, to: Square, us: Color, moves: &mut Vec<Move>) {
    if to.rank() == Rank::promotion(us) {
        for promo in PromotionPiece::ALL {
            moves.push(Move::promotion(from, to, promo));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

/// Generate pseudo-legal moves for the pawn on `from`.
pub(super) fn gen_pawn(board: &Board, from: Square, us: Color, moves: &mut Vec<Move>) {
    let rank_dir: i8 = match us {
        Color::White => 1,
        Color::Black => -1,
    };

    // Single push; double push from the start rank when both squares are empty.
    if let Some(forward) = from.offset(0, rank_dir)
        && board.piece_at(forward).is_none()
    {
        push_pawn_move(from, forward, us, moves);

        if from.rank() == Rank::pawn_start(us)
            && let Some(double) = forward.offset(0, rank_dir)
            && board.piece_at(double).is_none()
        {
            moves.push(Move::new(from, double));
        }
    }

    for file_delta in [-1, 1] {
        let Some(target) = from.offset(file_delta, rank_dir) else {
            continue;
        };

        // Ordinary diagonal capture of an enemy piece.
        if let Some(victim) = board.piece_at(target) {
            if victim.color() != us {
                push_pawn_move(from, target, us, moves);
            }
            continue;
        }

        // En passant: the diagonal matches the target square and the bypassed
        // enemy pawn stands beside us on our rank.
        if board.en_passant() == Some(target) {
            let bypassed = Square::new(from.rank(), target.file());
            if board
                .piece_at(bypassed)
                .is_some_and(|p| p.kind() == PieceKind::Pawn && p.color() != us)
            {
                moves.push(Move::new(from, target));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::movegen::generate_pseudo_legal_moves;
    use crate::square::Square;

    fn moves_from(board: &Board, from: Square) -> Vec<String> {
        generate_pseudo_legal_moves(board)
            .iter()
            .filter(|m| m.from() == from)
            .map(|m| m.to_uci())
            .collect()
    }

    #[test]
    fn start_rank_pawn_has_single_and_double_push() {
        let board = Board::starting_position();
        let moves = moves_from(&board, Square::E2);
        assert_eq!(moves, ["e2e3", "e2e4"]);
    }

    #[test]
    fn double_push_blocked_by_intermediate_square() {
        // Knight on e3 blocks both e2e3 and e2e4.
        let board: Board = "4k3/8/8/8/8/4N3/4P3/4K3 w - - 0 1".parse().unwrap();
        assert!(moves_from(&board, Square::E2).is_empty());
        // Blocker on e4 only kills the double push.
        let board: Board = "4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1".parse().unwrap();
        assert_eq!(moves_from(&board, Square::E2), ["e2e3"]);
    }

    #[test]
    fn captures_only_hit_enemies() {
        // White pawn e4; black pawn d5, white knight f5.
        let board: Board = "4k3/8/8/3p1N2/4P3/8/8/4K3 w - - 0 1".parse().unwrap();
        let moves = moves_from(&board, Square::E4);
        assert!(moves.contains(&"e4d5".to_string()));
        assert!(moves.contains(&"e4e5".to_string()));
        assert!(!moves.contains(&"e4f5".to_string()));
    }

    #[test]
    fn promotion_fans_out_into_four_moves() {
        let board: Board = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let moves = moves_from(&board, Square::A7);
        assert_eq!(moves, ["a7a8q", "a7a8r", "a7a8b", "a7a8n"]);
    }

    #[test]
    fn capture_promotions_also_fan_out() {
        // Pawn e7 can push-promote on e8 and capture-promote on d8.
        let board: Board = "3rk3/4P3/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
        let moves = moves_from(&board, Square::E7);
        assert_eq!(moves.len(), 8);
        assert!(moves.contains(&"e7d8q".to_string()));
        assert!(moves.contains(&"e7e8n".to_string()));
    }

    #[test]
    fn en_passant_requires_the_bypassed_pawn() {
        let board: Board = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        assert!(moves_from(&board, Square::E5).contains(&"e5d6".to_string()));
    }

    #[test]
    fn black_pawns_move_down_the_board() {
        let board: Board = "4k3/4p3/8/8/8/8/8/4K3 b - - 0 1".parse().unwrap();
        assert_eq!(moves_from(&board, Square::E7), ["e7e6", "e7e5"]);
    }
}
