//! Attack detection by ray and jump walks from the target square.

use crate::board::Board;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// The eight knight jumps as (file, rank) deltas.
pub(crate) const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

/// The eight king steps as (file, rank) deltas.
pub(crate) const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Orthogonal ray directions (rook, queen).
pub(crate) const ORTHOGONAL_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Diagonal ray directions (bishop, queen).
pub(crate) const DIAGONAL_DIRS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// Return `true` if any piece of `by` attacks `sq`.
///
/// Checks, in order: pawn diagonals, knight jumps, king adjacency, orthogonal
/// rays for rooks and queens, diagonal rays for bishops and queens. Rays stop
/// at the first occupied square.
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    // A pawn of `by` attacks `sq` from one rank on `by`'s side of it.
    let pawn_rank_delta = match by {
        Color::White => -1,
        Color::Black => 1,
    };
    let pawn = Piece::new(PieceKind::Pawn, by);
    for file_delta in [-1, 1] {
        if let Some(from) = sq.offset(file_delta, pawn_rank_delta)
            && board.piece_at(from) == Some(pawn)
        {
            return true;
        }
    }

    let knight = Piece::new(PieceKind::Knight, by);
    for (df, dr) in KNIGHT_JUMPS {
        if let Some(from) = sq.offset(df, dr)
            && board.piece_at(from) == Some(knight)
        {
            return true;
        }
    }

    let king = Piece::new(PieceKind::King, by);
    for (df, dr) in KING_STEPS {
        if let Some(from) = sq.offset(df, dr)
            && board.piece_at(from) == Some(king)
        {
            return true;
        }
    }

    if ray_hits(board, sq, by, &ORTHOGONAL_DIRS, PieceKind::Rook) {
        return true;
    }
    if ray_hits(board, sq, by, &DIAGONAL_DIRS, PieceKind::Bishop) {
        return true;
    }

    false
}

/// Walk each direction from `sq` until a piece is hit; report whether that
/// piece is a `by`-colored `slider` or queen.
fn ray_hits(
    board: &Board,
    sq: Square,
    by: Color,
    dirs: &[(i8, i8); 4],
    slider: PieceKind,
) -> bool {
    for &(df, dr) in dirs {
        let mut current = sq;
        while let Some(next) = current.offset(df, dr) {
            match board.piece_at(next) {
                None => current = next,
                Some(piece) => {
                    if piece.color() == by
                        && (piece.kind() == slider || piece.kind() == PieceKind::Queen)
                    {
                        return true;
                    }
                    break;
                }
            }
        }
    }
    false
}
