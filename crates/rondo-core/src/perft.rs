//! Perft — exhaustive legal-move counting, the move generator's oracle.

use crate::board::Board;
use crate::movegen::generate_legal_moves;

/// Count the legal move sequences of exactly `depth` plies.
///
/// Depth 0 returns 1. Depth 1 short-circuits to the legal move count so the
/// deepest layer never pays for apply/undo.
pub fn perft(board: &Board, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(board);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut scratch = *board;
    let mut nodes = 0u64;
    for mv in moves {
        let undo = scratch.apply(mv);
        scratch.set_side_to_move(undo.side().flip());
        nodes += perft(&scratch, depth - 1);
        scratch.undo(undo);
    }
    nodes
}

/// Perft with a per-root-move breakdown, sorted by move text. The classic
/// tool for bisecting a generator bug against a reference engine.
pub fn divide(board: &Board, depth: usize) -> Vec<(String, u64)> {
    let mut scratch = *board;
    let mut results: Vec<(String, u64)> = generate_legal_moves(board)
        .into_iter()
        .map(|mv| {
            let undo = scratch.apply(mv);
            scratch.set_side_to_move(undo.side().flip());
            let count = if depth <= 1 {
                1
            } else {
                perft(&scratch, depth - 1)
            };
            scratch.undo(undo);
            (mv.to_uci(), count)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
