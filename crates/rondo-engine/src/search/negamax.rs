//! Negamax alpha-beta search with quiescence.

use std::time::Instant;

use rondo_core::{Board, generate_legal_moves, in_check};

use crate::eval::evaluate;
use crate::search::draw::{DrawContext, draw_score};
use crate::search::ordering::{is_tactical, order_moves};
use crate::search::tt::{Bound, TranspositionTable};

/// Window bound strictly outside every reachable score.
pub const INF: i32 = 1_000_000;

/// Base score for checkmate; a mate delivered at ply `k` scores `MATE - k`.
pub const MATE: i32 = 100_000;

/// Scores beyond this magnitude are mate-in-N values.
pub const MATE_THRESHOLD: i32 = 99_000;

/// Sentinel returned when the deadline expires mid-search. Larger than any
/// mate magnitude, and still out of range after one negation, so it can
/// never be mistaken for a real score while the abort unwinds.
pub const TIME_OUT: i32 = 200_000;

/// Ply ceiling guarding against runaway recursion (e.g. long cross-check
/// sequences, which the check extension searches at constant depth).
const MAX_PLY: u32 = 128;

/// State threaded through one top-level search.
pub(super) struct SearchContext<'a> {
    pub tt: &'a mut TranspositionTable,
    pub deadline: Option<Instant>,
    pub draw: DrawContext,
    pub nodes: u64,
    pub qnodes: u64,
    /// Latched when the deadline fires; the whole recursion unwinds on it.
    pub timed_out: bool,
}

impl SearchContext<'_> {
    /// Poll the wall clock. Once latched, stays expired.
    fn deadline_expired(&mut self) -> bool {
        if self.timed_out {
            return true;
        }
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            self.timed_out = true;
        }
        self.timed_out
    }
}

/// Negamax with alpha-beta pruning.
///
/// Returns the score of the position from the mover's perspective, or
/// [`TIME_OUT`] if the deadline fired anywhere below this node. Every
/// `apply` is paired with an `undo` on all exit paths, including the abort.
pub(super) fn negamax(
    board: &mut Board,
    mut depth: i32,
    ply: u32,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    if ctx.deadline_expired() {
        return TIME_OUT;
    }
    ctx.nodes += 1;

    if ctx.draw.is_draw(board, ply) {
        return draw_score(board);
    }
    if ply >= MAX_PLY {
        return evaluate(board);
    }

    let us = board.side_to_move();
    let checked = in_check(board, us);
    if checked && depth > 0 {
        depth += 1;
    }

    if depth <= 0 && !checked {
        return quiescence(board, ply, alpha, beta, ctx);
    }

    let hash = board.hash();
    if let Some((score, _)) = ctx.tt.probe(hash, depth, alpha, beta, ply) {
        return score;
    }

    let mut moves = generate_legal_moves(board);
    if moves.is_empty() {
        return if checked { -MATE + ply as i32 } else { 0 };
    }
    order_moves(board, &mut moves, ctx.tt.peek_best_move(hash));

    let alpha_orig = alpha;
    let mut best = -INF;
    let mut best_move = None;

    for mv in moves {
        let undo = board.apply(mv);
        board.set_side_to_move(us.flip());
        let score = -negamax(board, depth - 1, ply + 1, -beta, -alpha, ctx);
        board.undo(undo);

        if ctx.timed_out {
            return TIME_OUT;
        }

        if score > best {
            best = score;
            best_move = Some(mv);
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            ctx.tt.store(hash, depth, best, Bound::Lower, best_move, ply);
            return best;
        }
    }

    let bound = if alpha > alpha_orig {
        Bound::Exact
    } else {
        Bound::Upper
    };
    ctx.tt.store(hash, depth, best, bound, best_move, ply);
    best
}

/// Quiescence search: stand pat on the static evaluation, then try only
/// tactical moves (captures including en passant, and promotions) so the
/// evaluator is never consulted mid-exchange. Probes and stores the
/// transposition table at depth 0.
pub(super) fn quiescence(
    board: &mut Board,
    ply: u32,
    mut alpha: i32,
    beta: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    if ctx.deadline_expired() {
        return TIME_OUT;
    }
    ctx.qnodes += 1;

    if ply >= MAX_PLY {
        return evaluate(board);
    }

    let hash = board.hash();
    if let Some((score, _)) = ctx.tt.probe(hash, 0, alpha, beta, ply) {
        return score;
    }

    let stand_pat = evaluate(board);
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let us = board.side_to_move();
    let mut moves = generate_legal_moves(board);
    moves.retain(|&mv| is_tactical(board, mv));
    order_moves(board, &mut moves, None);

    let alpha_orig = alpha;
    let mut best_move = None;

    for mv in moves {
        let undo = board.apply(mv);
        board.set_side_to_move(us.flip());
        let score = -quiescence(board, ply + 1, -beta, -alpha, ctx);
        board.undo(undo);

        if ctx.timed_out {
            return TIME_OUT;
        }

        if score >= beta {
            ctx.tt.store(hash, 0, beta, Bound::Lower, Some(mv), ply);
            return beta;
        }
        if score > alpha {
            alpha = score;
            best_move = Some(mv);
        }
    }

    let bound = if alpha > alpha_orig {
        Bound::Exact
    } else {
        Bound::Upper
    };
    ctx.tt.store(hash, 0, alpha, bound, best_move, ply);
    alpha
}
