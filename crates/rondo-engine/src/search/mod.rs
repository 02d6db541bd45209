//! Iterative-deepening search driver.

pub mod draw;
pub mod negamax;
pub mod ordering;
pub mod tt;

use std::time::Instant;

use tracing::debug;

use rondo_core::{Board, Move, generate_legal_moves, in_check};

use draw::DrawContext;
use negamax::{INF, SearchContext, negamax};
use ordering::order_moves;
use tt::{Bound, TranspositionTable};

pub use negamax::{MATE, MATE_THRESHOLD, TIME_OUT};

/// Result of one search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Best move found; `None` only when the position has no legal moves.
    pub best_move: Option<Move>,
    /// Score in centipawns from the mover's perspective (mate scores are
    /// `±(MATE − k)`).
    pub score: i32,
    /// Deepest fully completed iteration (0 if even depth 1 was cut short).
    pub depth_reached: u32,
    /// Nodes visited in the main search.
    pub nodes: u64,
    /// Nodes visited in quiescence.
    pub qnodes: u64,
}

/// Iterative-deepening searcher owning the transposition table.
///
/// One instance lives for the lifetime of the engine; the table persists
/// across searches so later searches inherit earlier work.
pub struct Searcher {
    tt: TranspositionTable,
}

impl Searcher {
    /// Create a searcher with the default transposition table size.
    pub fn new() -> Self {
        Self {
            tt: TranspositionTable::new(TranspositionTable::DEFAULT_ENTRIES),
        }
    }

    /// Create a searcher with a table of `entries` slots (rounded up to a
    /// power of two). Small tables keep tests fast.
    pub fn with_tt_entries(entries: usize) -> Self {
        Self {
            tt: TranspositionTable::new(entries),
        }
    }

    /// Clear the transposition table, keeping its allocation.
    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// Search to a fixed depth with no deadline and a fresh draw context.
    pub fn search_fixed(&mut self, board: &mut Board, depth: u32) -> SearchOutcome {
        self.search_root(board, depth, None, DrawContext::default())
    }

    /// Iterative-deepening search up to `max_depth`, aborting at `deadline`.
    ///
    /// When the deadline fires mid-iteration the best move of the last
    /// completed depth is returned; if not even depth 1 completed, the best
    /// move examined so far is returned, so a legal move is always produced
    /// when one exists.
    pub fn search_timed(
        &mut self,
        board: &mut Board,
        max_depth: u32,
        deadline: Instant,
        draw: DrawContext,
    ) -> SearchOutcome {
        self.search_root(board, max_depth, Some(deadline), draw)
    }

    fn search_root(
        &mut self,
        board: &mut Board,
        max_depth: u32,
        deadline: Option<Instant>,
        draw: DrawContext,
    ) -> SearchOutcome {
        let mut ctx = SearchContext {
            tt: &mut self.tt,
            deadline,
            draw,
            nodes: 0,
            qnodes: 0,
            timed_out: false,
        };

        let root_moves = generate_legal_moves(board);
        if root_moves.is_empty() {
            let us = board.side_to_move();
            return SearchOutcome {
                best_move: None,
                score: if in_check(board, us) { -MATE } else { 0 },
                depth_reached: 0,
                nodes: 0,
                qnodes: 0,
            };
        }

        let root_hash = board.hash();
        let us = board.side_to_move();
        // Seeded with the first root move so a deadline that fires before
        // any score lands still leaves a legal reply.
        let mut outcome = SearchOutcome {
            best_move: Some(root_moves[0]),
            score: 0,
            depth_reached: 0,
            nodes: 0,
            qnodes: 0,
        };

        for depth in 1..=max_depth {
            let mut moves = root_moves.clone();
            order_moves(board, &mut moves, ctx.tt.peek_best_move(root_hash));

            let mut alpha = -INF;
            let beta = INF;
            let mut iteration_best: Option<Move> = None;

            for mv in moves {
                let undo = board.apply(mv);
                board.set_side_to_move(us.flip());
                let score = -negamax(board, depth as i32 - 1, 1, -beta, -alpha, &mut ctx);
                board.undo(undo);

                if ctx.timed_out {
                    break;
                }
                if score > alpha {
                    alpha = score;
                    iteration_best = Some(mv);
                }
            }

            if ctx.timed_out {
                // Keep the last completed depth; a partially examined depth-1
                // pass still surfaces whatever it found.
                if outcome.depth_reached == 0
                    && let Some(best) = iteration_best
                {
                    outcome.best_move = Some(best);
                    outcome.score = alpha;
                }
                debug!(depth, "search aborted by deadline");
                break;
            }

            outcome.best_move = iteration_best.or(outcome.best_move);
            outcome.score = alpha;
            outcome.depth_reached = depth;
            if let Some(best) = iteration_best {
                ctx.tt
                    .store(root_hash, depth as i32, alpha, Bound::Exact, Some(best), 0);
            }
            debug!(
                depth,
                score = alpha,
                nodes = ctx.nodes,
                qnodes = ctx.qnodes,
                best = %outcome.best_move.map(|m| m.to_uci()).unwrap_or_default(),
                "iteration complete"
            );
        }

        outcome.nodes = ctx.nodes;
        outcome.qnodes = ctx.qnodes;
        debug_assert_eq!(board.hash(), board.recompute_hash());
        outcome
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher").field("tt", &self.tt).finish()
    }
}
