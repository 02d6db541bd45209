//! End-to-end search behaviour: whole games, deadlines, mate distances.

use std::time::{Duration, Instant};

use rondo_core::{Board, generate_legal_moves, in_check};
use rondo_engine::{DrawContext, MATE, MATE_THRESHOLD, Searcher};

#[test]
fn engine_plays_a_legal_self_play_game() {
    let mut board = Board::starting_position();
    let mut searcher = Searcher::with_tt_entries(1 << 16);
    let mut history = vec![board.hash()];

    for ply in 0..40u32 {
        let legal = generate_legal_moves(&board);
        if legal.is_empty() {
            break;
        }

        let repetitions = history.iter().filter(|&&h| h == board.hash()).count() as u32;
        let draw = DrawContext {
            current_ply: ply,
            max_plies: None,
            repetition_count: repetitions,
        };
        let deadline = Instant::now() + Duration::from_millis(200);
        let outcome = searcher.search_timed(&mut board, 5, deadline, draw);

        let mv = outcome.best_move.expect("legal moves exist");
        assert!(legal.contains(&mv), "engine chose illegal {mv} at ply {ply}");

        let mover = board.side_to_move();
        board.apply(mv);
        board.set_side_to_move(mover.flip());
        history.push(board.hash());
        assert_eq!(board.hash(), board.recompute_hash(), "hash drift at ply {ply}");
    }
}

#[test]
fn mate_score_shrinks_as_the_mate_gets_closer() {
    // Rook ladder: after the best reply the mate is one full move nearer.
    let mut board: Board = "7k/8/R7/8/8/8/8/1R2K3 w - - 0 1".parse().unwrap();
    let mut searcher = Searcher::with_tt_entries(1 << 16);

    let at_root = searcher.search_fixed(&mut board, 5);
    assert_eq!(at_root.score, MATE - 3);

    // Play the mating line's first move and the forced reply.
    let mv = at_root.best_move.unwrap();
    let mover = board.side_to_move();
    board.apply(mv);
    board.set_side_to_move(mover.flip());

    let reply = searcher.search_fixed(&mut board, 5);
    assert_eq!(reply.score, -(MATE - 2), "defender sees mate against them");
}

#[test]
fn fixed_and_timed_agree_given_enough_time() {
    let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
    let mut board_a: Board = fen.parse().unwrap();
    let mut board_b: Board = fen.parse().unwrap();

    let fixed = Searcher::with_tt_entries(1 << 16).search_fixed(&mut board_a, 3);
    let timed = Searcher::with_tt_entries(1 << 16).search_timed(
        &mut board_b,
        3,
        Instant::now() + Duration::from_secs(30),
        DrawContext::default(),
    );

    assert_eq!(fixed.best_move, timed.best_move);
    assert_eq!(fixed.score, timed.score);
    assert_eq!(fixed.depth_reached, timed.depth_reached);
}

#[test]
fn tight_deadline_caps_the_depth_but_not_legality() {
    let mut board: Board = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
        .parse()
        .unwrap();
    let legal = generate_legal_moves(&board);

    let outcome = Searcher::with_tt_entries(1 << 16).search_timed(
        &mut board,
        64,
        Instant::now() + Duration::from_millis(50),
        DrawContext::default(),
    );

    assert!(outcome.depth_reached < 64);
    assert!(legal.contains(&outcome.best_move.unwrap()));
}

#[test]
fn engine_escapes_check_correctly() {
    let mut board: Board = "4k3/8/8/8/8/8/4r3/4K3 w - - 0 1".parse().unwrap();
    assert!(in_check(&board, board.side_to_move()));
    let outcome = Searcher::with_tt_entries(1 << 14).search_fixed(&mut board, 3);
    let mv = outcome.best_move.unwrap();

    let mover = board.side_to_move();
    board.apply(mv);
    board.set_side_to_move(mover.flip());
    assert!(!in_check(&board, mover), "chosen move must leave check");
}

#[test]
fn score_threshold_separates_mates_from_material() {
    let mut mate: Board = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4"
        .parse()
        .unwrap();
    let mate_outcome = Searcher::with_tt_entries(1 << 14).search_fixed(&mut mate, 2);
    assert!(mate_outcome.score > MATE_THRESHOLD);

    let mut material: Board = "4k3/8/8/3q4/8/8/8/3QK3 w - - 0 1".parse().unwrap();
    let material_outcome = Searcher::with_tt_entries(1 << 14).search_fixed(&mut material, 3);
    assert!(material_outcome.score < MATE_THRESHOLD);
    assert!(material_outcome.score > 0);
}
