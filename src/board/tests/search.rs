//! Search algorithm tests.
//!
//! Tests for mate detection, terminal positions, result invariants under
//! ordering and caching toggles, repetition scope and cancellation.

use std::time::{Duration, Instant};

use crate::board::search::{
    find_best_move, search, SearchLimits, SearchParams, SearchResult, SearchState, MATE_SCORE,
};
use crate::board::{Board, Color, Piece, RepetitionScope};
use crate::sync::StopFlag;

const MATE_IN_ONE: &str = "1k6/p6p/K6P/8/8/8/8/1q4q1 b - - 0 1";
const BACK_RANK: &str = "6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1";
const PAWN_ENDGAME: &str = "8/8/8/3k4/8/8/3PK3/8 w - - 0 1";

const MIDDLEGAMES: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
];

fn params_without_tt() -> SearchParams {
    SearchParams {
        hash_mb: 1,
        use_transposition_table: false,
        ..SearchParams::default()
    }
}

fn run(fen: &str, params: SearchParams, depth: u32) -> SearchResult {
    let mut board = Board::from_fen(fen);
    let mut state = SearchState::new(params);
    find_best_move(&mut board, &mut state, depth)
}

/// Replay the PV from `fen`, asserting every move is legal.
fn assert_pv_legal(fen: &str, result: &SearchResult) {
    let mut board = Board::from_fen(fen);
    for mv in &result.pv {
        assert!(
            board.generate_moves().contains(*mv),
            "PV move {mv} illegal in {}",
            board.to_fen()
        );
        board.make_move(*mv);
    }
}

// ============================================================================
// Mate and terminal positions
// ============================================================================

#[test]
fn finds_queen_mate_in_one() {
    let mut board = Board::from_fen(MATE_IN_ONE);
    let mut state = SearchState::default();
    let result = find_best_move(&mut board, &mut state, 3);

    let best = result.best_move.expect("a move");
    assert_eq!(best.piece(), Piece::Queen);
    assert_eq!(result.score, MATE_SCORE - 1);
    assert_eq!(result.mate_in(), Some(1));
    assert_eq!(result.pv.first(), Some(&best));

    board.make_move(best);
    assert!(board.is_checkmate());
}

#[test]
fn finds_back_rank_mate() {
    let result = run(BACK_RANK, SearchParams::default(), 4);
    assert_eq!(result.best_move.map(|m| m.to_string()), Some("e1e8".to_string()));
    assert_eq!(result.mate_in(), Some(1));
}

#[test]
fn horizon_mate_needs_check_evasions() {
    let with = run(MATE_IN_ONE, SearchParams::default(), 1);
    assert_eq!(with.mate_in(), Some(1));

    let without = run(
        MATE_IN_ONE,
        SearchParams {
            quiescence_check_evasions: false,
            ..SearchParams::default()
        },
        1,
    );
    assert_eq!(without.mate_in(), None);
    assert_eq!(run(MATE_IN_ONE, params_without_tt(), 2).mate_in(), Some(1));
}

#[test]
fn stalemate_root_scores_draw_with_empty_pv() {
    let result = run("k7/8/1QK5/8/8/8/8/8 b - - 0 1", SearchParams::default(), 4);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, 0);
    assert!(result.pv.is_empty());
}

#[test]
fn checkmated_root_scores_mate() {
    let result = run("7k/7Q/7K/8/8/8/8/8 b - - 0 1", SearchParams::default(), 4);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, -MATE_SCORE);
    assert_eq!(result.mate_in(), Some(0));
}

#[test]
fn being_mated_is_reported_negative() {
    // Black to move; every reply allows Qe8#
    let result = run("6k1/5ppp/8/8/8/8/8/4Q2K b - - 0 1", params_without_tt(), 3);
    assert!(result.score < 0);
    if let Some(moves) = result.mate_in() {
        assert!(moves < 0);
    }
}

#[test]
fn wins_hanging_queen() {
    let fen = "4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1";
    let result = run(fen, SearchParams::default(), 3);
    assert_eq!(result.best_move.map(|m| m.to_string()), Some("d1d5".to_string()));
    assert!(result.score > 300);
    assert_pv_legal(fen, &result);
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn ordering_heuristics_do_not_change_result() {
    for fen in MIDDLEGAMES {
        let base = params_without_tt();
        let plain = SearchParams {
            use_killers: false,
            use_history: false,
            aspiration_window: 0,
            ..base.clone()
        };
        let full = run(fen, base, 3);
        let bare = run(fen, plain, 3);
        assert_eq!(full.score, bare.score, "{fen}");
        assert_eq!(full.best_move, bare.best_move, "{fen}");
        assert_eq!(full.depth, bare.depth);
    }
}

#[test]
fn transposition_table_does_not_change_result() {
    for (fen, depth) in [
        (MATE_IN_ONE, 6),
        (BACK_RANK, 6),
        (MIDDLEGAMES[0], 3),
        (MIDDLEGAMES[2], 3),
        // King walks transpose heavily, so shallow nodes meet entries stored deeper.
        (PAWN_ENDGAME, 7),
    ] {
        let with_tt = run(fen, SearchParams::default(), depth);
        let without = run(fen, params_without_tt(), depth);
        assert_eq!(with_tt.score, without.score, "{fen} depth {depth}");
        assert_eq!(with_tt.best_move, without.best_move, "{fen} depth {depth}");
    }
}

#[test]
fn search_is_deterministic_and_restores_board() {
    let fen = MIDDLEGAMES[1];
    let mut board = Board::from_fen(fen);
    let original = board.clone();
    let first = find_best_move(&mut board, &mut SearchState::default(), 3);
    assert_eq!(board, original);
    let second = find_best_move(&mut board, &mut SearchState::default(), 3);
    assert_eq!(first, second);
    assert_pv_legal(fen, &first);
}

#[test]
fn custom_evaluator_is_used() {
    let mut board = Board::new();
    let mut state = SearchState::with_evaluator(params_without_tt(), |_: &Board| 42);
    let result = find_best_move(&mut board, &mut state, 2);
    assert_eq!(result.score, 42);
}

// ============================================================================
// Repetition scope
// ============================================================================

fn black_favoured(board: &Board) -> i32 {
    if board.side_to_move() == Color::White {
        -300
    } else {
        300
    }
}

fn after_shuffle() -> Board {
    let mut board = Board::new();
    for text in ["g1f3", "g8f6", "f3g1", "f6g8"] {
        board.make_move_str(text).unwrap();
    }
    board
}

#[test]
fn game_scope_sees_earlier_repetition() {
    let mut board = after_shuffle();
    let mut state = SearchState::with_evaluator(params_without_tt(), black_favoured);
    let result = find_best_move(&mut board, &mut state, 1);
    assert_eq!(result.score, 0);
    assert_eq!(result.best_move.map(|m| m.to_string()), Some("g1f3".to_string()));
}

#[test]
fn search_tree_scope_ignores_earlier_repetition() {
    let mut board = after_shuffle();
    let params = SearchParams {
        repetition_scope: RepetitionScope::SearchTree,
        ..params_without_tt()
    };
    let mut state = SearchState::with_evaluator(params, black_favoured);
    let result = find_best_move(&mut board, &mut state, 1);
    assert_eq!(result.score, -300);
}

// ============================================================================
// Limits and cancellation
// ============================================================================

#[test]
fn preset_stop_still_completes_depth_one() {
    let mut board = Board::new();
    let mut state = SearchState::default();
    let limits = SearchLimits::depth(10).with_stop(StopFlag::stopped());
    let result = search(&mut board, &mut state, &limits);
    assert_eq!(result.depth, 1);
    assert!(result.best_move.is_some());
}

#[test]
fn node_limit_stops_search() {
    let mut board = Board::new();
    let mut state = SearchState::default();
    let limits = SearchLimits::depth(30).with_nodes(2_000);
    let result = search(&mut board, &mut state, &limits);
    assert!(result.best_move.is_some());
    assert!(result.depth >= 1 && result.depth < 30);
    assert_eq!(board, Board::new());
}

#[test]
fn move_time_is_respected() {
    let mut board = Board::from_fen(MIDDLEGAMES[1]);
    let mut state = SearchState::default();
    let start = Instant::now();
    let result = search(
        &mut board,
        &mut state,
        &SearchLimits::move_time(Duration::from_millis(100)),
    );
    assert!(result.best_move.is_some());
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[test]
fn depth_request_is_clamped() {
    let mut board = Board::new();
    let mut state = SearchState::new(SearchParams {
        max_depth: 2,
        ..SearchParams::default()
    });
    let result = search(&mut board, &mut state, &SearchLimits::depth(0));
    assert_eq!(result.depth, 1);
    let result = search(&mut board, &mut state, &SearchLimits::depth(9));
    assert_eq!(result.depth, 2);
}
