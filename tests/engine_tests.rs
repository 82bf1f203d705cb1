//! Public-API integration tests for the search engine.

use std::time::Duration;

use fianchetto::game::{Game, Player, RandomPlayer};
use fianchetto::search::Engine;
use fianchetto::{choose_move, Board, MaterialEvaluator, Outcome, PositionalEvaluator};

#[test]
fn the_convenience_function_returns_a_legal_move() {
    let board = Board::new();
    let mv = choose_move(&board, Duration::from_millis(200)).unwrap();
    let mut check = board.clone();
    assert!(check.legal_moves().contains(mv));
}

#[test]
fn the_callers_board_is_never_mutated() {
    let board =
        Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let fen_before = board.to_fen();
    let _ = choose_move(&board, Duration::from_millis(200));
    assert_eq!(board.to_fen(), fen_before);
}

#[test]
fn a_material_engine_still_finds_a_move() {
    let board = Board::new();
    let mut engine = Engine::new(MaterialEvaluator::new());
    let report = engine.choose_move(&board, Duration::from_millis(200)).unwrap();
    let mut check = board.clone();
    assert!(check.legal_moves().contains(report.best_move));
}

#[test]
fn tight_budgets_still_complete_the_first_depth() {
    let board = Board::new();
    let mut engine = Engine::new(PositionalEvaluator::new());
    let report = engine.choose_move(&board, Duration::from_millis(60)).unwrap();
    assert!(!report.achieved_depths.is_empty());
    assert_eq!(report.achieved_depths[0], 1);
}

#[test]
fn engine_beats_random_from_the_start_position() {
    let engine = Engine::new(PositionalEvaluator::new());
    let mut game = Game::new(engine, RandomPlayer::new(42)).with_move_limit(120);
    let record = game
        .play(&Board::new().to_fen(), Duration::from_millis(100))
        .unwrap();
    assert_eq!(record.outcome, Some(Outcome::WhiteWin));
}

#[test]
fn players_report_names_for_game_records() {
    let engine = Engine::new(PositionalEvaluator::new());
    assert_eq!(Player::name(&engine), "fianchetto");
    assert_eq!(RandomPlayer::new(0).name(), "random");
}
