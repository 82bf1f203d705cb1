//! Property-based board tests.

use proptest::prelude::*;
use rand::prelude::*;
use rand::Rng as _;

use crate::board::{Board, Square};

fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=30usize
}

/// Drive the board through `num_moves` random legal moves.
fn random_playout(board: &mut Board, seed: u64, num_moves: usize) -> usize {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pushed = 0;
    for _ in 0..num_moves {
        let moves = board.legal_moves();
        if moves.is_empty() {
            break;
        }
        board.push(moves[rng.gen_range(0..moves.len())]);
        pushed += 1;
    }
    pushed
}

proptest! {
    /// Popping every pushed move restores the full board state.
    #[test]
    fn prop_push_pop_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let initial_fen = board.to_fen();
        let initial_hash = board.hash();

        let pushed = random_playout(&mut board, seed, num_moves);
        for _ in 0..pushed {
            board.pop();
        }

        prop_assert_eq!(board.to_fen(), initial_fen);
        prop_assert_eq!(board.hash(), initial_hash);
        prop_assert_eq!(board.ply_depth(), 0);
    }

    /// The square-to-piece index matches occupancy after any playout.
    #[test]
    fn prop_pieces_map_matches_occupancy(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        random_playout(&mut board, seed, num_moves);

        for idx in 0..64 {
            let sq = Square::from_index(idx);
            prop_assert_eq!(
                board.pieces_map()[idx].is_some(),
                board.all_occupied.contains(sq),
                "mismatch at {}", sq
            );
            prop_assert_eq!(board.pieces_map()[idx], board.piece_type_at(sq));
        }
    }

    /// The incremental hash always equals the recomputed one.
    #[test]
    fn prop_hash_stays_consistent(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..num_moves {
            let moves = board.legal_moves();
            if moves.is_empty() {
                break;
            }
            board.push(moves[rng.gen_range(0..moves.len())]);
            prop_assert_eq!(board.hash(), board.calculate_hash());
        }
    }

    /// FEN round-trips through emit and parse.
    #[test]
    fn prop_fen_round_trips(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut board = Board::new();
        random_playout(&mut board, seed, num_moves);

        let fen = board.to_fen();
        let restored = Board::from_fen(&fen);
        prop_assert_eq!(restored.to_fen(), fen);
        prop_assert_eq!(restored.hash(), board.hash());
        prop_assert_eq!(restored.fullmove_number(), board.fullmove_number());
    }

    /// No legal move leaves the mover's own king in check.
    #[test]
    fn prop_legal_moves_never_self_check(seed in seed_strategy()) {
        let mut board = Board::new();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..10 {
            let moves = board.legal_moves();
            if moves.is_empty() {
                break;
            }
            let mover = board.turn();
            for &mv in moves.iter() {
                board.push(mv);
                prop_assert!(!board.is_in_check(mover), "self-check after {}", mv);
                board.pop();
            }
            board.push(moves[rng.gen_range(0..moves.len())]);
        }
    }
}
