//! Iterative-deepening alpha-beta search under a wall-clock budget.
//!
//! [`Engine::choose_move`] runs [`find_move`](Engine) at increasing depth
//! until the budget runs out, keeping the result of the deepest fully
//! completed depth. Inside a node the search deepens again over its own move
//! list, re-sorting moves by the previous pass's scores so that cutoffs
//! arrive early; a beta cutoff marks the cutting move as a killer and
//! penalises the moves it left unexplored.

mod deepening;
mod ordering;

use std::fmt;
use std::time::{Duration, Instant};

use crate::board::{Board, Move};
use crate::eval::{Evaluator, PositionalEvaluator};

/// Depth cap for the root iterative deepening loop.
pub const MAX_DEPTH: u32 = 12;

/// Slice of the budget reserved for unwinding and returning a result.
pub(crate) const TIMEOUT_SLACK: Duration = Duration::from_millis(10);

const DEFAULT_SEARCH_SEED: u64 = 0xF1A7_C4E7;

/// Raised inside the search when the budget expires; unwinds to
/// [`Engine::choose_move`], which answers with the best completed depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SearchTimeout;

impl fmt::Display for SearchTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "search ran out of time")
    }
}

impl std::error::Error for SearchTimeout {}

/// The outcome of one search: the chosen move, its line and bookkeeping.
#[derive(Clone, Debug)]
pub struct SearchReport {
    /// The move to play; always the first element of `pv`.
    pub best_move: Move,
    /// Principal variation, best play for both sides from the root.
    pub pv: Vec<Move>,
    /// Score of the principal variation, White-positive.
    pub score: f32,
    /// Nodes visited during this search.
    pub nodes: u64,
    /// Depths whose root sweep fully completed, in increasing order.
    pub achieved_depths: Vec<u32>,
}

/// A search instance wrapping an evaluator.
///
/// One engine serves one game; it must not be shared between threads or
/// asked to search concurrently. Node and depth totals accumulate across
/// searches for game-level statistics.
pub struct Engine<E: Evaluator> {
    pub(crate) evaluator: E,
    max_depth: u32,
    seed: u64,
    pub(crate) deadline: Instant,
    pub(crate) nodes: u64,
    total_nodes: u64,
    total_depth: u64,
}

impl<E: Evaluator> Engine<E> {
    #[must_use]
    pub fn new(evaluator: E) -> Self {
        Engine {
            evaluator,
            max_depth: MAX_DEPTH,
            seed: DEFAULT_SEARCH_SEED,
            deadline: Instant::now(),
            nodes: 0,
            total_nodes: 0,
            total_depth: 0,
        }
    }

    /// Fix the evaluator noise seed, for reproducible searches.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Lower the depth cap, mainly for tests and benchmarks.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Nodes visited over the engine's lifetime.
    #[must_use]
    pub fn total_nodes(&self) -> u64 {
        self.total_nodes
    }

    /// Sum of the deepest completed depth of every search so far.
    #[must_use]
    pub fn total_depth(&self) -> u64 {
        self.total_depth
    }

    /// Pick a move for the side to move, spending at most `budget` of wall
    /// clock time.
    ///
    /// The caller's board is deep-copied; the search never mutates it. The
    /// search deepens from the evaluator's horizon up to the depth cap and
    /// returns the deepest fully completed result, `None` only when the
    /// position has no legal moves or not even the first depth fit in the
    /// budget.
    pub fn choose_move(&mut self, board: &Board, budget: Duration) -> Option<SearchReport> {
        let mut board = board.clone();
        self.deadline = Instant::now() + budget.saturating_sub(TIMEOUT_SLACK);
        self.nodes = 0;
        self.evaluator.reseed(self.seed);

        if board.legal_moves().is_empty() {
            return None;
        }

        let mut achieved_depths = Vec::new();
        let mut best: Option<(Vec<Move>, f32)> = None;

        let first_depth = self.evaluator.horizon() + 1;
        for depth in first_depth..=self.max_depth {
            match self.find_move(&mut board, depth, f32::NEG_INFINITY, f32::INFINITY, true) {
                Ok((line, score)) => {
                    log::debug!(
                        "depth {depth}: score {score:.3}, {} nodes, pv {}",
                        self.nodes,
                        format_line(&line),
                    );
                    achieved_depths.push(depth);
                    best = Some((line, score));
                }
                Err(SearchTimeout) => break,
            }
        }

        self.total_nodes += self.nodes;
        self.total_depth += u64::from(achieved_depths.last().copied().unwrap_or(0));

        let (pv, score) = best?;
        Some(SearchReport {
            best_move: *pv.first().expect("completed search with an empty line"),
            pv,
            score,
            nodes: self.nodes,
            achieved_depths,
        })
    }

    #[inline]
    pub(crate) fn check_timeout(&self) -> Result<(), SearchTimeout> {
        if Instant::now() >= self.deadline {
            Err(SearchTimeout)
        } else {
            Ok(())
        }
    }
}

fn format_line(line: &[Move]) -> String {
    line.iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pick a move with the default positional evaluator.
///
/// Convenience wrapper for one-off calls; games should hold on to an
/// [`Engine`] instead.
#[must_use]
pub fn choose_move(board: &Board, budget: Duration) -> Option<Move> {
    Engine::new(PositionalEvaluator::new())
        .choose_move(board, budget)
        .map(|report| report.best_move)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::TacticalEvaluator;

    fn engine() -> Engine<PositionalEvaluator> {
        Engine::new(PositionalEvaluator::new())
    }

    const TEST_BUDGET: Duration = Duration::from_millis(500);

    #[test]
    fn returns_a_legal_move_from_the_start_position() {
        let board = Board::new();
        let report = engine().choose_move(&board, TEST_BUDGET).unwrap();
        let mut check = board.clone();
        assert!(check.legal_moves().contains(report.best_move));
        assert!(report.nodes > 0);
    }

    #[test]
    fn finds_mate_in_one() {
        let board = Board::from_fen("4k3/1R4p1/3KP2p/p7/8/6r1/PP6/8 w - - 1 2");
        let report = engine().choose_move(&board, TEST_BUDGET).unwrap();
        assert_eq!(report.best_move.to_string(), "b7b8");
    }

    #[test]
    fn pv_starts_with_the_chosen_move() {
        let board = Board::new();
        let report = engine().choose_move(&board, TEST_BUDGET).unwrap();
        assert_eq!(report.pv[0], report.best_move);
    }

    #[test]
    fn achieved_depths_form_a_prefix_from_one() {
        let board = Board::new();
        let report = engine()
            .with_max_depth(4)
            .choose_move(&board, Duration::from_secs(30))
            .unwrap();
        let expected: Vec<u32> = (1..=report.achieved_depths.len() as u32).collect();
        assert_eq!(report.achieved_depths, expected);
    }

    #[test]
    fn searches_are_deterministic_under_a_fixed_seed() {
        let board =
            Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
        // Depth-capped so both runs finish well inside the budget.
        let first = Engine::new(PositionalEvaluator::new())
            .with_seed(99)
            .with_max_depth(4)
            .choose_move(&board, Duration::from_secs(30))
            .unwrap();
        let second = Engine::new(PositionalEvaluator::new())
            .with_seed(99)
            .with_max_depth(4)
            .choose_move(&board, Duration::from_secs(30))
            .unwrap();
        assert_eq!(first.pv, second.pv);
        assert_eq!(first.nodes, second.nodes);
    }

    #[test]
    fn no_move_is_returned_without_legal_moves() {
        // Stalemate: Black to move has nothing.
        let board = Board::from_fen("k7/8/1Q6/8/8/8/8/4K3 b - - 0 1");
        assert!(engine().choose_move(&board, TEST_BUDGET).is_none());
    }

    #[test]
    fn tactical_evaluator_starts_one_ply_early() {
        let board = Board::from_fen("4k3/1R4p1/3KP2p/p7/8/6r1/PP6/8 w - - 1 2");
        let report = Engine::new(TacticalEvaluator::new())
            .choose_move(&board, TEST_BUDGET)
            .unwrap();
        assert_eq!(report.achieved_depths.first(), Some(&2));
        assert_eq!(report.best_move.to_string(), "b7b8");
    }

    #[test]
    fn prefers_the_shorter_mate() {
        // Both a slow and an instant mate exist; depth-inflated mate scores
        // make the search take the instant one.
        let board = Board::from_fen("2K5/k7/8/8/1Q6/8/8/N7 w - - 105 195");
        let report = engine().choose_move(&board, TEST_BUDGET).unwrap();
        let uci = report.best_move.to_string();
        assert!(uci == "b4b7" || uci == "b4a5", "got {uci}");
    }
}
