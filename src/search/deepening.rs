//! The recursive alpha-beta node with internal iterative deepening.

use super::{ordering, Engine, SearchTimeout};
use crate::board::{Board, Move};
use crate::eval::{Evaluator, MATE_EVALUATION};

/// Score subtracted from moves left unexplored by a beta cutoff, pushing
/// them behind every explored move when the next pass re-sorts.
const CUTOFF_PENALTY: f32 = 1000.0;

/// Interior passes start at this depth when a node deepens internally.
const INNER_MIN_DEPTH: u32 = 3;

impl<E: Evaluator> Engine<E> {
    /// Search `board` to `max_depth` plies within the `(master_alpha,
    /// master_beta)` window, returning the principal variation and its
    /// White-positive score.
    ///
    /// White maximizes and Black minimizes over the same score axis. The
    /// node deepens over its own move list, re-sorting by the previous
    /// pass's scores; the final pass runs inside the caller's window, so a
    /// cutoff there returns immediately.
    pub(crate) fn find_move(
        &mut self,
        board: &mut Board,
        max_depth: u32,
        master_alpha: f32,
        master_beta: f32,
        is_root: bool,
    ) -> Result<(Vec<Move>, f32), SearchTimeout> {
        self.nodes += 1;
        self.check_timeout()?;

        let is_white = board.white_to_move();
        let sign: f32 = if is_white { 1.0 } else { -1.0 };
        let optimum = sign * f32::INFINITY;
        let anti_optimum = -optimum;

        if max_depth == self.evaluator.horizon() {
            return Ok((Vec::new(), self.evaluator.evaluate(board)));
        }

        if !is_root {
            if let Some(outcome) = board.check_game_over() {
                // Mate scores grow with remaining depth, so nearer mates
                // dominate deeper ones.
                let score = outcome.sign() * (MATE_EVALUATION + max_depth as f32);
                return Ok((Vec::new(), score));
            }
        }

        let mut scored: Vec<(f32, Move)> = ordering::ordered_moves(board)
            .into_iter()
            .map(|mv| (anti_optimum, mv))
            .collect();

        let mut best_line = Vec::new();
        let mut best_result = anti_optimum;

        let min_depth = if is_root || max_depth >= 4 {
            INNER_MIN_DEPTH.min(max_depth)
        } else {
            max_depth
        };

        for depth in min_depth..=max_depth {
            let mut alpha = master_alpha;
            let mut beta = master_beta;
            best_result = anti_optimum;

            // Previous pass's scores steer this pass: best-so-far first for
            // the side to move.
            if is_white {
                scored.sort_by(|a, b| b.0.total_cmp(&a.0));
            } else {
                scored.sort_by(|a, b| a.0.total_cmp(&b.0));
            }

            for i in 0..scored.len() {
                let mv = scored[i].1;
                board.push(mv);
                let child = self.find_move(board, depth - 1, alpha, beta, false);
                board.pop();
                let (line, evaluation) = child?;
                scored[i].0 = evaluation;

                if is_white {
                    if evaluation > best_result {
                        best_result = evaluation;
                        best_line = prepend(mv, line);
                    }
                    alpha = alpha.max(evaluation);
                } else {
                    if evaluation < best_result {
                        best_result = evaluation;
                        best_line = prepend(mv, line);
                    }
                    beta = beta.min(evaluation);
                }

                if beta <= alpha {
                    if depth == max_depth {
                        return Ok((best_line, best_result));
                    }
                    // Killer bookkeeping: retry the cutting move first next
                    // pass, and demote the moves this cutoff skipped so
                    // their stale scores are not trusted.
                    scored[i].0 = optimum;
                    for entry in scored.iter_mut().skip(i + 1) {
                        entry.0 -= sign * CUTOFF_PENALTY;
                    }
                    break;
                }
            }
        }

        Ok((best_line, best_result))
    }
}

fn prepend(mv: Move, mut line: Vec<Move>) -> Vec<Move> {
    line.insert(0, mv);
    line
}
