//! One-ply tactical extension of the positional evaluator.

use super::{piece_value, Evaluator, PositionalEvaluator, MATE_EVALUATION};
use crate::board::Board;

/// Weight of the best immediate gain in the final score.
const GAIN_WEIGHT: f32 = 0.7;

/// Extra gain credited for a pawn reaching the promotion rank.
const PROMOTION_GAIN: f32 = 8.0;

/// Positional evaluation sharpened by the best immediate capture or
/// promotion available to the side to move.
///
/// Because this already looks one move ahead, the search applies it one ply
/// before its own horizon (`horizon() == 1`). A move that mates on the spot
/// short-circuits the scan.
#[derive(Clone, Debug, Default)]
pub struct TacticalEvaluator {
    positional: PositionalEvaluator,
}

impl TacticalEvaluator {
    #[must_use]
    pub fn new() -> Self {
        TacticalEvaluator {
            positional: PositionalEvaluator::new(),
        }
    }
}

impl Evaluator for TacticalEvaluator {
    fn evaluate(&mut self, board: &mut Board) -> f32 {
        let side_sign = if board.white_to_move() { 1.0 } else { -1.0 };

        let moves = board.legal_moves();
        if moves.is_empty() {
            // Mated or stalemated without a search around it.
            return if board.is_check() {
                -side_sign * MATE_EVALUATION
            } else {
                0.0
            };
        }

        let mut max_gain = 0.0f32;
        for &mv in moves.iter() {
            let mut gain = board.piece_type_at(mv.to).map_or(0.0, piece_value);
            if mv.promotion.is_some() {
                gain += PROMOTION_GAIN;
            }
            max_gain = max_gain.max(gain);

            board.push(mv);
            let mates = board.is_check() && !board.has_legal_moves();
            board.pop();
            if mates {
                return side_sign * MATE_EVALUATION;
            }
        }

        self.positional.evaluate(board) + side_sign * GAIN_WEIGHT * max_gain
    }

    fn horizon(&self) -> u32 {
        1
    }

    fn reseed(&mut self, seed: u64) {
        self.positional.reseed(seed);
    }
}
