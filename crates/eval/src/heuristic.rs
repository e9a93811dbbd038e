//! Hand-tuned board heuristic, usable without a trained model.

use serde::{Deserialize, Serialize};
use versus_core::BoardWithHeights;

use crate::{EvalError, EvalInput, Evaluator};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    pub aggregate_height: f32,
    pub max_height: f32,
    pub holes: f32,
    pub bumpiness: f32,
    pub wells: f32,
    pub lines_cleared: f32,
    /// Deepest single-column well
    pub i_dependency: f32,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            aggregate_height: -0.5,
            max_height: -0.5,
            holes: -2.0,
            bumpiness: -0.1,
            wells: -0.1,
            lines_cleared: 1.0,
            i_dependency: -0.1,
        }
    }
}

/// Scores the board left after merging the candidate and removing full rows.
/// Raw output is already in score units, so pair it with identity
/// denormalization.
#[derive(Clone, Debug, Default)]
pub struct HeuristicEvaluator {
    pub weights: HeuristicWeights,
}

impl HeuristicEvaluator {
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, input: &EvalInput) -> f32 {
        let w = &self.weights;
        let mut board = input.merged_board();
        let lines = board.clear_lines();
        let heights = BoardWithHeights::new(&board);
        let (wells, deepest) = heights.wells();

        lines as f32 * w.lines_cleared
            + heights.aggregate_height() as f32 * w.aggregate_height
            + heights.max_height() as f32 * w.max_height
            + heights.holes() as f32 * w.holes
            + heights.bumpiness() as f32 * w.bumpiness
            + wells as f32 * w.wells
            + deepest as f32 * w.i_dependency
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate_batch(&self, inputs: &[EvalInput]) -> Result<Vec<f32>, EvalError> {
        Ok(inputs.iter().map(|input| self.score(input)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use versus_core::{Board, Piece, PiecePose, Rotation};

    #[test]
    fn test_empty_board_scores_zero() {
        let eval = HeuristicEvaluator::default();
        let input = EvalInput::from_board(&Board::new());
        assert_eq!(eval.score(&input), 0.0);
    }

    #[test]
    fn test_holes_are_penalized() {
        let eval = HeuristicEvaluator::default();
        let mut flat = Board::new();
        let mut holed = Board::new();
        for x in 1..Board::WIDTH {
            flat.set(x, 0, true);
            holed.set(x, 1, true);
        }
        let a = eval.score(&EvalInput::from_board(&flat));
        let b = eval.score(&EvalInput::from_board(&holed));
        assert!(a > b);
    }

    #[test]
    fn test_candidate_clearing_a_line_is_preferred() {
        let eval = HeuristicEvaluator::default();
        let mut board = Board::new();
        for x in 0..Board::WIDTH {
            if !(3..=6).contains(&x) {
                board.set(x, 0, true);
            }
        }
        let clearing = PiecePose::new(Piece::I, Rotation::North, 4, 0);
        let stacked = PiecePose::new(Piece::I, Rotation::North, 4, 1);
        let scores = eval
            .evaluate_batch(&[
                EvalInput::with_candidate(&board, &clearing),
                EvalInput::with_candidate(&board, &stacked),
            ])
            .expect("heuristic never fails");
        assert_eq!(scores.len(), 2);
        assert!(scores[0] > scores[1]);
    }
}
