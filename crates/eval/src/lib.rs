//! versus-eval - position evaluation for the planner.
//!
//! An [`Evaluator`] scores a batch of encoded positions, one scalar per item,
//! in input order. Trained models plug in behind the trait; the crate ships a
//! heuristic that needs no model.

mod heuristic;
mod input;

pub use heuristic::{HeuristicEvaluator, HeuristicWeights};
pub use input::{
    queue_features, EvalInput, BOARD_PLANES, FEATURE_LEN, PLANE_LEN, QUEUE_FEATURE_PIECES,
    TENSOR_LEN,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("evaluator unavailable: {0}")]
    Unavailable(String),
    #[error("evaluator returned {got} scores for {expected} inputs")]
    BatchMismatch { expected: usize, got: usize },
}

/// Batched position oracle.
pub trait Evaluator: Send + Sync {
    fn evaluate_batch(&self, inputs: &[EvalInput]) -> Result<Vec<f32>, EvalError>;
}

impl<E: Evaluator + ?Sized> Evaluator for std::sync::Arc<E> {
    fn evaluate_batch(&self, inputs: &[EvalInput]) -> Result<Vec<f32>, EvalError> {
        (**self).evaluate_batch(inputs)
    }
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn evaluate_batch(&self, inputs: &[EvalInput]) -> Result<Vec<f32>, EvalError> {
        (**self).evaluate_batch(inputs)
    }
}

/// Affine map from raw oracle output back to score units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Denormalization {
    pub mean: f64,
    pub std: f64,
}

impl Denormalization {
    /// Constants the trained value model was normalized with.
    pub const MODEL: Self = Self {
        mean: -5432.1,
        std: 1234.5,
    };

    pub const IDENTITY: Self = Self {
        mean: 0.0,
        std: 1.0,
    };

    #[inline]
    pub fn apply(&self, raw: f32) -> f64 {
        raw as f64 * self.std + self.mean
    }
}

impl Default for Denormalization {
    fn default() -> Self {
        Self::MODEL
    }
}

/// Run the oracle and check it answered once per input.
pub fn evaluate_checked<E: Evaluator + ?Sized>(
    evaluator: &E,
    inputs: &[EvalInput],
) -> Result<Vec<f32>, EvalError> {
    let scores = evaluator.evaluate_batch(inputs)?;
    if scores.len() != inputs.len() {
        return Err(EvalError::BatchMismatch {
            expected: inputs.len(),
            got: scores.len(),
        });
    }
    Ok(scores)
}
