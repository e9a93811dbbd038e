//! versus-search - beam search over landing candidates.

mod beam;

pub use beam::{BeamConfig, BeamSearch, Decision};

use thiserror::Error;
use versus_eval::EvalError;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("oracle failed: {0}")]
    Eval(#[from] EvalError),
}
