//! Landing candidates produced by move enumeration.

use smallvec::SmallVec;

use crate::{Board, GameAction, PiecePose, SpinType};

/// Input path from spawn to the resting pose, hard drop excluded.
pub type ActionPath = SmallVec<[GameAction; 16]>;

/// One distinct resting pose for a piece, with the board it leaves behind.
#[derive(Clone, Debug, PartialEq)]
pub struct LandingSpot {
    pub path: ActionPath,
    /// Board after placement and line removal.
    pub board_after: Board,
    pub lines_cleared: u8,
    pub spin: SpinType,
    pub score_delta: u64,
    pub used_hold: bool,
    pub pose: PiecePose,
    /// Set by the planner once the oracle has scored this spot.
    pub oracle_score: Option<f64>,
}

impl LandingSpot {
    pub fn uses_soft_drop(&self) -> bool {
        self.path.contains(&GameAction::SoftDrop)
    }

    pub fn with_oracle_score(mut self, score: f64) -> Self {
        self.oracle_score = Some(score);
        self
    }
}
