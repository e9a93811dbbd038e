//! Spin classification and the primitive input vocabulary.

use serde::{Deserialize, Serialize};

/// Spin classification of a lock. `Full` is the major spin, `Mini` the minor one.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum SpinType {
    #[default]
    None,
    Mini,
    Full,
}

/// One primitive input per tick, shared by players, planner and translator.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameAction {
    #[default]
    None,
    MoveLeft,
    MoveRight,
    RotateLeft,
    RotateRight,
    SoftDrop,
    StartSoftDrop,
    StopSoftDrop,
    Hold,
    HardDrop,
}

impl GameAction {
    pub fn is_rotation(self) -> bool {
        matches!(self, GameAction::RotateLeft | GameAction::RotateRight)
    }
}
