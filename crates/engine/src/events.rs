//! Event channel between a game and its host.

use serde::{Deserialize, Serialize};
use versus_core::Piece;

use crate::clear::ClearInfo;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverCause {
    /// No room for the next piece, even one row up.
    BlockOut,
    /// A piece locked entirely inside the hidden rows.
    LockOut,
    /// Incoming garbage pushed blocks past the top row.
    GarbageOverflow,
}

/// Queued by the game and drained by the host with `Game::drain_events`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { piece: Piece },
    Locked(ClearInfo),
    /// Rows routed to the opponent after offsetting.
    AttackSent { lines: u32 },
    GarbageQueued { lines: u32, pending: u32 },
    GarbageApplied { lines: u32, hole: usize },
    GameOver { cause: GameOverCause },
}
