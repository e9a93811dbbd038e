//! Planner-facing snapshot of one player's game.

use crate::{Board, Piece};
use serde::{Deserialize, Serialize};

/// Owned copy of everything the planner needs. Taken at request time so a
/// search never observes the live game.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub current: Piece,
    pub hold: Option<Piece>,
    pub can_hold: bool,
    /// Preview queue, next piece first.
    pub queue: Vec<Piece>,
}

impl Snapshot {
    pub fn new(board: Board, current: Piece, queue: Vec<Piece>) -> Self {
        Self {
            board,
            current,
            hold: None,
            can_hold: true,
            queue,
        }
    }

    /// Piece that becomes active after a hold, if holding is possible.
    pub fn hold_alternative(&self) -> Option<Piece> {
        if !self.can_hold {
            return None;
        }
        self.hold.or_else(|| self.queue.first().copied())
    }

    /// Queue offset for plies after the first move: stashing into an empty
    /// hold slot consumes the first preview piece.
    pub fn queue_offset_after(&self, used_hold: bool) -> usize {
        usize::from(used_hold && self.hold.is_none())
    }
}
