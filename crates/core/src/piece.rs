//! Piece types, rotation states and mino definitions (SRS, y grows upward).

use serde::{Deserialize, Serialize};

use crate::Board;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Piece {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    pub fn cw(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    pub fn ccw(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    /// Rotation state as 0..4, clockwise from spawn.
    pub fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }
}

impl Piece {
    pub const ALL: [Piece; 7] = [
        Piece::I,
        Piece::O,
        Piece::T,
        Piece::S,
        Piece::Z,
        Piece::J,
        Piece::L,
    ];

    /// Spawn column of the piece origin.
    pub const SPAWN_X: i8 = 4;
    /// Spawn row of the piece origin: the first hidden row.
    pub const SPAWN_Y: i8 = Board::VISIBLE_HEIGHT as i8;

    /// Get mino offsets for this piece at given rotation.
    /// Returns 4 (x, y) offsets relative to the rotation origin.
    pub fn minos(self, rot: Rotation) -> [(i8, i8); 4] {
        let idx = rot.index();
        match self {
            Piece::I => [
                [(-1, 0), (0, 0), (1, 0), (2, 0)],
                [(1, 1), (1, 0), (1, -1), (1, -2)],
                [(-1, -1), (0, -1), (1, -1), (2, -1)],
                [(0, 1), (0, 0), (0, -1), (0, -2)],
            ][idx],
            Piece::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            Piece::T => [
                [(-1, 0), (0, 0), (1, 0), (0, 1)],
                [(0, -1), (0, 0), (0, 1), (1, 0)],
                [(-1, 0), (0, 0), (1, 0), (0, -1)],
                [(0, -1), (0, 0), (0, 1), (-1, 0)],
            ][idx],
            Piece::S => [
                [(-1, 0), (0, 0), (0, 1), (1, 1)],
                [(0, 1), (0, 0), (1, 0), (1, -1)],
                [(-1, -1), (0, -1), (0, 0), (1, 0)],
                [(-1, 1), (-1, 0), (0, 0), (0, -1)],
            ][idx],
            Piece::Z => [
                [(0, 0), (1, 0), (-1, 1), (0, 1)],
                [(0, -1), (0, 0), (1, 0), (1, 1)],
                [(0, -1), (1, -1), (-1, 0), (0, 0)],
                [(-1, -1), (-1, 0), (0, 0), (0, 1)],
            ][idx],
            Piece::J => [
                [(-1, 0), (0, 0), (1, 0), (-1, 1)],
                [(0, -1), (0, 0), (0, 1), (1, 1)],
                [(1, -1), (-1, 0), (0, 0), (1, 0)],
                [(-1, -1), (0, -1), (0, 0), (0, 1)],
            ][idx],
            Piece::L => [
                [(-1, 0), (0, 0), (1, 0), (1, 1)],
                [(0, -1), (0, 0), (0, 1), (1, -1)],
                [(-1, -1), (-1, 0), (0, 0), (1, 0)],
                [(-1, 1), (0, -1), (0, 0), (0, 1)],
            ][idx],
        }
    }

    /// Slot in the evaluator's one-hot queue encoding.
    pub fn feature_index(self) -> usize {
        match self {
            Piece::T => 0,
            Piece::Z => 1,
            Piece::S => 2,
            Piece::I => 3,
            Piece::O => 4,
            Piece::L => 5,
            Piece::J => 6,
        }
    }

    /// Pivot shape for spin classification.
    pub fn is_pivot(self) -> bool {
        self == Piece::T
    }
}

/// A piece with a concrete rotation and origin.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct PiecePose {
    pub piece: Piece,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl PiecePose {
    pub fn new(piece: Piece, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            piece,
            rotation,
            x,
            y,
        }
    }

    /// Canonical spawn pose.
    pub fn spawn(piece: Piece) -> Self {
        Self::new(piece, Rotation::North, Piece::SPAWN_X, Piece::SPAWN_Y)
    }

    pub fn minos(&self) -> [(i8, i8); 4] {
        self.piece.minos(self.rotation)
    }

    /// Absolute board coordinates of the four minos.
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.minos().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn fits(&self, board: &Board) -> bool {
        board.is_valid_position(&self.minos(), self.x, self.y)
    }

    /// True when every mino sits in the hidden buffer above the visible field.
    pub fn is_above_visible(&self) -> bool {
        self.cells()
            .iter()
            .all(|&(_, y)| y >= Board::VISIBLE_HEIGHT as i8)
    }
}
