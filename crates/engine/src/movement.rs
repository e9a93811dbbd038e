//! Rotation and movement logic with kick application.

use crate::collision::can_place;
use crate::kicks::get_kicks;
use versus_core::{Board, Piece, PiecePose, Rotation, SpinType};

/// Result of a rotation attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationResult {
    pub new_rotation: Rotation,
    pub new_x: i8,
    pub new_y: i8,
    /// 0 when the piece rotated in place, otherwise 1-based kick table index
    pub kick_index: usize,
}

impl RotationResult {
    pub fn pose(&self, piece: Piece) -> PiecePose {
        PiecePose::new(piece, self.new_rotation, self.new_x, self.new_y)
    }
}

/// Try to rotate a piece, applying kicks if necessary.
/// Never touches the board; returns None if rotation is not possible.
pub fn try_rotate(
    board: &Board,
    piece: Piece,
    rotation: Rotation,
    x: i8,
    y: i8,
    clockwise: bool,
) -> Option<RotationResult> {
    let new_rotation = if clockwise {
        rotation.cw()
    } else {
        rotation.ccw()
    };
    try_rotate_to(board, piece, rotation, new_rotation, x, y)
}

/// Try to rotate to a specific rotation state.
pub fn try_rotate_to(
    board: &Board,
    piece: Piece,
    from: Rotation,
    to: Rotation,
    x: i8,
    y: i8,
) -> Option<RotationResult> {
    // First try without kicks
    if can_place(board, piece, to, x, y) {
        return Some(RotationResult {
            new_rotation: to,
            new_x: x,
            new_y: y,
            kick_index: 0,
        });
    }

    let kicks = get_kicks(piece, from, to);
    for (i, (dx, dy)) in kicks.iter().enumerate() {
        let nx = x + dx;
        let ny = y + dy;
        if can_place(board, piece, to, nx, ny) {
            return Some(RotationResult {
                new_rotation: to,
                new_x: nx,
                new_y: ny,
                kick_index: i + 1, // +1 because index 0 is no-kick
            });
        }
    }

    None
}

/// Try to move piece horizontally
pub fn try_move(
    board: &Board,
    piece: Piece,
    rotation: Rotation,
    x: i8,
    y: i8,
    dx: i8,
) -> Option<i8> {
    let new_x = x + dx;
    if can_place(board, piece, rotation, new_x, y) {
        Some(new_x)
    } else {
        None
    }
}

/// Try to move piece down (soft drop)
pub fn try_drop(board: &Board, piece: Piece, rotation: Rotation, x: i8, y: i8) -> Option<i8> {
    let new_y = y - 1;
    if can_place(board, piece, rotation, x, new_y) {
        Some(new_y)
    } else {
        None
    }
}

/// Three-corner rule around the pivot's center. Only the pivot shape spins;
/// off-board corners count as occupied.
pub fn detect_spin(board: &Board, pose: &PiecePose) -> SpinType {
    if !pose.piece.is_pivot() {
        return SpinType::None;
    }

    let (x, y) = (pose.x, pose.y);
    let upper_left = board.is_occupied(x - 1, y + 1);
    let upper_right = board.is_occupied(x + 1, y + 1);
    let lower_left = board.is_occupied(x - 1, y - 1);
    let lower_right = board.is_occupied(x + 1, y - 1);

    let filled = [upper_left, upper_right, lower_left, lower_right]
        .iter()
        .filter(|&&c| c)
        .count();
    if filled < 3 {
        return SpinType::None;
    }

    // Front corners sit on the side the pivot points at
    let (front_a, front_b) = match pose.rotation {
        Rotation::North => (upper_left, upper_right),
        Rotation::East => (upper_right, lower_right),
        Rotation::South => (lower_left, lower_right),
        Rotation::West => (upper_left, lower_left),
    };

    if front_a && front_b {
        SpinType::Full
    } else {
        SpinType::Mini
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_rotation() {
        let board = Board::new();
        let r = try_rotate(&board, Piece::T, Rotation::North, 4, 5, true).expect("open board");
        assert_eq!(r.new_rotation, Rotation::East);
        assert_eq!(r.kick_index, 0); // No kick needed
        assert_eq!((r.new_x, r.new_y), (4, 5));
    }

    #[test]
    fn test_wall_kick() {
        let board = Board::new();
        // East T hugging the left wall needs a kick to flatten
        let r = try_rotate(&board, Piece::T, Rotation::East, 0, 5, false).expect("kicks right");
        assert_eq!(r.new_rotation, Rotation::North);
        assert_eq!(r.kick_index, 1);
        assert_eq!((r.new_x, r.new_y), (1, 5));
    }

    #[test]
    fn test_o_never_kicks() {
        let mut board = Board::new();
        for y in 0..Board::HEIGHT {
            board.set(6, y, true);
        }
        // O rotation is shape-invariant so it always succeeds in place
        let r = try_rotate(&board, Piece::O, Rotation::North, 4, 0, true).expect("in place");
        assert_eq!(r.kick_index, 0);
    }

    #[test]
    fn test_rotation_does_not_mutate_board() {
        let board = Board::new();
        let before = board.clone();
        let _ = try_rotate(&board, Piece::I, Rotation::North, 4, 0, true);
        assert_eq!(board, before);
    }

    #[test]
    fn test_move_left() {
        let board = Board::new();
        let new_x = try_move(&board, Piece::T, Rotation::North, 4, 0, -1);
        assert_eq!(new_x, Some(3));
    }

    #[test]
    fn test_move_blocked() {
        let board = Board::new();
        // T piece at x=1 can't move further left
        let new_x = try_move(&board, Piece::T, Rotation::North, 1, 0, -1);
        assert_eq!(new_x, None);
    }

    #[test]
    fn test_drop_blocked_by_floor() {
        let board = Board::new();
        assert_eq!(try_drop(&board, Piece::T, Rotation::North, 4, 1), Some(0));
        assert_eq!(try_drop(&board, Piece::T, Rotation::North, 4, 0), None);
    }

    #[test]
    fn test_full_spin_both_front_corners() {
        let mut board = Board::new();
        // T North centered at (4, 1): upper corners plus lower-left
        board.set(3, 2, true);
        board.set(5, 2, true);
        board.set(3, 0, true);
        let pose = PiecePose::new(Piece::T, Rotation::North, 4, 1);
        assert_eq!(detect_spin(&board, &pose), SpinType::Full);
    }

    #[test]
    fn test_mini_spin_one_front_corner() {
        let mut board = Board::new();
        board.set(3, 2, true);
        board.set(3, 0, true);
        board.set(5, 0, true);
        let pose = PiecePose::new(Piece::T, Rotation::North, 4, 1);
        assert_eq!(detect_spin(&board, &pose), SpinType::Mini);
    }

    #[test]
    fn test_two_corners_is_no_spin() {
        let mut board = Board::new();
        board.set(3, 2, true);
        board.set(5, 2, true);
        let pose = PiecePose::new(Piece::T, Rotation::North, 4, 1);
        assert_eq!(detect_spin(&board, &pose), SpinType::None);
    }

    #[test]
    fn test_floor_counts_as_occupied() {
        let mut board = Board::new();
        board.set(5, 1, true);
        // center on row 0: both lower corners are below the floor
        let pose = PiecePose::new(Piece::T, Rotation::East, 4, 0);
        assert_eq!(detect_spin(&board, &pose), SpinType::Full);
    }

    #[test]
    fn test_non_pivot_never_spins() {
        let mut board = Board::new();
        for x in 0..Board::WIDTH {
            board.set(x, 2, true);
        }
        let pose = PiecePose::new(Piece::S, Rotation::North, 4, 0);
        assert_eq!(detect_spin(&board, &pose), SpinType::None);
    }
}
