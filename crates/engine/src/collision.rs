//! Placement checks against the matrix. Walls and the floor count as filled.

use versus_core::{Board, Piece, PiecePose, Rotation};

#[inline(always)]
pub fn collides(board: &Board, piece: Piece, rotation: Rotation, x: i8, y: i8) -> bool {
    !board.is_valid_position(&piece.minos(rotation), x, y)
}

#[inline(always)]
pub fn can_place(board: &Board, piece: Piece, rotation: Rotation, x: i8, y: i8) -> bool {
    board.is_valid_position(&piece.minos(rotation), x, y)
}

/// Row the piece settles on when dropped straight down from `y`.
#[inline]
pub fn hard_drop_y(board: &Board, piece: Piece, rotation: Rotation, x: i8, y: i8) -> i8 {
    let minos = piece.minos(rotation);
    let mut rest = y;
    while board.is_valid_position(&minos, x, rest - 1) {
        rest -= 1;
    }
    rest
}

/// True when the cell row below the piece is blocked.
#[inline]
pub fn is_grounded(board: &Board, piece: Piece, rotation: Rotation, x: i8, y: i8) -> bool {
    collides(board, piece, rotation, x, y - 1)
}

/// Number of rows `pose` can fall before it rests.
pub fn drop_distance(board: &Board, pose: &PiecePose) -> u8 {
    let rest = hard_drop_y(board, pose.piece, pose.rotation, pose.x, pose.y);
    (pose.y - rest) as u8
}

/// `pose` moved down onto whatever is beneath it.
pub fn landing_pose(board: &Board, pose: &PiecePose) -> PiecePose {
    let rest = hard_drop_y(board, pose.piece, pose.rotation, pose.x, pose.y);
    PiecePose { y: rest, ..*pose }
}

pub fn pose_grounded(board: &Board, pose: &PiecePose) -> bool {
    is_grounded(board, pose.piece, pose.rotation, pose.x, pose.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor(board: &mut Board, rows: usize) {
        for y in 0..rows {
            for x in 0..Board::WIDTH {
                board.set(x, y, true);
            }
        }
    }

    #[test]
    fn test_spawn_pose_is_free() {
        let board = Board::new();
        for piece in Piece::ALL {
            let pose = PiecePose::spawn(piece);
            assert!(can_place(&board, piece, pose.rotation, pose.x, pose.y));
        }
    }

    #[test]
    fn test_walls_and_floor_block() {
        let board = Board::new();
        assert!(collides(&board, Piece::I, Rotation::North, 0, 5));
        assert!(collides(&board, Piece::I, Rotation::North, 8, 5));
        assert!(!collides(&board, Piece::I, Rotation::East, 0, 5));
        assert!(collides(&board, Piece::S, Rotation::South, 4, 0));
    }

    #[test]
    fn test_stack_blocks() {
        let mut board = Board::new();
        board.set(5, 2, true);
        assert!(collides(&board, Piece::O, Rotation::North, 4, 1));
        assert!(can_place(&board, Piece::O, Rotation::North, 4, 3));
    }

    #[test]
    fn test_landing_on_floor() {
        let board = Board::new();
        let pose = PiecePose::spawn(Piece::T);
        let landed = landing_pose(&board, &pose);
        assert_eq!(landed.y, 0);
        assert_eq!(drop_distance(&board, &pose), pose.y as u8);
        assert!(pose_grounded(&board, &landed));
        assert!(!pose_grounded(&board, &pose));
    }

    #[test]
    fn test_landing_on_stack() {
        let mut board = Board::new();
        floor(&mut board, 3);
        let pose = PiecePose::new(Piece::J, Rotation::North, 4, 15);
        let landed = landing_pose(&board, &pose);
        assert_eq!(landed.y, 3);
        assert_eq!(drop_distance(&board, &landed), 0);
    }
}
