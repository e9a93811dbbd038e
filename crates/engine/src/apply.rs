use versus_core::{Board, PiecePose};

/// Place a piece on a copy of the board and return it with lines cleared.
/// The source board is never touched.
pub fn apply_pose(board: &Board, pose: &PiecePose) -> (Board, u8) {
    let mut next = board.clone();
    let lines = apply_pose_mut(&mut next, pose);
    (next, lines)
}

/// Place a piece in-place and clear any completed rows.
#[inline]
pub fn apply_pose_mut(board: &mut Board, pose: &PiecePose) -> u8 {
    board.place_minos(pose.piece, &pose.minos(), pose.x, pose.y);
    board.clear_lines()
}
