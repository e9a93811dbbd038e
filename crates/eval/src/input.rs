//! Oracle input encoding.

use versus_core::{Board, Piece, PiecePose};

pub const BOARD_PLANES: usize = 2;
pub const PLANE_LEN: usize = Board::HEIGHT * Board::WIDTH;
pub const TENSOR_LEN: usize = BOARD_PLANES * PLANE_LEN;
pub const FEATURE_LEN: usize = 72;
/// Preview pieces encoded one-hot at the front of the feature vector.
pub const QUEUE_FEATURE_PIECES: usize = 5;

const PIECE_KINDS: usize = 7;

/// One position for the oracle: a `2 x 40 x 10` tensor, row-major with
/// y = 0 at the bottom, and an optional feature vector.
///
/// Plane 0 is board occupancy. Plane 1 is the mask of a candidate piece
/// that has not yet been merged into plane 0.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalInput {
    pub tensor: Vec<f32>,
    pub features: Option<Vec<f32>>,
}

#[inline]
fn index(plane: usize, x: usize, y: usize) -> usize {
    plane * PLANE_LEN + y * Board::WIDTH + x
}

impl EvalInput {
    pub fn from_board(board: &Board) -> Self {
        let mut tensor = vec![0.0; TENSOR_LEN];
        for y in 0..Board::HEIGHT {
            let row = board.row(y);
            if row == 0 {
                continue;
            }
            for x in 0..Board::WIDTH {
                if row & (1 << x) != 0 {
                    tensor[index(0, x, y)] = 1.0;
                }
            }
        }
        Self {
            tensor,
            features: None,
        }
    }

    /// Board before placement plus the candidate's resting cells on plane 1.
    pub fn with_candidate(board: &Board, pose: &PiecePose) -> Self {
        let mut input = Self::from_board(board);
        for (x, y) in pose.cells() {
            if (0..Board::WIDTH as i8).contains(&x) && (0..Board::HEIGHT as i8).contains(&y) {
                input.tensor[index(1, x as usize, y as usize)] = 1.0;
            }
        }
        input
    }

    /// Attach the preview encoding; slots past the queue stay zero.
    pub fn with_queue(mut self, queue: &[Piece]) -> Self {
        self.features = Some(queue_features(queue));
        self
    }

    pub fn cell(&self, plane: usize, x: usize, y: usize) -> f32 {
        self.tensor[index(plane, x, y)]
    }

    /// Occupancy with the candidate mask merged in.
    pub fn merged_board(&self) -> Board {
        let mut board = Board::new();
        for y in 0..Board::HEIGHT {
            for x in 0..Board::WIDTH {
                if self.cell(0, x, y) > 0.5 || self.cell(1, x, y) > 0.5 {
                    board.set(x, y, true);
                }
            }
        }
        board
    }
}

/// 72 floats: one-hot of the first five preview pieces, then zeros.
pub fn queue_features(queue: &[Piece]) -> Vec<f32> {
    let mut features = vec![0.0; FEATURE_LEN];
    for (slot, piece) in queue.iter().take(QUEUE_FEATURE_PIECES).enumerate() {
        features[slot * PIECE_KINDS + piece.feature_index()] = 1.0;
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use versus_core::Rotation;

    #[test]
    fn test_board_plane_layout() {
        let mut board = Board::new();
        board.set(0, 0, true);
        board.set(9, 39, true);
        let input = EvalInput::from_board(&board);
        assert_eq!(input.tensor.len(), 800);
        assert_eq!(input.tensor[0], 1.0);
        assert_eq!(input.tensor[399], 1.0);
        assert_eq!(input.tensor.iter().sum::<f32>(), 2.0);
        assert!(input.features.is_none());
    }

    #[test]
    fn test_candidate_mask_on_second_plane() {
        let pose = PiecePose::new(Piece::T, Rotation::North, 4, 0);
        let input = EvalInput::with_candidate(&Board::new(), &pose);
        assert_eq!(input.tensor[..PLANE_LEN].iter().sum::<f32>(), 0.0);
        assert_eq!(input.tensor[PLANE_LEN..].iter().sum::<f32>(), 4.0);
        assert_eq!(input.cell(1, 4, 1), 1.0);
        let merged = input.merged_board();
        assert!(merged.get(3, 0) && merged.get(4, 0) && merged.get(5, 0) && merged.get(4, 1));
    }

    #[test]
    fn test_queue_one_hot() {
        let features = queue_features(&[Piece::I, Piece::T, Piece::J, Piece::O, Piece::S, Piece::Z]);
        assert_eq!(features.len(), FEATURE_LEN);
        assert_eq!(features[3], 1.0);
        assert_eq!(features[7], 1.0);
        assert_eq!(features[14 + 6], 1.0);
        assert_eq!(features[21 + 4], 1.0);
        assert_eq!(features[28 + 2], 1.0);
        assert_eq!(features.iter().sum::<f32>(), 5.0);
    }

    #[test]
    fn test_short_queue_leaves_zeros() {
        let features = queue_features(&[Piece::L]);
        assert_eq!(features[5], 1.0);
        assert_eq!(features.iter().sum::<f32>(), 1.0);
    }
}
