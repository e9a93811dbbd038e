//! Board with precomputed column heights for fast evaluation

use crate::Board;

/// Board wrapper with cached column heights.
/// Use for eval/heuristics, not for collision.
#[derive(Clone, Debug)]
pub struct BoardWithHeights {
    board: Board,
    heights: [u8; Board::WIDTH],
}

impl BoardWithHeights {
    /// Create from board, computing heights
    pub fn new(board: &Board) -> Self {
        let mut heights = [0u8; Board::WIDTH];
        for (x, height) in heights.iter_mut().enumerate() {
            *height = board.column_height(x) as u8;
        }
        Self {
            board: board.clone(),
            heights,
        }
    }

    /// O(1) height lookup
    #[inline(always)]
    pub fn height(&self, x: usize) -> u8 {
        self.heights[x]
    }

    /// O(1) max height across all columns
    #[inline(always)]
    pub fn max_height(&self) -> u8 {
        *self.heights.iter().max().unwrap_or(&0)
    }

    pub fn aggregate_height(&self) -> u32 {
        self.heights.iter().map(|&h| h as u32).sum()
    }

    /// Sum of height differences between neighbouring columns
    pub fn bumpiness(&self) -> u32 {
        self.heights
            .windows(2)
            .map(|w| (w[0] as i32 - w[1] as i32).unsigned_abs())
            .sum()
    }

    /// Empty cells below each column's surface
    pub fn holes(&self) -> u32 {
        (0..Board::WIDTH)
            .map(|x| {
                let filled = (self.board.column(x) & ((1u64 << self.heights[x]) - 1)).count_ones();
                self.heights[x] as u32 - filled
            })
            .sum()
    }

    /// Total depth of single-column wells and the deepest one.
    /// Walls count as infinitely tall neighbours.
    pub fn wells(&self) -> (u32, u32) {
        let mut total = 0u32;
        let mut deepest = 0u32;
        for x in 0..Board::WIDTH {
            let left = if x == 0 {
                Board::HEIGHT as u8
            } else {
                self.heights[x - 1]
            };
            let right = if x == Board::WIDTH - 1 {
                Board::HEIGHT as u8
            } else {
                self.heights[x + 1]
            };
            let rim = left.min(right);
            if rim > self.heights[x] {
                let depth = (rim - self.heights[x]) as u32;
                total += depth;
                deepest = deepest.max(depth);
            }
        }
        (total, deepest)
    }

    /// Get underlying board reference
    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get heights array reference
    #[inline(always)]
    pub fn heights(&self) -> &[u8; Board::WIDTH] {
        &self.heights
    }
}
