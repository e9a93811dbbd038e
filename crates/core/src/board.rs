//! board representation - column-major u64 occupancy plus a per-cell color tag
//! rows 0..20 are the visible field, rows 20..40 the hidden spawn buffer

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Piece;

/// What a single cell holds. The tag only matters to observers; collision
/// and clears read the occupancy bits.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Block(Piece),
    Garbage,
}

impl Cell {
    pub fn is_filled(self) -> bool {
        self != Cell::Empty
    }
}

/// 10x40 board using column-major u64 bitfields.
/// Each column uses 40 bits (rows 0-39).
/// Row 0 is bottom, Row 39 is top (only 0-19 visible).
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Board {
    cols: [u64; Board::WIDTH],
    tags: [[Cell; Board::HEIGHT]; Board::WIDTH],
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut rows = [0u16; Board::HEIGHT];
        for (y, row) in rows.iter_mut().enumerate() {
            *row = self.row(y);
        }
        rows.as_slice().serialize(serializer)
    }
}

/// Serialized boards carry occupancy only; filled cells come back as garbage.
impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let vec: Vec<u16> = Vec::deserialize(deserializer)?;
        if vec.len() != Board::HEIGHT {
            return Err(serde::de::Error::custom("expected 40 rows"));
        }
        let mut board = Board::new();
        for (y, &value) in vec.iter().enumerate() {
            for x in 0..Board::WIDTH {
                if (value >> x) & 1 == 1 {
                    board.set(x, y, true);
                }
            }
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cols: [0; Board::WIDTH],
            tags: [[Cell::Empty; Board::HEIGHT]; Board::WIDTH],
        }
    }
}

impl Board {
    pub const WIDTH: usize = 10;
    pub const HEIGHT: usize = 40;
    pub const VISIBLE_HEIGHT: usize = 20;
    pub const HIDDEN_ROWS: usize = Self::HEIGHT - Self::VISIBLE_HEIGHT;

    const ROWS_MASK: u64 = (1u64 << Self::HEIGHT) - 1;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        (self.cols[x] >> y) & 1 == 1
    }

    /// Fill or empty a cell. Filled cells set this way are tagged as garbage.
    pub fn set(&mut self, x: usize, y: usize, filled: bool) {
        self.set_cell(x, y, if filled { Cell::Garbage } else { Cell::Empty });
    }

    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        let mask = 1u64 << y;
        if cell.is_filled() {
            self.cols[x] |= mask;
        } else {
            self.cols[x] &= !mask;
        }
        self.tags[x][y] = cell;
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.tags[x][y]
    }

    /// Signed lookup; `None` means outside the grid.
    pub fn cell_at(&self, x: i8, y: i8) -> Option<Cell> {
        if Self::in_bounds(x, y) {
            Some(self.tags[x as usize][y as usize])
        } else {
            None
        }
    }

    /// Walls and floor count as occupied.
    #[inline]
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        !Self::in_bounds(x, y) || self.get(x as usize, y as usize)
    }

    #[inline(always)]
    pub fn in_bounds(x: i8, y: i8) -> bool {
        x >= 0 && y >= 0 && (x as usize) < Self::WIDTH && (y as usize) < Self::HEIGHT
    }

    /// True when every mino offset, shifted to (x, y), lands on an empty in-bounds cell.
    #[inline]
    pub fn is_valid_position(&self, minos: &[(i8, i8)], x: i8, y: i8) -> bool {
        minos.iter().all(|&(dx, dy)| !self.is_occupied(x + dx, y + dy))
    }

    /// Commit four cells of `piece`. Cells outside the grid are dropped.
    pub fn place_minos(&mut self, piece: Piece, minos: &[(i8, i8)], x: i8, y: i8) {
        for &(dx, dy) in minos {
            let (cx, cy) = (x + dx, y + dy);
            if Self::in_bounds(cx, cy) {
                self.set_cell(cx as usize, cy as usize, Cell::Block(piece));
            }
        }
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        (self.full_rows_mask() >> y) & 1 == 1
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        (0..Self::WIDTH).all(|x| (self.cols[x] >> y) & 1 == 0)
    }

    /// Bit y set iff row y is completely filled.
    #[inline]
    pub fn full_rows_mask(&self) -> u64 {
        self.cols.iter().fold(Self::ROWS_MASK, |acc, col| acc & col)
    }

    pub fn count_full_lines(&self) -> u8 {
        self.full_rows_mask().count_ones() as u8
    }

    /// Remove every full row and compact the rest downward, preserving order.
    pub fn clear_lines(&mut self) -> u8 {
        let full = self.full_rows_mask();
        if full == 0 {
            return 0;
        }
        for x in 0..Self::WIDTH {
            let old_col = self.cols[x];
            let old_tags = self.tags[x];
            let mut col = 0u64;
            let mut tags = [Cell::Empty; Self::HEIGHT];
            let mut write = 0;
            for y in 0..Self::HEIGHT {
                if (full >> y) & 1 == 1 {
                    continue;
                }
                col |= ((old_col >> y) & 1) << write;
                tags[write] = old_tags[y];
                write += 1;
            }
            self.cols[x] = col;
            self.tags[x] = tags;
        }
        full.count_ones() as u8
    }

    pub fn is_empty(&self) -> bool {
        self.cols.iter().all(|&col| col == 0)
    }

    /// True when removing the full rows would leave nothing behind.
    pub fn clears_to_empty(&self) -> bool {
        let full = self.full_rows_mask();
        self.cols.iter().all(|&col| col & !full == 0)
    }

    /// Push `lines` garbage rows in from the bottom, each empty at `hole_x`.
    /// Returns true when occupied cells were pushed off the top.
    pub fn add_garbage_lines(&mut self, lines: usize, hole_x: usize) -> bool {
        if lines == 0 {
            return false;
        }
        let lines = lines.min(Self::HEIGHT);
        let lost_mask = Self::ROWS_MASK & !(Self::ROWS_MASK >> lines);
        let overflow = self.cols.iter().any(|&col| col & lost_mask != 0);

        for x in 0..Self::WIDTH {
            let mut col = (self.cols[x] << lines) & Self::ROWS_MASK;
            let mut tags = [Cell::Empty; Self::HEIGHT];
            tags[lines..].copy_from_slice(&self.tags[x][..Self::HEIGHT - lines]);
            if x != hole_x {
                col |= (1u64 << lines) - 1;
                for tag in tags.iter_mut().take(lines) {
                    *tag = Cell::Garbage;
                }
            }
            self.cols[x] = col;
            self.tags[x] = tags;
        }
        overflow
    }

    /// Row as a 10-bit mask, bit x = column x.
    pub fn row(&self, y: usize) -> u16 {
        (0..Self::WIDTH).fold(0u16, |acc, x| acc | (((self.cols[x] >> y) & 1) as u16) << x)
    }

    /// Get raw column data for fast height calculation
    #[inline]
    pub fn column(&self, x: usize) -> u64 {
        self.cols[x]
    }

    /// Highest filled row + 1 for a column, 0 when empty.
    #[inline]
    pub fn column_height(&self, x: usize) -> usize {
        Self::HEIGHT.min(64 - self.cols[x].leading_zeros() as usize)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in (0..Self::VISIBLE_HEIGHT).rev() {
            for x in 0..Self::WIDTH {
                write!(f, "{}", if self.get(x, y) { "[]" } else { "  " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
