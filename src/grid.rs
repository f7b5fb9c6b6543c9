//! Matrix geometry and the serpentine coordinate mapper
//!
//! The panel is a single strip folded into `COLS` x `ROWS` cells. Even rows
//! run left to right, odd rows run right to left. Every pixel write in the
//! crate goes through [`map_to_index`].

/// Number of columns in the matrix
pub const COLS: usize = 32;

/// Number of rows in the matrix
pub const ROWS: usize = 7;

/// Number of physical pixels on the strip
pub const PIXEL_COUNT: usize = COLS * ROWS;

/// Horizontal center of the grid, in cell units
pub const CENTER_X: f32 = COLS as f32 / 2.0;

/// Vertical center of the grid, in cell units
pub const CENTER_Y: f32 = ROWS as f32 / 2.0;

#[allow(clippy::cast_possible_wrap)]
const LAST_COL: i32 = COLS as i32 - 1;
#[allow(clippy::cast_possible_wrap)]
const LAST_ROW: i32 = ROWS as i32 - 1;

/// Logical cell on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Returns the cell under a fractional position (truncated toward zero)
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_position(x: f32, y: f32) -> Self {
        Self {
            col: x as i32,
            row: y as i32,
        }
    }

    /// Check if the cell lies on the grid
    pub const fn is_visible(self) -> bool {
        self.col >= 0 && self.col <= LAST_COL && self.row >= 0 && self.row <= LAST_ROW
    }

    /// Physical strip offset of this cell, clamped onto the grid
    pub const fn index(self) -> usize {
        map_to_index(self.col, self.row)
    }
}

/// Map a logical cell to its offset on the strip.
///
/// Out-of-range coordinates are clamped to the nearest edge cell, so the
/// result is always a valid index in `0..PIXEL_COUNT`.
#[allow(clippy::cast_sign_loss)]
pub const fn map_to_index(col: i32, row: i32) -> usize {
    let col = clamp_i32(col, 0, LAST_COL) as usize;
    let row = clamp_i32(row, 0, LAST_ROW) as usize;

    let base = row * COLS;
    if row % 2 == 0 {
        base + col
    } else {
        base + (COLS - 1 - col)
    }
}

/// Inverse of [`map_to_index`] for in-range offsets
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const fn index_to_cell(index: usize) -> Option<Cell> {
    if index >= PIXEL_COUNT {
        return None;
    }
    let row = index / COLS;
    let offset = index % COLS;
    let col = if row % 2 == 0 { offset } else { COLS - 1 - offset };
    Some(Cell {
        col: col as i32,
        row: row as i32,
    })
}

/// Check whether a fractional position falls inside the grid
pub fn contains(x: f32, y: f32) -> bool {
    x >= 0.0 && x < COLS as f32 && y >= 0.0 && y < ROWS as f32
}

#[inline]
const fn clamp_i32(v: i32, min_v: i32, max_v: i32) -> i32 {
    if v < min_v {
        min_v
    } else if v > max_v {
        max_v
    } else {
        v
    }
}
