//! Grid module - manages the playing field
//!
//! The grid is a `width x height` board where each cell holds a color code
//! (`0` = empty). Uses a flat row-major vector (`y * width + x`) sized once at
//! construction and never resized.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.

use crate::piece::Piece;
use crate::types::{is_valid_color, ColorCode, EMPTY};

/// The playing field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of color codes, row-major order (y * width + x)
    cells: Vec<ColorCode>,
}

impl Grid {
    /// Create a new empty grid
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "grid dimensions must be positive, got {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    /// Rebuild a grid from a flat cell vector.
    ///
    /// Returns `None` unless both dimensions are positive, `cells.len()` equals
    /// `width * height`, and every cell is a valid color code.
    pub fn from_cells(width: usize, height: usize, cells: Vec<ColorCode>) -> Option<Self> {
        if width == 0 || height == 0 || width.checked_mul(height)? != cells.len() {
            return None;
        }
        if !cells.iter().all(|&c| is_valid_color(c)) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells,
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get a reference to the flat cell array
    pub fn cells(&self) -> &[ColorCode] {
        &self.cells
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<ColorCode> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds or the color code is invalid
    pub fn set(&mut self, x: i32, y: i32, color: ColorCode) -> bool {
        if !is_valid_color(color) {
            return false;
        }
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = color;
                true
            }
            None => false,
        }
    }

    /// Cells of row `y`. Panics if `y >= height`.
    pub fn row(&self, y: usize) -> &[ColorCode] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != EMPTY)
    }

    /// Write every non-empty cell of `piece` into the grid.
    ///
    /// No collision check: callers validate with [`Grid::can_place`] first.
    /// Cells that map outside the grid are skipped.
    pub fn place_piece(&mut self, piece: &Piece) {
        for (x, y, color) in piece.cells() {
            if let Some(idx) = self.index(x, y) {
                self.cells[idx] = color;
            }
        }
    }

    /// True if every non-empty cell of `piece` lands inside the grid on an
    /// empty cell. Used for both movement and rotation checks.
    pub fn can_place(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .all(|(x, y, _)| matches!(self.get(x, y), Some(EMPTY)))
    }

    /// Remove complete rows and return how many were cleared.
    ///
    /// Rows are scanned bottom to top. Each complete row is overwritten by
    /// shifting everything above it down one row, and an empty row is written
    /// at the top. The same row index is then checked again, since it now holds
    /// the row that used to sit above it.
    pub fn clear_lines(&mut self) -> u32 {
        let width = self.width;
        let mut cleared = 0;
        let mut y = self.height;

        while y > 0 {
            let row = y - 1;
            if !self.is_row_full(row) {
                y -= 1;
                continue;
            }

            // copy_within handles the overlapping ranges
            self.cells.copy_within(0..row * width, width);
            self.cells[..width].fill(EMPTY);
            cleared += 1;
        }

        cleared
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}
