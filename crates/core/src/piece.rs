//! Piece module - tetromino shape table and matrix rotation
//!
//! A piece is a small square color matrix plus a top-left offset on the grid.
//! The seven initial matrices live in [`SHAPES`], one entry per [`Shape`].
//! Rotation permutes the matrix in place; there is no rotation state and no
//! wall kick table.

use arrayvec::ArrayVec;

use crate::types::{is_valid_color, ColorCode, Shape, EMPTY};

/// Largest bounding box is the 4x4 I piece.
pub const MAX_PIECE_CELLS: usize = 16;

/// Inline storage for a piece matrix (row-major, `width * height` cells).
pub type Matrix = ArrayVec<ColorCode, MAX_PIECE_CELLS>;

/// Initial matrix of one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDef {
    pub shape: Shape,
    /// Width and height of the (square) bounding box.
    pub size: usize,
    pub cells: &'static [ColorCode],
}

/// Shape table, indexed by `Shape as usize`.
pub const SHAPES: [ShapeDef; 7] = [
    ShapeDef {
        shape: Shape::T,
        size: 3,
        cells: &[
            0, 1, 0, //
            1, 1, 1, //
            0, 0, 0,
        ],
    },
    ShapeDef {
        shape: Shape::O,
        size: 2,
        cells: &[
            2, 2, //
            2, 2,
        ],
    },
    ShapeDef {
        shape: Shape::L,
        size: 3,
        cells: &[
            3, 3, 0, //
            0, 3, 0, //
            0, 3, 0,
        ],
    },
    ShapeDef {
        shape: Shape::J,
        size: 3,
        cells: &[
            0, 4, 4, //
            0, 4, 0, //
            0, 4, 0,
        ],
    },
    ShapeDef {
        shape: Shape::I,
        size: 4,
        cells: &[
            0, 0, 0, 0, //
            5, 5, 5, 5, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ],
    },
    ShapeDef {
        shape: Shape::Z,
        size: 3,
        cells: &[
            6, 6, 0, //
            0, 6, 6, //
            0, 0, 0,
        ],
    },
    ShapeDef {
        shape: Shape::S,
        size: 3,
        cells: &[
            0, 7, 7, //
            7, 7, 0, //
            0, 0, 0,
        ],
    },
];

/// Table entry for a shape.
pub fn shape_def(shape: Shape) -> &'static ShapeDef {
    &SHAPES[shape as usize]
}

/// Falling piece: color matrix plus grid offset of its bounding box.
///
/// `x`/`y` may point off-grid on a candidate copy; [`crate::Grid::can_place`]
/// decides whether a position is legal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    width: usize,
    height: usize,
    pub x: i32,
    pub y: i32,
    matrix: Matrix,
}

impl Piece {
    /// Create a piece with the shape's initial matrix at (0, 0).
    pub fn new(shape: Shape) -> Self {
        let def = shape_def(shape);
        Self {
            width: def.size,
            height: def.size,
            x: 0,
            y: 0,
            matrix: def.cells.iter().copied().collect(),
        }
    }

    /// Rebuild a piece from raw parts.
    ///
    /// Returns `None` if the matrix length is not `width * height`, exceeds
    /// [`MAX_PIECE_CELLS`], or holds an invalid color code.
    pub fn from_parts(
        width: usize,
        height: usize,
        x: i32,
        y: i32,
        matrix: &[ColorCode],
    ) -> Option<Self> {
        if width == 0 || height == 0 || width.checked_mul(height)? != matrix.len() {
            return None;
        }
        if !matrix.iter().all(|&c| is_valid_color(c)) {
            return None;
        }
        let matrix = Matrix::try_from(matrix).ok()?;
        Some(Self {
            width,
            height,
            x,
            y,
            matrix,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major color matrix of the bounding box.
    pub fn matrix(&self) -> &[ColorCode] {
        &self.matrix
    }

    /// Non-empty cells as `(grid_x, grid_y, color)`.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, ColorCode)> + '_ {
        let width = self.width;
        self.matrix
            .iter()
            .enumerate()
            .filter(|&(_, &color)| color != EMPTY)
            .map(move |(i, &color)| {
                (
                    self.x + (i % width) as i32,
                    self.y + (i / width) as i32,
                    color,
                )
            })
    }

    /// Copy of this piece moved by (dx, dy).
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        let mut moved = self.clone();
        moved.x += dx;
        moved.y += dy;
        moved
    }

    /// Rotate the matrix 90° clockwise in place.
    ///
    /// Source cell `(x, y)` moves to index `x * height + (height - 1 - y)`.
    /// The bounding box dimensions are left as they are; every shape in
    /// [`SHAPES`] is square, so this is a plain quarter turn.
    pub fn rotate(&mut self) {
        let source = self.matrix.clone();
        let height = self.height;
        for (i, &color) in source.iter().enumerate() {
            let x = i % self.width;
            let y = i / self.width;
            self.matrix[x * height + (height - 1 - y)] = color;
        }
    }

    /// Copy of this piece rotated 90° clockwise.
    pub fn rotated(&self) -> Self {
        let mut turned = self.clone();
        turned.rotate();
        turned
    }
}
