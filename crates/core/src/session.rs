//! Session module - the running game
//!
//! A session owns the grid, the falling piece and the cleared-line counter.
//! Every mutation is checked with [`Grid::can_place`] before it is committed,
//! so the current piece is always at a legal position as seen by callers
//! (except right after a spawn onto a full stack, see [`Session::spawn_blocked`]).
//!
//! The session has no timer: the driver calls `nudge(1, true)` on its own
//! gravity cadence. It is not synchronized either; concurrent callers must
//! serialize access to a single instance.

use crate::grid::Grid;
use crate::piece::Piece;
use crate::rng::{ShapeSource, SimpleRng};

/// Outcome of [`Session::nudge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    /// The piece moved.
    Moved,
    /// A downward move collided: the piece was written into the grid and a
    /// new piece spawned.
    Locked,
    /// The move was rejected and nothing changed.
    Blocked,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Session<S = SimpleRng> {
    grid: Grid,
    piece: Piece,
    lines_cleared: u32,
    shapes: S,
}

impl<S: ShapeSource> Session<S> {
    /// Start a game on an empty `width x height` grid with a freshly spawned piece.
    pub fn new(width: usize, height: usize, mut shapes: S) -> Self {
        let grid = Grid::new(width, height);
        let piece = spawn(&grid, &mut shapes);
        Self {
            grid,
            piece,
            lines_cleared: 0,
            shapes,
        }
    }

    /// Resume a game from previously saved parts.
    pub fn restore(grid: Grid, piece: Piece, lines_cleared: u32, shapes: S) -> Self {
        Self {
            grid,
            piece,
            lines_cleared,
            shapes,
        }
    }

    /// Start over on an empty grid of the same size, keeping the shape source.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.lines_cleared = 0;
        self.piece = spawn(&self.grid, &mut self.shapes);
    }

    /// Start over on an empty `width x height` grid, keeping the shape source.
    pub fn reset_with_size(&mut self, width: usize, height: usize) {
        if (width, height) == (self.grid.width(), self.grid.height()) {
            self.reset();
            return;
        }
        self.grid = Grid::new(width, height);
        self.lines_cleared = 0;
        self.piece = spawn(&self.grid, &mut self.shapes);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    /// Try to move the piece by `delta` along one axis.
    ///
    /// A rejected downward move (`vertical && delta > 0`) locks the piece at
    /// its current position and spawns the next one. Any other rejected move
    /// is a no-op.
    pub fn nudge(&mut self, delta: i32, vertical: bool) -> Nudge {
        let candidate = if vertical {
            self.piece.translated(0, delta)
        } else {
            self.piece.translated(delta, 0)
        };

        if self.grid.can_place(&candidate) {
            self.piece = candidate;
            return Nudge::Moved;
        }

        if vertical && delta > 0 {
            self.grid.place_piece(&self.piece);
            self.piece = spawn(&self.grid, &mut self.shapes);
            return Nudge::Locked;
        }

        Nudge::Blocked
    }

    /// Rotate the piece clockwise if the rotated matrix fits where it is.
    /// Returns whether the rotation was applied.
    pub fn rotate_block(&mut self) -> bool {
        let candidate = self.piece.rotated();
        if self.grid.can_place(&candidate) {
            self.piece = candidate;
            true
        } else {
            false
        }
    }

    /// Clear complete rows, add them to the counter and return how many were
    /// cleared by this call. The counter saturates at `u32::MAX`.
    pub fn clear_complete_lines(&mut self) -> u32 {
        let cleared = self.grid.clear_lines();
        self.lines_cleared = self.lines_cleared.saturating_add(cleared);
        cleared
    }

    /// True when the current piece overlaps the stack or sticks out of the
    /// grid, which only happens when a piece spawns onto a full stack.
    pub fn spawn_blocked(&self) -> bool {
        !self.grid.can_place(&self.piece)
    }

    /// Write the grid with the current piece drawn on top into `out`,
    /// reusing its allocation.
    pub fn composite_into(&self, out: &mut Grid) {
        out.clone_from(&self.grid);
        out.place_piece(&self.piece);
    }

    /// Grid with the current piece drawn on top, for rendering.
    pub fn composite(&self) -> Grid {
        let mut out = self.grid.clone();
        out.place_piece(&self.piece);
        out
    }
}

/// Draw the next shape and center it on the top row.
fn spawn<S: ShapeSource>(grid: &Grid, shapes: &mut S) -> Piece {
    let mut piece = Piece::new(shapes.next_shape());
    piece.x = (grid.width() / 2) as i32 - (piece.width() / 2) as i32;
    piece.y = 0;
    piece
}
