//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the rules engine of the game: the grid, the falling
//! piece, collision checks, rotation, line clearing and the cleared-line
//! counter. It has **zero dependencies** on terminal I/O, timers or
//! persistence; a driver calls into it and renders what it reports.
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size board of color codes with placement checks and line clearing
//! - [`piece`]: the seven shape matrices and in-place clockwise rotation
//! - [`rng`]: shape sources for spawning (seeded LCG, fixed cycle)
//! - [`session`]: grid + current piece + counter, driven by nudges and rotations
//!
//! # Game Rules
//!
//! - A move or rotation is committed only if the result fits on empty cells
//!   inside the grid; otherwise nothing happens (no wall kicks).
//! - A downward nudge that does not fit locks the piece where it is and spawns
//!   the next one, centered on the top row.
//! - Complete rows are removed bottom to top, everything above moves down.
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Nudge, Session, ShapeCycle};
//! use blockfall_types::Shape;
//!
//! let mut session = Session::new(10, 20, ShapeCycle::repeat(Shape::O));
//! assert_eq!(session.piece().x, 4);
//!
//! // Drop the square to the floor: 18 moves, then the 19th locks it.
//! for _ in 0..18 {
//!     assert_eq!(session.nudge(1, true), Nudge::Moved);
//! }
//! assert_eq!(session.nudge(1, true), Nudge::Locked);
//! assert_eq!(session.grid().get(4, 19), Some(2));
//! assert_eq!(session.piece().y, 0);
//! ```

pub mod grid;
pub mod piece;
pub mod rng;
pub mod session;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use grid::Grid;
pub use piece::{shape_def, Piece, ShapeDef, SHAPES};
pub use rng::{ShapeCycle, ShapeSource, SimpleRng};
pub use session::{Nudge, Session};
