//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (rules engine, terminal rendering, persistence).
//!
//! # Color Codes
//!
//! Grid and piece cells hold a plain color code:
//!
//! - `0` ([`EMPTY`]): empty cell
//! - `1..=7`: one code per shape, see [`Shape::color`]
//!
//! # Frame Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 20 | Driver frame interval |
//! | `BASE_SPEED` | 21 | Frames between gravity steps at speed 0 |
//! | `MAX_SPEED` | 20 | Upper speed bound (gravity every frame) |
//! | `MIN_SPEED` | -20 | Lower speed bound (gravity every 41 frames) |
//!
//! Gravity runs on frames where `frame % (BASE_SPEED - speed) == 0`.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, Shape, EMPTY};
//!
//! assert_eq!(Shape::O.color(), 2);
//! assert_ne!(Shape::I.color(), EMPTY);
//!
//! assert!(Command::Rotate.is_movement());
//! assert!(!Command::TogglePause.is_movement());
//! ```

/// A grid or piece cell: `0` is empty, `1..=7` is a shape color.
pub type ColorCode = u8;

/// The empty color code.
pub const EMPTY: ColorCode = 0;

/// Highest valid color code.
pub const MAX_COLOR: ColorCode = 7;

/// Driver frame interval in milliseconds.
pub const FRAME_MS: u64 = 20;

/// Frames between gravity steps at speed 0.
pub const BASE_SPEED: i32 = 21;

/// Fastest speed setting (gravity on every frame).
pub const MAX_SPEED: i32 = BASE_SPEED - 1;

/// Slowest speed setting.
pub const MIN_SPEED: i32 = -(BASE_SPEED - 1);

/// Smallest playable grid in either dimension (fits the 4x4 I piece).
pub const MIN_GRID_SIZE: usize = 4;

/// Default save file, relative to the working directory.
pub const DEFAULT_STATE_PATH: &str = "state.json";

/// Returns true for `0..=7`.
pub fn is_valid_color(code: ColorCode) -> bool {
    code <= MAX_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_bounds_keep_gravity_interval_positive() {
        assert_eq!(BASE_SPEED - MAX_SPEED, 1);
        assert_eq!(BASE_SPEED - MIN_SPEED, 41);
    }

    #[test]
    fn color_codes() {
        assert!(is_valid_color(EMPTY));
        assert!(is_valid_color(7));
        assert!(!is_valid_color(8));
        for shape in Shape::ALL {
            assert!(shape.color() >= 1 && shape.color() <= MAX_COLOR);
        }
    }

    #[test]
    fn only_piece_moves_are_movement() {
        let moves = [
            Command::NudgeLeft,
            Command::NudgeRight,
            Command::NudgeDown,
            Command::Rotate,
        ];
        assert!(moves.iter().all(Command::is_movement));
        for control in [
            Command::NewSession,
            Command::TogglePause,
            Command::SpeedUp,
            Command::SpeedDown,
        ] {
            assert!(!control.is_movement(), "{:?}", control);
        }
    }
}

/// The seven tetromino shapes
///
/// Each shape has a fixed color code:
/// - **T**: 1
/// - **O**: 2, 2x2 square
/// - **L**: 3
/// - **J**: 4
/// - **I**: 5, 4x4 box
/// - **Z**: 6
/// - **S**: 7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    T,
    O,
    L,
    J,
    I,
    Z,
    S,
}

impl Shape {
    /// All shapes in color-code order.
    pub const ALL: [Shape; 7] = [
        Shape::T,
        Shape::O,
        Shape::L,
        Shape::J,
        Shape::I,
        Shape::Z,
        Shape::S,
    ];

    /// Color code written into the grid for this shape.
    pub fn color(&self) -> ColorCode {
        match self {
            Shape::T => 1,
            Shape::O => 2,
            Shape::L => 3,
            Shape::J => 4,
            Shape::I => 5,
            Shape::Z => 6,
            Shape::S => 7,
        }
    }
}

/// Commands a driver applies to a running game
///
/// Movement and rotation map onto session operations; the rest control the
/// driver itself (pause, gravity speed, fresh session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one cell left
    NudgeLeft,
    /// Move piece one cell right
    NudgeRight,
    /// Move piece one cell down, locking it if it cannot descend
    NudgeDown,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Discard the current game and start an empty one
    NewSession,
    /// Pause or resume gravity and movement
    TogglePause,
    /// Shorten the gravity interval by one frame
    SpeedUp,
    /// Lengthen the gravity interval by one frame
    SpeedDown,
}

impl Command {
    /// True for commands that move or rotate the piece (ignored while paused).
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            Command::NudgeLeft | Command::NudgeRight | Command::NudgeDown | Command::Rotate
        )
    }
}
