//! Terminal rendering for blockfall.
//!
//! Rendering is split in two steps:
//! - [`GameView`] turns a composite [`Grid`](blockfall_core::Grid) and a [`Hud`]
//!   into a [`FrameBuffer`] of styled cells (pure, unit-tested)
//! - [`TerminalRenderer`] flushes that framebuffer to the terminal, writing only
//!   the runs of cells that changed since the previous frame

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{color_for, GameView, Hud, Viewport, HELP_TEXT};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
