//! Terminal input module (driver-facing).
//!
//! Maps `crossterm` terminal events into [`crate::types::Command`]s, quit
//! requests and resize notifications. There is no key-repeat handling of our
//! own: every key press is one command.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, map_event, should_quit, InputEvent};
