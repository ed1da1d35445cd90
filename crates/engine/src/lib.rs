//! Engine module - runs a session in real time
//!
//! The rules engine in `blockfall-core` has no notion of time. This crate adds
//! the frame loop around it:
//!
//! - [`Config`]: settings read from `BLOCKFALL_*` environment variables
//! - [`Driver`]: owns the session, applies [`Command`](crate::types::Command)s,
//!   runs gravity every `BASE_SPEED - speed` frames, clears lines every frame
//!   and autosaves before each gravity step
//!
//! The driver is synchronous. A caller with several event sources (keyboard,
//! frame timer) funnels them into one loop that owns the driver, which keeps
//! every session call serialized.

pub mod config;
pub mod driver;

pub use blockfall_core as core;
pub use blockfall_store as store;
pub use blockfall_types as types;

pub use config::Config;
pub use driver::{Driver, TickReport};
