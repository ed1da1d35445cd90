//! Store module - session persistence as JSON
//!
//! The rules engine knows nothing about files. This crate captures a
//! [`Session`](blockfall_core::Session) into plain serde records, writes
//! them as JSON and reads them back.
//!
//! # File Layout
//!
//! ```text
//! {
//!   "grid":  {"width": 10, "height": 20, "cells": [0, 0, ...]},
//!   "piece": {"width": 3, "height": 3, "x": 4, "y": 7, "matrix": [0, 1, 0, 1, 1, 1, 0, 0, 0]},
//!   "lines_cleared": 12
//! }
//! ```
//!
//! # Failure Policy
//!
//! A missing file means a fresh game. A file that cannot be read, parsed or
//! validated also means a fresh game; the error is returned alongside so the
//! caller can report it. Loading never fails hard.

pub mod record;
pub mod state_file;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use record::{GridRecord, PieceRecord, SavedState};
pub use state_file::{Loaded, StateFile};
