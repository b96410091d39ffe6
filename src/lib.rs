//! Library entry point.
//!
//! The arena simulation is a set of Bevy plugins. Integration tests in `tests/`
//! are compiled as separate crates, so `lib.rs` gives them a stable public API.

pub mod common;
pub mod game;
pub mod plugins;
