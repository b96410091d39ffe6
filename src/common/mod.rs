//! Common, shared types.

pub mod geometry;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
