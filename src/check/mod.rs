//! Matching: intersect a bond list with published winners.

pub mod engine;

pub use engine::{FileError, MatchEngine};
