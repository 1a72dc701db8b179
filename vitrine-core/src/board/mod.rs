//! Rotating information board.

pub mod flip;

pub use flip::{BoardFlip, FlipTiming};
