//! Frame-clocked scalar animation shared by the carousel and the board.
//!
//! Nothing in here reads a wall clock. The host render loop measures the
//! interval between frames and hands it to `advance`, so the same state
//! machine runs identically at 30, 72 or 144 frames per second.

pub mod easing;
pub mod tween;

pub use easing::{EasingFunction, lerp};
pub use tween::Tween;
