//! Three-frame photo carousel.
//!
//! The engine owns which slice of the item list is on the walls and the
//! two-leg slide (retract, then advance) that swaps it for the next slice.
//! It never renders anything; hosts read [`CarouselEngine::current_window`]
//! and [`CarouselEngine::current_offset`] every frame.

pub mod engine;
pub mod types;
pub mod window;

pub use engine::CarouselEngine;
pub use types::*;
pub use window::{CarouselWindow, Slot, WindowEntry};
