//! Shared types for the carousel module

use std::time::Duration;

use crate::animation::EasingFunction;

/// Number of frames visible at once; navigation always moves a whole window.
pub const WINDOW_SIZE: usize = 3;

/// Which way a navigation request moves through the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Next,
    Previous,
}

/// Where the slide transition currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Current window sliding out toward `-slide_distance`.
    RetractingOut,
    /// New window sliding back from `-slide_distance` to rest.
    AdvancingIn,
}

/// Read-only view of the transition bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionState {
    pub phase: Phase,
    /// Time spent in the current half-transition.
    pub elapsed: Duration,
    pub direction: Direction,
}

/// Static timing configuration for the carousel slide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselTiming {
    /// Duration of each half-transition.
    pub duration: Duration,
    /// Off-window displacement reached at the midpoint of a slide.
    pub slide_distance: f32,
    pub easing: EasingFunction,
}

impl Default for CarouselTiming {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(600),
            slide_distance: 2.0,
            easing: EasingFunction::EaseInOutCubic,
        }
    }
}

/// Start index of the window after one full navigation step.
///
/// Moves by [`WINDOW_SIZE`] modulo `len`; for lists shorter than a window
/// the step is reduced first so the result never leaves `0..len`.
pub fn shifted_start(start: usize, len: usize, direction: Direction) -> usize {
    if len == 0 {
        return 0;
    }
    let step = WINDOW_SIZE % len;
    let start = start % len;
    match direction {
        Direction::Next => (start + step) % len,
        Direction::Previous => (start + len - step) % len,
    }
}
