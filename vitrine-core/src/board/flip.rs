use std::{f32::consts::PI, time::Duration};

use tracing::debug;

use crate::animation::{EasingFunction, Tween};

/// Timing for the board's half-turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipTiming {
    pub duration: Duration,
    pub easing: EasingFunction,
}

impl Default for FlipTiming {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(600),
            easing: EasingFunction::EaseInOutCubic,
        }
    }
}

/// Y-axis rotation of the board between its front (0) and back (π) faces.
///
/// Unlike the carousel, a toggle in the middle of a flip is honoured: the
/// board turns around from its current angle toward the other face.
#[derive(Debug, Clone)]
pub struct BoardFlip {
    rotation: Tween,
    flipped: bool,
}

impl BoardFlip {
    pub fn new(timing: FlipTiming) -> Self {
        Self {
            rotation: Tween::settled(0.0, timing.duration, timing.easing),
            flipped: false,
        }
    }

    pub fn toggle(&mut self) {
        self.flipped = !self.flipped;
        let target = if self.flipped { PI } else { 0.0 };
        debug!(
            from = self.rotation.value(),
            to = target,
            interrupted = self.rotation.is_active(),
            "board flip toggled"
        );
        self.rotation.retarget(target);
    }

    pub fn advance(&mut self, delta: Duration) {
        self.rotation.advance(delta);
    }

    pub fn current_angle(&self) -> f32 {
        self.rotation.value()
    }

    /// Angle the board is heading to (0 or π).
    pub fn target(&self) -> f32 {
        self.rotation.target()
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_animating(&self) -> bool {
        self.rotation.is_active()
    }
}

impl Default for BoardFlip {
    fn default() -> Self {
        Self::new(FlipTiming::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_flip_lands_on_back_face() {
        let mut board = BoardFlip::default();
        board.toggle();
        assert!(board.is_animating());
        board.advance(Duration::from_millis(600));
        assert_eq!(board.current_angle(), PI);
        assert!(board.is_flipped());
        assert!(!board.is_animating());
    }

    #[test]
    fn toggle_mid_flip_reverses_from_current_angle() {
        let mut board = BoardFlip::default();
        board.toggle();
        board.advance(Duration::from_millis(300));
        let midway = board.current_angle();
        assert!((midway - PI / 2.0).abs() < 1e-5);

        board.toggle();
        assert_eq!(board.target(), 0.0);
        assert!(!board.is_flipped());
        assert_eq!(board.current_angle(), midway);

        let mut peak = midway;
        for _ in 0..6 {
            board.advance(Duration::from_millis(100));
            peak = peak.max(board.current_angle());
        }
        assert_eq!(peak, midway, "board kept turning toward the back face");
        assert_eq!(board.current_angle(), 0.0);
    }

    #[test]
    fn idle_board_is_stable() {
        let mut board = BoardFlip::default();
        board.advance(Duration::from_secs(5));
        assert_eq!(board.current_angle(), 0.0);
        assert!(!board.is_animating());
    }
}
