use std::time::Duration;

use super::easing::{EasingFunction, lerp};

/// One eased interpolation ("leg") of a scalar, advanced by frame deltas.
///
/// A settled tween has consumed its whole duration and holds its target.
#[derive(Debug, Clone)]
pub struct Tween {
    from: f32,
    to: f32,
    value: f32,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFunction,
}

impl Tween {
    /// A tween resting at `value`.
    pub fn settled(
        value: f32,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            from: value,
            to: value,
            value,
            elapsed: duration,
            duration,
            easing,
        }
    }

    /// Start a new leg from an explicit value.
    pub fn start(&mut self, from: f32, to: f32) {
        self.from = from;
        self.to = to;
        self.elapsed = Duration::ZERO;
        self.value = if self.duration.is_zero() { to } else { from };
    }

    /// Start a new leg from wherever the value currently is.
    pub fn retarget(&mut self, to: f32) {
        self.start(self.value, to);
    }

    /// Consume up to `delta` of this leg and return the unused remainder.
    ///
    /// The remainder is non-zero only when the leg finished inside `delta`
    /// (or was already settled), which lets callers chain legs without
    /// dropping time.
    pub fn advance(&mut self, delta: Duration) -> Duration {
        if !self.is_active() {
            return delta;
        }
        let step = delta.min(self.duration - self.elapsed);
        self.elapsed += step;
        self.value = if self.elapsed >= self.duration {
            self.to
        } else {
            lerp(self.from, self.to, self.easing.apply(self.progress()))
        };
        delta - step
    }

    /// Normalized progress of the current leg in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
            as f32
    }

    pub fn is_active(&self) -> bool {
        self.elapsed < self.duration
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn from(&self) -> f32 {
        self.from
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}
