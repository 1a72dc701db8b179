use std::time::Duration;

use tracing::{debug, trace};
use vitrine_model::ItemList;

use super::{
    types::{CarouselTiming, Direction, Phase, TransitionState, shifted_start},
    window::CarouselWindow,
};
use crate::animation::Tween;

/// Carousel state machine driven by the host render loop.
///
/// A slide is two eased legs of `timing.duration` each: the visible window
/// retracts to `-slide_distance`, the start index jumps by a whole window
/// while everything is out of view, then the new window advances back to
/// rest. Navigation requests are only accepted while idle; anything that
/// arrives mid-slide is dropped.
#[derive(Debug, Clone)]
pub struct CarouselEngine {
    items: ItemList,
    start_index: usize,
    phase: Phase,
    direction: Direction,
    slide: Tween,
    timing: CarouselTiming,
}

impl CarouselEngine {
    pub fn new(items: ItemList, timing: CarouselTiming) -> Self {
        Self {
            items,
            start_index: 0,
            phase: Phase::Idle,
            direction: Direction::default(),
            slide: Tween::settled(0.0, timing.duration, timing.easing),
            timing,
        }
    }

    /// Swap in a freshly fetched list.
    ///
    /// The start index is reduced modulo the new length so the window stays
    /// valid; a slide already in flight keeps running. An empty list has
    /// nothing to slide, so any slide in flight settles at rest.
    pub fn replace_items(&mut self, items: ItemList) {
        self.start_index = match items.len() {
            0 => {
                self.phase = Phase::Idle;
                self.slide = Tween::settled(
                    0.0,
                    self.timing.duration,
                    self.timing.easing,
                );
                0
            }
            len => self.start_index % len,
        };
        debug!(
            len = items.len(),
            start_index = self.start_index,
            "carousel items replaced"
        );
        self.items = items;
    }

    /// Ask for a slide in `direction`.
    ///
    /// Returns whether the request was taken. Requests are ignored while a
    /// slide is running or when there is nothing to show.
    pub fn request_navigate(&mut self, direction: Direction) -> bool {
        if self.phase != Phase::Idle || self.items.is_empty() {
            trace!(?direction, phase = ?self.phase, "navigation request dropped");
            return false;
        }
        self.direction = direction;
        self.phase = Phase::RetractingOut;
        self.slide.start(0.0, -self.timing.slide_distance);
        debug!(?direction, start_index = self.start_index, "carousel slide started");
        true
    }

    /// Advance the slide by one frame interval.
    ///
    /// Time left over when the retract leg finishes inside `delta` carries
    /// into the advance leg, so any split of deltas summing to two legs
    /// completes the slide. The final leg clamps at rest.
    pub fn advance(&mut self, delta: Duration) {
        if self.phase == Phase::Idle || self.items.is_empty() || delta.is_zero()
        {
            return;
        }

        let mut remaining = delta;
        if self.phase == Phase::RetractingOut {
            remaining = self.slide.advance(remaining);
            if self.slide.is_active() {
                return;
            }
            self.start_index =
                shifted_start(self.start_index, self.items.len(), self.direction);
            self.phase = Phase::AdvancingIn;
            self.slide.start(-self.timing.slide_distance, 0.0);
            debug!(
                direction = ?self.direction,
                start_index = self.start_index,
                "carousel window swapped"
            );
            if remaining.is_zero() {
                return;
            }
        }

        self.slide.advance(remaining);
        if !self.slide.is_active() {
            self.phase = Phase::Idle;
            debug!(start_index = self.start_index, "carousel slide finished");
        }
    }

    /// Items bound to the walls, from the committed start index.
    pub fn current_window(&self) -> CarouselWindow<'_> {
        CarouselWindow::new(&self.items, self.start_index)
    }

    /// Vertical displacement to apply to every frame this render.
    pub fn current_offset(&self) -> f32 {
        match self.phase {
            Phase::Idle => 0.0,
            Phase::RetractingOut | Phase::AdvancingIn => self.slide.value(),
        }
    }

    pub fn transition(&self) -> TransitionState {
        TransitionState {
            phase: self.phase,
            elapsed: match self.phase {
                Phase::Idle => Duration::ZERO,
                _ => self.slide.elapsed(),
            },
            direction: self.direction,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn items(&self) -> &ItemList {
        &self.items
    }

    pub fn timing(&self) -> &CarouselTiming {
        &self.timing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_model::{Item, ItemId};

    const T: Duration = Duration::from_millis(600);

    fn engine(len: usize) -> CarouselEngine {
        let items: ItemList = (0..len)
            .map(|i| Item::new(ItemId::new(format!("i{i}")).unwrap(), "t"))
            .collect();
        CarouselEngine::new(items, CarouselTiming::default())
    }

    #[test]
    fn idle_engine_ignores_ticks() {
        let mut e = engine(5);
        e.advance(Duration::from_secs(10));
        assert_eq!(e.start_index(), 0);
        assert_eq!(e.current_offset(), 0.0);
        assert!(e.is_idle());
    }

    #[test]
    fn retract_leg_reaches_full_distance_before_swap() {
        let mut e = engine(7);
        assert!(e.request_navigate(Direction::Next));

        e.advance(Duration::from_millis(300));
        assert_eq!(e.phase(), Phase::RetractingOut);
        assert!((e.current_offset() + 1.0).abs() < 1e-6);
        assert_eq!(e.start_index(), 0);

        e.advance(Duration::from_millis(300));
        assert_eq!(e.phase(), Phase::AdvancingIn);
        assert_eq!(e.current_offset(), -2.0);
        assert_eq!(e.start_index(), 3);
        assert_eq!(e.transition().elapsed, Duration::ZERO);
    }

    #[test]
    fn start_index_is_frozen_during_advance_leg() {
        let mut e = engine(7);
        e.request_navigate(Direction::Previous);
        e.advance(T);
        let swapped = e.start_index();
        assert_eq!(swapped, 4);
        for _ in 0..5 {
            e.advance(Duration::from_millis(100));
            assert_eq!(e.start_index(), swapped);
        }
        e.advance(Duration::from_millis(100));
        assert!(e.is_idle());
        assert_eq!(e.start_index(), swapped);
    }

    #[test]
    fn oversized_delta_finishes_in_one_step() {
        let mut e = engine(7);
        e.request_navigate(Direction::Next);
        e.advance(Duration::from_secs(30));
        assert!(e.is_idle());
        assert_eq!(e.start_index(), 3);
        assert_eq!(e.current_offset(), 0.0);
    }

    #[test]
    fn leftover_from_retract_carries_into_advance() {
        let mut e = engine(7);
        e.request_navigate(Direction::Next);
        e.advance(Duration::from_millis(900));
        assert_eq!(e.phase(), Phase::AdvancingIn);
        assert_eq!(e.transition().elapsed, Duration::from_millis(300));
        assert!((e.current_offset() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn empty_list_refuses_navigation() {
        let mut e = engine(0);
        assert!(!e.request_navigate(Direction::Next));
        e.advance(T);
        assert!(e.is_idle());
        assert!(e.current_window().is_empty());
    }

    #[test]
    fn replacing_items_rewraps_start_index() {
        let mut e = engine(9);
        e.request_navigate(Direction::Next);
        e.advance(T * 2);
        e.request_navigate(Direction::Next);
        e.advance(T * 2);
        assert_eq!(e.start_index(), 6);

        e.replace_items(engine(4).items().clone());
        assert_eq!(e.start_index(), 2);
        assert_eq!(e.current_window().indices(), Some([2, 3, 0]));

        e.replace_items(ItemList::empty());
        assert_eq!(e.start_index(), 0);
        assert!(e.current_window().is_empty());
    }

    #[test]
    fn emptying_the_list_mid_slide_settles_at_rest() {
        let mut e = engine(7);
        e.request_navigate(Direction::Next);
        e.advance(Duration::from_millis(300));
        assert!(e.current_offset() < 0.0);

        e.replace_items(ItemList::empty());
        assert!(e.is_idle());
        assert_eq!(e.current_offset(), 0.0);

        e.advance(Duration::from_secs(10));
        assert!(e.is_idle());
        assert_eq!(e.current_offset(), 0.0);
        assert_eq!(e.transition().elapsed, Duration::ZERO);

        e.replace_items(engine(4).items().clone());
        assert!(e.request_navigate(Direction::Next));
    }
}
