//! Per-frame driver tying user input, the carousel, the board and audio
//! together for a host render loop.

use std::time::Duration;

use tracing::trace;
use vitrine_model::ItemList;

use crate::{
    audio::{AudioSink, BackgroundAudio},
    board::{BoardFlip, FlipTiming},
    carousel::{CarouselEngine, CarouselTiming, Direction},
    presenter::{FrameLayout, FramePlacement, present},
};

/// Discrete pointer events the scene reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserInput {
    NavigatePrev,
    NavigateNext,
    ToggleFlip,
    ToggleAudio,
}

#[derive(Debug)]
pub struct Gallery<S: AudioSink> {
    carousel: CarouselEngine,
    board: BoardFlip,
    audio: BackgroundAudio,
    sink: S,
    layout: FrameLayout,
}

impl<S: AudioSink> Gallery<S> {
    pub fn new(
        items: ItemList,
        carousel: CarouselTiming,
        flip: FlipTiming,
        mut sink: S,
    ) -> Self {
        let audio = BackgroundAudio::new(&mut sink);
        Self {
            carousel: CarouselEngine::new(items, carousel),
            board: BoardFlip::new(flip),
            audio,
            sink,
            layout: FrameLayout::default(),
        }
    }

    pub fn with_layout(mut self, layout: FrameLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Apply one input event; returns whether it changed anything.
    pub fn handle(&mut self, input: UserInput) -> bool {
        trace!(?input, "gallery input");
        match input {
            UserInput::NavigatePrev => {
                self.carousel.request_navigate(Direction::Previous)
            }
            UserInput::NavigateNext => {
                self.carousel.request_navigate(Direction::Next)
            }
            UserInput::ToggleFlip => {
                self.board.toggle();
                true
            }
            UserInput::ToggleAudio => {
                let before = self.audio.is_enabled();
                self.audio.toggle(&mut self.sink) != before
            }
        }
    }

    /// Advance every animation by one frame interval.
    pub fn tick(&mut self, delta: Duration) {
        self.carousel.advance(delta);
        self.board.advance(delta);
    }

    pub fn replace_items(&mut self, items: ItemList) {
        self.carousel.replace_items(items);
    }

    /// The host entered an immersive session.
    pub fn session_started(&mut self) {
        self.audio.session_started(&mut self.sink);
    }

    /// Frames to draw this render.
    pub fn placements(&self) -> Vec<FramePlacement> {
        present(
            &self.carousel.current_window(),
            self.carousel.current_offset(),
            &self.layout,
        )
    }

    pub fn board_angle(&self) -> f32 {
        self.board.current_angle()
    }

    pub fn carousel(&self) -> &CarouselEngine {
        &self.carousel
    }

    pub fn board(&self) -> &BoardFlip {
        &self.board
    }

    pub fn audio_enabled(&self) -> bool {
        self.audio.is_enabled()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{audio::tests::RecordingSink, carousel::Phase};
    use vitrine_model::{Item, ItemId, Photo};

    fn gallery(len: usize) -> Gallery<RecordingSink> {
        let items: ItemList = (0..len)
            .map(|i| {
                Item::new(ItemId::new(format!("g{i}")).unwrap(), format!("#{i}"))
                    .with_photo(Photo::new(format!("https://img/{i}.jpg")))
            })
            .collect();
        Gallery::new(
            items,
            CarouselTiming::default(),
            FlipTiming::default(),
            RecordingSink::default(),
        )
    }

    #[test]
    fn navigation_and_flip_run_side_by_side() {
        let mut g = gallery(6);
        assert!(g.handle(UserInput::NavigateNext));
        assert!(g.handle(UserInput::ToggleFlip));
        assert!(!g.handle(UserInput::NavigatePrev), "dropped mid-slide");

        g.tick(Duration::from_millis(600));
        assert_eq!(g.carousel().phase(), Phase::AdvancingIn);
        assert_eq!(g.board_angle(), std::f32::consts::PI);

        g.tick(Duration::from_millis(600));
        let labels: Vec<_> =
            g.placements().iter().map(|p| p.display_label()).collect();
        assert_eq!(labels, ["04", "05", "06"]);
    }

    #[test]
    fn placements_carry_the_slide_offset() {
        let mut g = gallery(3);
        g.handle(UserInput::NavigateNext);
        g.tick(Duration::from_millis(600));
        let ys: Vec<f32> = g.placements().iter().map(|p| p.position[1]).collect();
        assert!(ys.iter().all(|y| (y - (1.8 - 2.0)).abs() < 1e-5));
    }

    #[test]
    fn audio_toggle_reports_change() {
        let mut g = gallery(1);
        assert!(g.handle(UserInput::ToggleAudio));
        assert!(g.audio_enabled());
        assert!(g.sink().playing);
        assert!(g.handle(UserInput::ToggleAudio));
        assert!(!g.audio_enabled());
    }
}
