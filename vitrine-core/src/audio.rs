//! Background music toggle.
//!
//! Playback belongs to the host; this only tracks whether music should be
//! playing and reconciles that with what the sink actually allowed.

use tracing::{info, warn};

use crate::error::Result;

/// Host-side audio output.
pub trait AudioSink {
    fn set_muted(&mut self, muted: bool);

    /// Start or resume playback. Hosts may refuse (autoplay policies,
    /// missing device), in which case the toggle stays off.
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self);
}

/// Whether background music is on.
///
/// Starts off and muted; a page view never makes sound on its own.
#[derive(Debug, Clone, Default)]
pub struct BackgroundAudio {
    enabled: bool,
}

impl BackgroundAudio {
    pub fn new(sink: &mut dyn AudioSink) -> Self {
        sink.set_muted(true);
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip playback; returns the resulting state.
    pub fn toggle(&mut self, sink: &mut dyn AudioSink) -> bool {
        if self.enabled {
            sink.pause();
            self.enabled = false;
        } else {
            self.enable(sink);
        }
        self.enabled
    }

    /// An immersive session counts as a user gesture, so unmute and play.
    pub fn session_started(&mut self, sink: &mut dyn AudioSink) {
        sink.set_muted(false);
        if !self.enabled {
            self.enable(sink);
        }
    }

    fn enable(&mut self, sink: &mut dyn AudioSink) {
        match sink.play() {
            Ok(()) => {
                self.enabled = true;
                info!("background audio started");
            }
            Err(err) => {
                self.enabled = false;
                warn!(error = %err, "background audio could not start");
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::GalleryError;

    #[derive(Debug, Default)]
    pub(crate) struct RecordingSink {
        pub muted: bool,
        pub playing: bool,
        pub refuse: bool,
    }

    impl AudioSink for RecordingSink {
        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn play(&mut self) -> Result<()> {
            if self.refuse {
                return Err(GalleryError::Playback("autoplay blocked".into()));
            }
            self.playing = true;
            Ok(())
        }

        fn pause(&mut self) {
            self.playing = false;
        }
    }

    #[test]
    fn starts_muted_and_off() {
        let mut sink = RecordingSink::default();
        let audio = BackgroundAudio::new(&mut sink);
        assert!(sink.muted);
        assert!(!audio.is_enabled());
    }

    #[test]
    fn toggle_plays_and_pauses() {
        let mut sink = RecordingSink::default();
        let mut audio = BackgroundAudio::new(&mut sink);
        assert!(audio.toggle(&mut sink));
        assert!(sink.playing);
        assert!(!audio.toggle(&mut sink));
        assert!(!sink.playing);
    }

    #[test]
    fn refused_playback_leaves_toggle_off() {
        let mut sink = RecordingSink {
            refuse: true,
            ..Default::default()
        };
        let mut audio = BackgroundAudio::new(&mut sink);
        assert!(!audio.toggle(&mut sink));
        audio.session_started(&mut sink);
        assert!(!audio.is_enabled());
        assert!(!sink.muted);
    }
}
