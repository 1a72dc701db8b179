use tracing::info;
use vitrine_core::{AudioSink, Result};

/// Audio sink for headless runs; records state and logs transitions.
#[derive(Debug, Default)]
pub struct LoggingSink {
    muted: bool,
    playing: bool,
}

impl LoggingSink {
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl AudioSink for LoggingSink {
    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        info!(muted, "audio mute changed");
    }

    fn play(&mut self) -> Result<()> {
        self.playing = true;
        info!("audio playing");
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
        info!("audio paused");
    }
}
