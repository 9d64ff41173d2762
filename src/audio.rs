//! Sound cues
//!
//! The core only names cues; playing them is the host's job. Cues are
//! fire-and-forget: nothing waits for playback.

use crate::sim::{GameEvent, HitSource};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// A ball broke a brick
    BrickDestroyed,
    /// Paddle caught a power-up
    PowerUpCollected,
}

impl AudioCue {
    /// Cue name as the host's sound table keys it
    pub fn name(&self) -> &'static str {
        match self {
            AudioCue::BrickDestroyed => "brick-destroyed",
            AudioCue::PowerUpCollected => "powerup-collected",
        }
    }

    /// Cue triggered by a game event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BrickDestroyed {
                by: HitSource::Ball,
                ..
            } => Some(AudioCue::BrickDestroyed),
            GameEvent::PowerUpCollected(_) => Some(AudioCue::PowerUpCollected),
            _ => None,
        }
    }
}

/// Receiver of sound cues
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Discards every cue
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Logs cues instead of playing them (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: AudioCue) {
        log::debug!("cue: {}", cue.name());
    }
}

/// Recording sink
impl AudioSink for Vec<AudioCue> {
    fn play(&mut self, cue: AudioCue) {
        self.push(cue);
    }
}
