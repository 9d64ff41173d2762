//! Host-facing game driver
//!
//! Owns the simulation plus the frame clock and input accumulator. A host
//! forwards key events and calls [`Game::frame`] once per display frame.

use crate::audio::{AudioCue, AudioSink};
use crate::platform::{FrameClock, InputState, Intent};
use crate::settings::GameConfig;
use crate::sim::{GameEvent, GamePhase, GameState, LevelGenerator, RandomPattern, Snapshot, tick};

/// Game instance holding all state
pub struct Game {
    state: GameState,
    clock: FrameClock,
    input: InputState,
    levels: Box<dyn LevelGenerator>,
}

impl Game {
    /// New session with randomly chosen level patterns
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_levels(config, seed, Box::new(RandomPattern))
    }

    pub fn with_levels(config: GameConfig, seed: u64, mut levels: Box<dyn LevelGenerator>) -> Self {
        let clock = FrameClock::new(config.max_frame_ms);
        let state = GameState::new(config, seed, levels.as_mut());
        log::info!("New game (seed {seed})");
        Self {
            state,
            clock,
            input: InputState::default(),
            levels,
        }
    }

    pub fn handle_intent(&mut self, intent: Intent) {
        self.input.apply(intent);
    }

    /// Forward a key event; returns whether the key is bound
    pub fn handle_key(&mut self, key: &str, pressed: bool) -> bool {
        match Intent::from_key(key, pressed) {
            Some(intent) => {
                self.handle_intent(intent);
                true
            }
            None => false,
        }
    }

    /// Run one display frame at host time `timestamp_ms`.
    ///
    /// Plays the frame's sound cues and returns its events.
    pub fn frame(&mut self, timestamp_ms: f64, audio: &mut dyn AudioSink) -> Vec<GameEvent> {
        let input = self.input.take_frame();
        let dt_ms = self.clock.advance(timestamp_ms);
        tick(&mut self.state, &input, dt_ms, self.levels.as_mut());

        let events = self.state.drain_events();
        for cue in events.iter().filter_map(AudioCue::for_event) {
            audio.play(cue);
        }
        events
    }

    /// Start over with a fresh session (same config and level generator)
    pub fn restart(&mut self, seed: u64) {
        let config = self.state.config.clone();
        self.state = GameState::new(config, seed, self.levels.as_mut());
        self.input = InputState::default();
        self.clock.reset();
        log::info!("Restarted game (seed {seed})");
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.state.snapshot()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }
}
