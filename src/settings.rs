//! Game configuration
//!
//! Every tunable with its default. Loaded from JSON; missing fields fall back
//! to defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GAME_HEIGHT, GAME_WIDTH, MIN_GAME_HEIGHT, PADDLE_MAX_WIDTH};
use crate::error::ConfigError;
use crate::sim::Bounds;

/// Gameplay tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Arena ===
    pub width: f32,
    pub height: f32,

    // === Player ===
    /// Lives at session start
    pub lives: u32,
    /// Paddle speed while a direction is held (px/s)
    pub paddle_speed: f32,

    // === Ball ===
    /// Velocity a ball gets on (re)spawn (px/s)
    pub launch_velocity: [f32; 2],
    /// Downward acceleration under the gravity effect (px/s²)
    pub gravity: f32,

    // === Power-ups ===
    /// Chance a brick carries a power-up (0.0 - 1.0)
    pub power_up_chance: f64,
    /// How long a timed effect lasts (ms)
    pub effect_duration_ms: f64,
    /// Minimum time between gun shots (ms)
    pub fire_interval_ms: f64,

    // === Frame pacing ===
    /// Longest frame delta fed to the simulation (ms)
    pub max_frame_ms: f32,

    // === Visual ===
    /// Particle cap (0 disables particles)
    pub max_particles: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: GAME_WIDTH,
            height: GAME_HEIGHT,

            lives: 3,
            paddle_speed: 500.0,

            launch_velocity: [300.0, -300.0],
            gravity: 400.0,

            power_up_chance: 0.2,
            effect_duration_ms: 10_000.0,
            fire_interval_ms: 250.0,

            max_frame_ms: 100.0,

            max_particles: 1000,
        }
    }
}

impl GameConfig {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    pub fn launch_velocity(&self) -> Vec2 {
        Vec2::from_array(self.launch_velocity)
    }

    /// Parse and validate JSON config text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.width >= PADDLE_MAX_WIDTH) {
            return Err(ConfigError::invalid(
                "width",
                format!("must be at least {PADDLE_MAX_WIDTH}"),
            ));
        }
        if !(self.height.is_finite() && self.height >= MIN_GAME_HEIGHT) {
            return Err(ConfigError::invalid(
                "height",
                format!("must be at least {MIN_GAME_HEIGHT}"),
            ));
        }
        if !(0.0..=1.0).contains(&self.power_up_chance) {
            return Err(ConfigError::invalid("power_up_chance", "must be within 0..=1"));
        }
        if !(self.effect_duration_ms.is_finite() && self.effect_duration_ms >= 0.0) {
            return Err(ConfigError::invalid("effect_duration_ms", "must be non-negative"));
        }
        if !(self.fire_interval_ms.is_finite() && self.fire_interval_ms >= 0.0) {
            return Err(ConfigError::invalid("fire_interval_ms", "must be non-negative"));
        }
        if !(self.max_frame_ms.is_finite() && self.max_frame_ms > 0.0) {
            return Err(ConfigError::invalid("max_frame_ms", "must be positive"));
        }
        if !self.paddle_speed.is_finite() {
            return Err(ConfigError::invalid("paddle_speed", "must be finite"));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::invalid("gravity", "must be finite"));
        }
        if !self.launch_velocity.iter().all(|v| v.is_finite()) {
            return Err(ConfigError::invalid("launch_velocity", "must be finite"));
        }
        Ok(())
    }
}
