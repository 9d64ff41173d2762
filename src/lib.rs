//! Brick Breaker - paddle-and-ball arcade core
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, effects, per-frame update)
//! - `platform`: Host abstraction (frame clock, keyboard intents)
//! - `audio`: Fire-and-forget sound cue sink
//! - `settings`: Data-driven game configuration
//! - `game`: Host-facing driver tying the above together

pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;

pub use audio::{AudioCue, AudioSink, LogAudio};
pub use error::ConfigError;
pub use game::Game;
pub use settings::GameConfig;

/// Fixed gameplay constants
pub mod consts {
    /// Default arena dimensions
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;
    /// Shortest arena every built-in level layout still fits into
    pub const MIN_GAME_HEIGHT: f32 = 200.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Gap between paddle bottom and arena bottom
    pub const PADDLE_BOTTOM_GAP: f32 = 10.0;
    pub const PADDLE_MIN_WIDTH: f32 = 50.0;
    pub const PADDLE_MAX_WIDTH: f32 = 150.0;
    /// Horizontal speed range produced by a paddle hit (px/s, edge to edge)
    pub const PADDLE_DEFLECTION: f32 = 300.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Vertical speed cap applied when gravity wears off
    pub const GRAVITY_EXIT_MAX_SPEED: f32 = 300.0;

    /// Brick defaults
    pub const BRICK_WIDTH: f32 = 20.0;
    pub const BRICK_HEIGHT: f32 = 5.0;
    pub const BRICK_SCORE: u64 = 10;

    /// Power-up defaults
    pub const POWER_UP_SIZE: f32 = 20.0;
    pub const POWER_UP_FALL_SPEED: f32 = 150.0;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const BULLET_SPEED: f32 = -400.0;
    /// Bullet spawn inset from each paddle end
    pub const BULLET_INSET: f32 = 10.0;

    /// Particle defaults (per-frame units)
    pub const PARTICLE_SIZE: f32 = 2.0;
    pub const PARTICLE_FADE: f32 = 0.02;
    pub const PARTICLE_MAX_SPEED: f32 = 2.0;
    pub const BRICK_PARTICLES: usize = 15;
    pub const PICKUP_PARTICLES: usize = 25;

    /// Effect multipliers
    pub const ENLARGE_FACTOR: f32 = 1.5;
    pub const SHRINK_FACTOR: f32 = 0.5;
    pub const SPEEDUP_FACTOR: f32 = 1.5;
    pub const SLOWDOWN_FACTOR: f32 = 0.5;
}

/// Convert a frame delta in milliseconds to seconds.
///
/// Returns `None` for deltas that must not advance the simulation
/// (first frame, zero, negative or non-finite).
#[inline]
pub fn delta_secs(dt_ms: f32) -> Option<f32> {
    if dt_ms.is_finite() && dt_ms > 0.0 {
        Some(dt_ms / 1000.0)
    } else {
        None
    }
}

/// Pack an 8-bit RGB triple into the `0xRRGGBB` form used for entity colours
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}
