//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Time only advances through `tick` deltas
//! - Seeded RNG only
//! - Entities are updated in vector order
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod geom;
pub mod level;
pub mod state;
pub mod tick;

pub use effects::{ActiveEffect, EffectScheduler, EffectSlot};
pub use geom::{Aabb, Axis, Bounds, Penetration};
pub use level::{FixedLayout, LevelGenerator, Pattern, RandomPattern};
pub use state::{
    Ball, Brick, Bullet, GameEvent, GamePhase, GameState, HitSource, Paddle, Particle, PowerUp,
    PowerUpKind, Snapshot,
};
pub use tick::{TickInput, activate, tick};
