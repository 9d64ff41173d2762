//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::{EffectScheduler, EffectTargets};
use super::geom::{Aabb, Bounds};
use super::level::{LevelGenerator, Pattern};
use crate::consts::*;
use crate::rgb;
use crate::settings::GameConfig;

/// Top-level game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Lives exhausted; only an external restart leaves this phase
    GameOver,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    Enlarge,
    Shrink,
    MultiBall,
    SpeedUp,
    SlowDown,
    Fireball,
    Guns,
    Gravity,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 8] = [
        PowerUpKind::Enlarge,
        PowerUpKind::Shrink,
        PowerUpKind::MultiBall,
        PowerUpKind::SpeedUp,
        PowerUpKind::SlowDown,
        PowerUpKind::Fireball,
        PowerUpKind::Guns,
        PowerUpKind::Gravity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Enlarge => "enlarge",
            PowerUpKind::Shrink => "shrink",
            PowerUpKind::MultiBall => "multiball",
            PowerUpKind::SpeedUp => "speedup",
            PowerUpKind::SlowDown => "slowdown",
            PowerUpKind::Fireball => "fireball",
            PowerUpKind::Guns => "guns",
            PowerUpKind::Gravity => "gravity",
        }
    }

    /// Display colour of the falling capsule
    pub fn color(&self) -> u32 {
        match self {
            PowerUpKind::Enlarge => rgb(0x00, 0xFF, 0x00),
            PowerUpKind::Shrink => rgb(0xFF, 0x00, 0x00),
            PowerUpKind::MultiBall => rgb(0x00, 0x00, 0xFF),
            PowerUpKind::SpeedUp => rgb(0xFF, 0xFF, 0x00),
            PowerUpKind::SlowDown => rgb(0x00, 0xFF, 0xFF),
            _ => rgb(0xFF, 0xFF, 0xFF),
        }
    }

    /// Uniformly random kind
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Brick palette (cosmetic)
pub const BRICK_COLORS: [u32; 6] = [
    rgb(0xFF, 0x00, 0x00),
    rgb(0x00, 0xFF, 0x00),
    rgb(0x00, 0x00, 0xFF),
    rgb(0xFF, 0xFF, 0x00),
    rgb(0xFF, 0x00, 0xFF),
    rgb(0x00, 0xFF, 0xFF),
];

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal velocity (px/s)
    pub vel: f32,
    /// Speed applied while a direction is held (px/s)
    pub speed: f32,
    /// Arena width the paddle is clamped to
    pub game_width: f32,
}

impl Paddle {
    /// Paddle centred near the bottom of the arena
    pub fn new(bounds: Bounds, speed: f32) -> Self {
        Self {
            pos: Vec2::new(
                bounds.width / 2.0 - PADDLE_WIDTH / 2.0,
                bounds.height - PADDLE_HEIGHT - PADDLE_BOTTOM_GAP,
            ),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            vel: 0.0,
            speed,
            game_width: bounds.width,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(self.width, self.height))
    }

    /// Set velocity from a direction in [-1, 1]
    pub fn steer(&mut self, direction: f32) {
        self.vel = direction.clamp(-1.0, 1.0) * self.speed;
    }

    pub fn update(&mut self, dt: f32) {
        self.pos.x += self.vel * dt;
        self.clamp_to_bounds();
    }

    /// Resize, keeping the width within [PADDLE_MIN_WIDTH, PADDLE_MAX_WIDTH]
    pub fn set_width(&mut self, width: f32) {
        self.width = width.clamp(PADDLE_MIN_WIDTH, PADDLE_MAX_WIDTH);
        self.clamp_to_bounds();
    }

    fn clamp_to_bounds(&mut self) {
        let max_x = (self.game_width - self.width).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Centre
    pub pos: Vec2,
    /// Velocity (px/s)
    pub vel: Vec2,
    pub radius: f32,
    /// Riding the paddle, waiting for launch
    pub stuck: bool,
    /// Passes through bricks without bouncing
    pub fireball: bool,
    /// Accrues downward acceleration
    pub gravity: bool,
}

impl Ball {
    /// New stuck ball at the arena centre
    pub fn new(bounds: Bounds, launch_vel: Vec2) -> Self {
        Self {
            pos: bounds.center(),
            vel: launch_vel,
            radius: BALL_RADIUS,
            stuck: true,
            fireball: false,
            gravity: false,
        }
    }

    /// Back to the arena centre, stuck, with launch velocity. Effect flags survive.
    pub fn reset(&mut self, bounds: Bounds, launch_vel: Vec2) {
        self.pos = bounds.center();
        self.vel = launch_vel;
        self.stuck = true;
    }

    pub fn release(&mut self) {
        self.stuck = false;
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::around(self.pos, self.radius)
    }

    /// Advance one frame.
    ///
    /// Side and top walls reflect: the velocity component is pointed back into
    /// the arena and the ball is placed on the wall so it cannot tunnel out.
    /// The bottom edge is left open; losing the ball is detected by the engine.
    pub fn update(&mut self, dt: f32, paddle: &Paddle, bounds: Bounds, gravity_accel: f32) {
        if self.stuck {
            self.pos = paddle.pos + Vec2::new(paddle.width / 2.0, -self.radius);
            return;
        }

        if self.gravity {
            self.vel.y += gravity_accel * dt;
        }

        self.pos += self.vel * dt;

        let r = self.radius;
        if self.pos.x - r < 0.0 {
            self.pos.x = r;
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x + r > bounds.width {
            self.pos.x = bounds.width - r;
            self.vel.x = -self.vel.x.abs();
        }
        if self.pos.y - r < 0.0 {
            self.pos.y = r;
            self.vel.y = self.vel.y.abs();
        }
    }
}

/// A brick entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub deleted: bool,
    /// Power-up released on destruction
    pub power_up: Option<PowerUpKind>,
    pub color: u32,
}

impl Brick {
    pub fn new(pos: Vec2, power_up: Option<PowerUpKind>, color: u32) -> Self {
        Self {
            pos,
            size: Vec2::new(BRICK_WIDTH, BRICK_HEIGHT),
            deleted: false,
            power_up,
            color,
        }
    }

    /// Brick with a rolled payload and a random palette colour
    pub fn rolled(pos: Vec2, power_up_chance: f64, rng: &mut impl Rng) -> Self {
        let power_up = if rng.random_bool(power_up_chance) {
            Some(PowerUpKind::random(rng))
        } else {
            None
        };
        let color = BRICK_COLORS[rng.random_range(0..BRICK_COLORS.len())];
        Self::new(pos, power_up, color)
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Fall speed (px/s, positive is down)
    pub speed: f32,
    pub kind: PowerUpKind,
    pub deleted: bool,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            size: Vec2::splat(POWER_UP_SIZE),
            speed: POWER_UP_FALL_SPEED,
            kind,
            deleted: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn update(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
    }
}

/// A paddle gun shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical speed (px/s, negative is up)
    pub speed: f32,
    pub deleted: bool,
}

impl Bullet {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            speed: BULLET_SPEED,
            deleted: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Move; flags itself once it leaves the top of the arena
    pub fn update(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
        if self.pos.y < 0.0 {
            self.deleted = true;
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Velocity in px per frame
    pub vel: Vec2,
    pub color: u32,
    /// 1 at spawn, fades by PARTICLE_FADE per frame
    pub alpha: f32,
    pub size: f32,
}

impl Particle {
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.alpha -= PARTICLE_FADE;
    }

    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0
    }
}

/// What destroyed a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitSource {
    Ball,
    Bullet,
}

/// Things that happened during a frame, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BrickDestroyed {
        pos: Vec2,
        by: HitSource,
        dropped: Option<PowerUpKind>,
    },
    PowerUpCollected(PowerUpKind),
    EffectExpired(PowerUpKind),
    BulletsFired,
    BallLost { remaining: usize },
    LifeLost { lives: u32 },
    LevelCleared { level: u32 },
    PhaseChanged { from: GamePhase, to: GamePhase },
    GameOver { score: u64 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    /// Simulated play time (ms); does not advance outside `Playing`
    pub time_ms: f64,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    pub power_ups: Vec<PowerUp>,
    pub bullets: Vec<Bullet>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub effects: EffectScheduler,
    /// Paddle can fire
    pub guns: bool,
    pub last_shot_ms: Option<f64>,
    /// Events of the current frame
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New session in the menu, with the first level laid out
    pub fn new(config: GameConfig, seed: u64, levels: &mut dyn LevelGenerator) -> Self {
        let bounds = config.bounds();
        let launch_vel = config.launch_velocity();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 0,
            lives: config.lives,
            score: 0,
            time_ms: 0.0,
            phase: GamePhase::Menu,
            paddle: Paddle::new(bounds, config.paddle_speed),
            balls: vec![Ball::new(bounds, launch_vel)],
            bricks: Vec::new(),
            power_ups: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            effects: EffectScheduler::new(config.effect_duration_ms),
            guns: false,
            last_shot_ms: None,
            events: Vec::new(),
            config,
        };
        state.next_level(levels);
        state
    }

    pub fn bounds(&self) -> Bounds {
        self.config.bounds()
    }

    /// Replace the brick field with a freshly generated level.
    ///
    /// An empty layout from `levels` falls back to the standard grid. Returns
    /// false, leaving the level unchanged, if no bricks could be placed at all.
    pub fn next_level(&mut self, levels: &mut dyn LevelGenerator) -> bool {
        let bounds = self.bounds();
        let mut positions = levels.generate(bounds, &mut self.rng);
        if positions.is_empty() {
            log::warn!("Level generator produced no bricks, using standard grid");
            positions = Pattern::Standard.layout(bounds);
        }
        if positions.is_empty() {
            log::warn!("No room for bricks in a {}x{} arena", bounds.width, bounds.height);
            return false;
        }

        self.level += 1;
        let chance = self.config.power_up_chance;
        self.bricks = positions
            .into_iter()
            .map(|pos| Brick::rolled(pos, chance, &mut self.rng))
            .collect();
        log::info!("Level {}: {} bricks", self.level, self.bricks.len());
        true
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.events.push(GameEvent::PhaseChanged {
                from: self.phase,
                to: phase,
            });
            self.phase = phase;
        }
    }

    /// Launch every ball riding the paddle
    pub fn release_balls(&mut self) {
        for ball in &mut self.balls {
            ball.release();
        }
    }

    /// Fire a bullet pair from the paddle ends if guns are up and the interval allows
    pub fn try_shoot(&mut self) -> bool {
        if !self.guns {
            return false;
        }
        let interval = self.config.fire_interval_ms;
        if self
            .last_shot_ms
            .is_some_and(|last| self.time_ms - last < interval)
        {
            return false;
        }
        let y = self.paddle.pos.y;
        let left = self.paddle.pos.x + BULLET_INSET;
        let right = self.paddle.pos.x + self.paddle.width - BULLET_INSET;
        self.bullets.push(Bullet::new(Vec2::new(left, y)));
        self.bullets.push(Bullet::new(Vec2::new(right, y)));
        self.last_shot_ms = Some(self.time_ms);
        self.events.push(GameEvent::BulletsFired);
        true
    }

    /// Burst of particles with random per-frame velocities
    pub fn spawn_particles(&mut self, at: Vec2, color: u32, count: usize) {
        let cap = self.config.max_particles;
        if cap == 0 {
            return;
        }
        for _ in 0..count {
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 2.0 * PARTICLE_MAX_SPEED,
                (self.rng.random::<f32>() - 0.5) * 2.0 * PARTICLE_MAX_SPEED,
            );
            self.particles.push(Particle {
                pos: at,
                vel,
                color,
                alpha: 1.0,
                size: PARTICLE_SIZE,
            });
        }
        // Oldest particles go first once over the cap
        let excess = self.particles.len().saturating_sub(cap);
        self.particles.drain(..excess);
    }

    /// Borrow the entities an effect may touch, alongside the RNG
    pub fn effect_targets(&mut self) -> (EffectTargets<'_>, &mut Pcg32) {
        (
            EffectTargets {
                paddle: &mut self.paddle,
                balls: &mut self.balls,
                guns: &mut self.guns,
            },
            &mut self.rng,
        )
    }

    /// Take this frame's events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            level: self.level,
            score: self.score,
            lives: self.lives,
            guns: self.guns,
            active_effects: self.effects.remaining(self.time_ms),
            paddle: &self.paddle,
            balls: &self.balls,
            bricks: &self.bricks,
            power_ups: &self.power_ups,
            bullets: &self.bullets,
            particles: &self.particles,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub level: u32,
    pub score: u64,
    pub lives: u32,
    pub guns: bool,
    /// Active effects with remaining time (ms)
    pub active_effects: Vec<(PowerUpKind, f64)>,
    pub paddle: &'a Paddle,
    pub balls: &'a [Ball],
    pub bricks: &'a [Brick],
    pub power_ups: &'a [PowerUp],
    pub bullets: &'a [Bullet],
    pub particles: &'a [Particle],
}
