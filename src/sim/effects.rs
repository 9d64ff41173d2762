//! Timed power-up effects
//!
//! Activations are recorded as `(kind, expires_at)` and polled against the
//! simulation clock once per frame, so reversals run on the frame loop.
//!
//! Effects that set an absolute value on reversal (paddle width, fireball,
//! guns, gravity) share a slot: re-activating anything in a slot replaces the
//! pending reversal, so the effect lasts until one duration after the latest
//! pickup. Speed effects scale velocities multiplicatively and each keeps its
//! own reversal so that every multiply is undone exactly once.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle, PowerUpKind};
use crate::consts::*;

/// What a pending reversal is keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectSlot {
    PaddleWidth,
    BallSpeed,
    Fireball,
    Guns,
    Gravity,
}

impl EffectSlot {
    /// Slot for a kind; `None` for permanent effects
    pub fn of(kind: PowerUpKind) -> Option<Self> {
        match kind {
            PowerUpKind::Enlarge | PowerUpKind::Shrink => Some(EffectSlot::PaddleWidth),
            PowerUpKind::SpeedUp | PowerUpKind::SlowDown => Some(EffectSlot::BallSpeed),
            PowerUpKind::Fireball => Some(EffectSlot::Fireball),
            PowerUpKind::Guns => Some(EffectSlot::Guns),
            PowerUpKind::Gravity => Some(EffectSlot::Gravity),
            PowerUpKind::MultiBall => None,
        }
    }

    /// Whether re-activation replaces the pending reversal
    pub fn coalesces(&self) -> bool {
        !matches!(self, EffectSlot::BallSpeed)
    }
}

/// A pending reversal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    pub expires_at_ms: f64,
}

/// Pending effect reversals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectScheduler {
    duration_ms: f64,
    active: Vec<ActiveEffect>,
}

impl EffectScheduler {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            active: Vec::new(),
        }
    }

    /// Record an activation at `now`. Returns the kind whose pending reversal
    /// was replaced, if any.
    pub fn schedule(&mut self, kind: PowerUpKind, now_ms: f64) -> Option<PowerUpKind> {
        let slot = EffectSlot::of(kind)?;

        let pending = if slot.coalesces() {
            self.active
                .iter()
                .position(|e| EffectSlot::of(e.kind) == Some(slot))
        } else {
            None
        };
        let replaced = pending.map(|i| self.active.remove(i).kind);

        self.active.push(ActiveEffect {
            kind,
            expires_at_ms: now_ms + self.duration_ms,
        });
        replaced
    }

    /// Remove and return every effect due at `now`, earliest first
    pub fn expire(&mut self, now_ms: f64) -> Vec<PowerUpKind> {
        let mut due: Vec<ActiveEffect> = Vec::new();
        self.active.retain(|e| {
            if e.expires_at_ms <= now_ms {
                due.push(*e);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.expires_at_ms.total_cmp(&b.expires_at_ms));
        due.into_iter().map(|e| e.kind).collect()
    }

    /// Active kinds with time left (ms)
    pub fn remaining(&self, now_ms: f64) -> Vec<(PowerUpKind, f64)> {
        self.active
            .iter()
            .map(|e| (e.kind, (e.expires_at_ms - now_ms).max(0.0)))
            .collect()
    }
}

/// The entities an effect may modify, passed explicitly
pub struct EffectTargets<'a> {
    pub paddle: &'a mut Paddle,
    pub balls: &'a mut Vec<Ball>,
    pub guns: &'a mut bool,
}

/// Apply an effect's immediate change
pub fn apply(kind: PowerUpKind, targets: &mut EffectTargets<'_>, rng: &mut impl Rng) {
    match kind {
        PowerUpKind::Enlarge => {
            let width = (targets.paddle.width * ENLARGE_FACTOR).min(PADDLE_MAX_WIDTH);
            targets.paddle.set_width(width);
        }
        PowerUpKind::Shrink => {
            let width = (targets.paddle.width * SHRINK_FACTOR).max(PADDLE_MIN_WIDTH);
            targets.paddle.set_width(width);
        }
        PowerUpKind::MultiBall => {
            let originals = targets.balls.len();
            for i in 0..originals {
                for _ in 0..2 {
                    let mut clone = targets.balls[i].clone();
                    clone.vel = Vec2::new(
                        clone.vel.x * random_sign(rng),
                        clone.vel.y * random_sign(rng),
                    );
                    targets.balls.push(clone);
                }
            }
        }
        PowerUpKind::SpeedUp => scale_balls(targets.balls, SPEEDUP_FACTOR),
        PowerUpKind::SlowDown => scale_balls(targets.balls, SLOWDOWN_FACTOR),
        PowerUpKind::Fireball => {
            for ball in targets.balls.iter_mut() {
                ball.fireball = true;
            }
        }
        PowerUpKind::Guns => *targets.guns = true,
        PowerUpKind::Gravity => {
            for ball in targets.balls.iter_mut() {
                ball.gravity = true;
            }
        }
    }
}

/// Undo an effect once its time is up
pub fn revert(kind: PowerUpKind, targets: &mut EffectTargets<'_>) {
    match kind {
        PowerUpKind::Enlarge | PowerUpKind::Shrink => targets.paddle.set_width(PADDLE_WIDTH),
        PowerUpKind::MultiBall => {}
        PowerUpKind::SpeedUp => scale_balls(targets.balls, 1.0 / SPEEDUP_FACTOR),
        PowerUpKind::SlowDown => scale_balls(targets.balls, 1.0 / SLOWDOWN_FACTOR),
        PowerUpKind::Fireball => {
            for ball in targets.balls.iter_mut() {
                ball.fireball = false;
            }
        }
        PowerUpKind::Guns => *targets.guns = false,
        PowerUpKind::Gravity => {
            for ball in targets.balls.iter_mut() {
                ball.gravity = false;
                let vy = ball.vel.y;
                let sign = if vy > 0.0 { 1.0 } else { -1.0 };
                ball.vel.y = vy.abs().min(GRAVITY_EXIT_MAX_SPEED) * sign;
            }
        }
    }
}

fn scale_balls(balls: &mut [Ball], factor: f32) {
    for ball in balls {
        ball.vel *= factor;
    }
}

fn random_sign(rng: &mut impl Rng) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}
