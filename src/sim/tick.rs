//! Per-frame simulation step
//!
//! Advances the game by one host frame. Within `Playing` the work happens in a
//! fixed order: effects expire, paddle, balls, power-ups, ball/brick hits,
//! level regeneration, bullets, particles.

use glam::Vec2;

use super::collision;
use super::effects;
use super::level::LevelGenerator;
use super::state::{GameEvent, GamePhase, GameState, HitSource, PowerUp, PowerUpKind};
use crate::consts::*;
use crate::delta_secs;

/// Input commands for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Held paddle direction: -1 left, 0 still, 1 right
    pub direction: f32,
    /// Start from the menu; in play, launch stuck balls and fire
    pub action: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one frame of `dt_ms` milliseconds
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    dt_ms: f32,
    levels: &mut dyn LevelGenerator,
) {
    state.paddle.steer(input.direction);

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => state.set_phase(GamePhase::Paused),
            GamePhase::Paused => state.set_phase(GamePhase::Playing),
            _ => {}
        }
    }

    if input.action {
        match state.phase {
            GamePhase::Menu => state.set_phase(GamePhase::Playing),
            GamePhase::Playing => {
                state.release_balls();
                state.try_shoot();
            }
            _ => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    // First frame or a clock hiccup: nothing moves
    let Some(dt) = delta_secs(dt_ms) else {
        return;
    };

    if state.lives == 0 {
        state.set_phase(GamePhase::GameOver);
        log::info!("Game over with score {}", state.score);
        state.events.push(GameEvent::GameOver { score: state.score });
        return;
    }

    state.time_ms += f64::from(dt_ms);
    expire_effects(state);

    state.paddle.update(dt);
    update_balls(state, dt);
    update_power_ups(state, dt);
    resolve_ball_bricks(state);

    if state.bricks.is_empty() {
        let cleared = state.level;
        if state.next_level(levels) {
            state.events.push(GameEvent::LevelCleared { level: cleared });
        }
    }

    update_bullets(state, dt);

    for particle in state.particles.iter_mut() {
        particle.update();
    }
    state.particles.retain(|p| p.is_alive());
}

fn expire_effects(state: &mut GameState) {
    for kind in state.effects.expire(state.time_ms) {
        log::debug!("Effect {} expired", kind.as_str());
        let (mut targets, _) = state.effect_targets();
        effects::revert(kind, &mut targets);
        state.events.push(GameEvent::EffectExpired(kind));
    }
}

fn update_balls(state: &mut GameState, dt: f32) {
    let bounds = state.bounds();
    let gravity = state.config.gravity;
    let launch_vel = state.config.launch_velocity();

    let mut i = 0;
    while i < state.balls.len() {
        let ball = &mut state.balls[i];
        ball.update(dt, &state.paddle, bounds, gravity);
        collision::ball_paddle(ball, &state.paddle);

        if collision::ball_lost(ball, bounds) {
            if state.balls.len() == 1 {
                state.lives = state.lives.saturating_sub(1);
                state.balls[i].reset(bounds, launch_vel);
                log::info!("Life lost, {} left", state.lives);
                state.events.push(GameEvent::LifeLost { lives: state.lives });
            } else {
                state.balls.remove(i);
                state.events.push(GameEvent::BallLost {
                    remaining: state.balls.len(),
                });
                continue;
            }
        }
        i += 1;
    }
}

fn update_power_ups(state: &mut GameState, dt: f32) {
    let mut collected: Vec<(PowerUpKind, Vec2)> = Vec::new();
    for power_up in state.power_ups.iter_mut() {
        power_up.update(dt);
        if collision::power_up_paddle(power_up, &state.paddle) {
            collected.push((power_up.kind, power_up.aabb().center()));
        }
    }

    for (kind, at) in collected {
        state.spawn_particles(at, kind.color(), PICKUP_PARTICLES);
        state.events.push(GameEvent::PowerUpCollected(kind));
        activate(state, kind);
    }

    let bottom = state.bounds().height;
    state
        .power_ups
        .retain(|p| !p.deleted && p.pos.y < bottom);
}

/// Apply a collected power-up and schedule its reversal
pub fn activate(state: &mut GameState, kind: PowerUpKind) {
    let now = state.time_ms;
    let (mut targets, rng) = state.effect_targets();
    effects::apply(kind, &mut targets, rng);
    match state.effects.schedule(kind, now) {
        Some(replaced) => log::debug!(
            "Effect {} activated, replacing pending {}",
            kind.as_str(),
            replaced.as_str()
        ),
        None => log::debug!("Effect {} activated", kind.as_str()),
    }
}

fn resolve_ball_bricks(state: &mut GameState) {
    // (brick top-left, brick centre, colour, payload)
    let mut hits: Vec<(Vec2, Vec2, u32, Option<PowerUpKind>)> = Vec::new();
    for brick in state.bricks.iter_mut() {
        for ball in state.balls.iter_mut() {
            if collision::ball_brick(ball, brick) {
                hits.push((brick.pos, brick.aabb().center(), brick.color, brick.power_up));
            }
        }
    }

    for (pos, center, color, dropped) in hits {
        state.score += BRICK_SCORE;
        state.spawn_particles(center, color, BRICK_PARTICLES);
        if let Some(kind) = dropped {
            let spawn_at = Vec2::new(pos.x + BRICK_WIDTH / 2.0, pos.y);
            state.power_ups.push(PowerUp::new(spawn_at, kind));
        }
        state.events.push(GameEvent::BrickDestroyed {
            pos: center,
            by: HitSource::Ball,
            dropped,
        });
    }

    state.bricks.retain(|b| !b.deleted);
}

fn update_bullets(state: &mut GameState, dt: f32) {
    let mut hits: Vec<(Vec2, u32)> = Vec::new();
    for bullet in state.bullets.iter_mut() {
        bullet.update(dt);
        for brick in state.bricks.iter_mut() {
            if collision::bullet_brick(bullet, brick) {
                hits.push((brick.aabb().center(), brick.color));
            }
        }
    }

    for (center, color) in hits {
        state.score += BRICK_SCORE;
        state.spawn_particles(center, color, BRICK_PARTICLES);
        state.events.push(GameEvent::BrickDestroyed {
            pos: center,
            by: HitSource::Bullet,
            dropped: None,
        });
    }

    state.bullets.retain(|b| !b.deleted);
    state.bricks.retain(|b| !b.deleted);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;
    use crate::sim::level::FixedLayout;
    use crate::sim::state::{Ball, Brick};

    const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Playing state with the given brick layout and the ball still on the paddle
    fn playing(layout: Vec<Vec2>) -> (GameState, FixedLayout) {
        let mut levels = FixedLayout(layout);
        let mut state = GameState::new(GameConfig::default(), 12345, &mut levels);
        state.phase = GamePhase::Playing;
        (state, levels)
    }

    fn far_brick() -> Vec2 {
        Vec2::new(700.0, 30.0)
    }

    fn free_ball(state: &GameState, pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(state.bounds(), vel);
        ball.release();
        ball.pos = pos;
        ball
    }

    #[test]
    fn test_tick_menu_to_playing() {
        let mut levels = FixedLayout(vec![far_brick()]);
        let mut state = GameState::new(GameConfig::default(), 12345, &mut levels);
        assert_eq!(state.phase, GamePhase::Menu);

        // Tick without action - stays in the menu
        tick(&mut state, &TickInput::default(), FRAME_MS, &mut levels);
        assert_eq!(state.phase, GamePhase::Menu);

        let start = TickInput {
            action: true,
            ..Default::default()
        };
        tick(&mut state, &start, FRAME_MS, &mut levels);
        assert_eq!(state.phase, GamePhase::Playing);
        // Starting does not launch the ball
        assert!(state.balls[0].stuck);

        tick(&mut state, &start, FRAME_MS, &mut levels);
        assert!(!state.balls[0].stuck);
    }

    #[test]
    fn test_tick_pause() {
        let (mut state, mut levels) = playing(vec![far_brick()]);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, FRAME_MS, &mut levels);
        assert_eq!(state.phase, GamePhase::Paused);

        // Nothing moves while paused
        let time = state.time_ms;
        let held = TickInput {
            direction: 1.0,
            ..Default::default()
        };
        let paddle_x = state.paddle.pos.x;
        tick(&mut state, &held, FRAME_MS, &mut levels);
        assert_eq!(state.time_ms, time);
        assert_eq!(state.paddle.pos.x, paddle_x);

        tick(&mut state, &pause, FRAME_MS, &mut levels);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_zero_delta_is_a_no_op() {
        let (mut state, mut levels) = playing(vec![far_brick()]);
        state.balls[0] = free_ball(&state, Vec2::new(100.0, 100.0), Vec2::new(300.0, -300.0));
        let input = TickInput {
            direction: 1.0,
            ..Default::default()
        };
        let paddle_x = state.paddle.pos.x;
        tick(&mut state, &input, 0.0, &mut levels);
        tick(&mut state, &input, f32::NAN, &mut levels);
        assert_eq!(state.balls[0].pos, Vec2::new(100.0, 100.0));
        assert_eq!(state.paddle.pos.x, paddle_x);
        assert_eq!(state.time_ms, 0.0);
    }

    #[test]
    fn test_held_direction_moves_paddle() {
        let (mut state, mut levels) = playing(vec![far_brick()]);
        let input = TickInput {
            direction: -1.0,
            ..Default::default()
        };
        tick(&mut state, &input, 100.0, &mut levels);
        assert_eq!(state.paddle.pos.x, 350.0 - 50.0);
        // Stuck ball follows
        assert_eq!(state.balls[0].pos.x, 300.0 + 50.0);
    }

    #[test]
    fn test_brick_destroyed_once_by_two_balls() {
        let (mut state, mut levels) = playing(vec![Vec2::new(100.0, 100.0), far_brick()]);
        let ball = free_ball(&state, Vec2::new(110.0, 111.0), Vec2::new(0.0, -300.0));
        state.balls = vec![ball.clone(), ball];
        tick(&mut state, &TickInput::default(), 1.0, &mut levels);

        assert_eq!(state.score, BRICK_SCORE);
        assert_eq!(state.bricks.len(), 1);
        let destroyed = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::BrickDestroyed { .. }))
            .count();
        assert_eq!(destroyed, 1);
        // Only the first ball bounced
        assert!(state.balls[0].vel.y > 0.0);
        assert!(state.balls[1].vel.y < 0.0);
    }

    #[test]
    fn test_fireball_keeps_velocity_through_brick() {
        let (mut state, mut levels) = playing(vec![Vec2::new(100.0, 100.0), far_brick()]);
        let mut ball = free_ball(&state, Vec2::new(110.0, 111.0), Vec2::new(40.0, -300.0));
        ball.fireball = true;
        state.balls = vec![ball];
        tick(&mut state, &TickInput::default(), 1.0, &mut levels);

        assert_eq!(state.score, BRICK_SCORE);
        assert_eq!(state.balls[0].vel, Vec2::new(40.0, -300.0));
    }

    #[test]
    fn test_brick_with_payload_drops_power_up() {
        let (mut state, mut levels) = playing(vec![far_brick()]);
        state.bricks = vec![
            Brick::new(Vec2::new(100.0, 100.0), Some(PowerUpKind::Guns), 0),
            Brick::new(far_brick(), None, 0),
        ];
        state.balls = vec![free_ball(&state, Vec2::new(110.0, 111.0), Vec2::new(0.0, -300.0))];
        tick(&mut state, &TickInput::default(), 1.0, &mut levels);

        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.power_ups[0].kind, PowerUpKind::Guns);
        assert_eq!(state.power_ups[0].pos, Vec2::new(110.0, 100.0));
        assert_eq!(state.particles.len(), BRICK_PARTICLES);
    }

    #[test]
    fn test_level_regenerates_when_cleared() {
        let (mut state, mut levels) = playing(vec![Vec2::new(100.0, 100.0)]);
        assert_eq!(state.level, 1);
        state.balls = vec![free_ball(&state, Vec2::new(110.0, 111.0), Vec2::new(0.0, -300.0))];
        tick(&mut state, &TickInput::default(), 1.0, &mut levels);

        assert_eq!(state.level, 2);
        assert_eq!(state.bricks.len(), 1);
        assert!(!state.bricks[0].deleted);
        assert!(state.events.contains(&GameEvent::LevelCleared { level: 1 }));
    }

    #[test]
    fn test_empty_level_generator_does_not_run_away() {
        let (mut state, _) = playing(vec![far_brick()]);
        let mut empty = FixedLayout(Vec::new());
        state.bricks.clear();
        for _ in 0..5 {
            tick(&mut state, &TickInput::default(), FRAME_MS, &mut empty);
        }
        assert_eq!(state.level, 2);
        assert!(!state.bricks.is_empty());
        let cleared = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelCleared { .. }))
            .count();
        assert_eq!(cleared, 1);
    }

    #[test]
    fn test_last_ball_lost_costs_a_life() {
        let (mut state, mut levels) = playing(vec![far_brick()]);
        state.balls = vec![free_ball(&state, Vec2::new(100.0, 590.0), Vec2::new(0.0, 300.0))];
        tick(&mut state, &TickInput::default(), FRAME_MS, &mut levels);

        assert_eq!(state.lives, 2);
        assert_eq!(state.balls.len(), 1);
        assert!(state.balls[0].stuck);
        assert_eq!(state.balls[0].pos, state.bounds().center());
        assert_eq!(state.balls[0].vel, state.config.launch_velocity());
    }

    #[test]
    fn test_extra_ball_lost_is_removed() {
        let (mut state, mut levels) = playing(vec![far_brick()]);
        let lost = free_ball(&state, Vec2::new(100.0, 590.0), Vec2::new(0.0, 300.0));
        let kept = free_ball(&state, Vec2::new(300.0, 300.0), Vec2::new(0.0, 300.0));
        state.balls = vec![lost.clone(), kept, lost];
        tick(&mut state, &TickInput::default(), FRAME_MS, &mut levels);

        assert_eq!(state.lives, 3);
        assert_eq!(state.balls.len(), 1);
        assert!((state.balls[0].pos.x - 300.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_lives_means_game_over() {
        let (mut state, mut levels) = playing(vec![far_brick()]);
        state.lives = 0;
        tick(&mut state, &TickInput::default(), FRAME_MS, &mut levels);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver { score: 0 }));

        // Terminal: neither action nor pause leaves it
        let input = TickInput {
            action: true,
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS, &mut levels);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_enlarge_expires_back_to_default_width() {
        for start_width in [60.0, 100.0, 140.0] {
            let (mut state, mut levels) = playing(vec![far_brick()]);
            state.paddle.set_width(start_width);
            let x = state.paddle.pos.x + 10.0;
            state
                .power_ups
                .push(PowerUp::new(Vec2::new(x, 555.0), PowerUpKind::Enlarge));

            tick(&mut state, &TickInput::default(), 16.0, &mut levels);
            assert!(state.power_ups.is_empty());
            assert_eq!(state.paddle.width, (start_width * 1.5).min(150.0));

            tick(&mut state, &TickInput::default(), 9_000.0, &mut levels);
            assert!(state.paddle.width > 100.0 || start_width * 1.5 <= 100.0);

            tick(&mut state, &TickInput::default(), 1_000.0, &mut levels);
            assert_eq!(state.paddle.width, 100.0);
            assert!(state.events.contains(&GameEvent::EffectExpired(PowerUpKind::Enlarge)));
        }
    }

    #[test]
    fn test_guns_fire_and_bullets_break_bricks() {
        let (mut state, mut levels) = playing(vec![far_brick()]);
        activate(&mut state, PowerUpKind::Guns);
        let left = state.paddle.pos.x + BULLET_INSET;
        state.bricks = vec![
            Brick::new(Vec2::new(left - 2.0, 500.0), Some(PowerUpKind::Gravity), 0),
            Brick::new(far_brick(), None, 0),
        ];

        let fire = TickInput {
            action: true,
            ..Default::default()
        };
        tick(&mut state, &fire, FRAME_MS, &mut levels);
        assert_eq!(state.bullets.len(), 2);

        // ~70px of travel reaches the brick at y=500
        for _ in 0..12 {
            tick(&mut state, &TickInput::default(), FRAME_MS, &mut levels);
        }
        assert_eq!(state.score, BRICK_SCORE);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bricks.len(), 1);
        // Bullets do not release payloads
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_guns_expire() {
        let (mut state, mut levels) = playing(vec![far_brick()]);
        activate(&mut state, PowerUpKind::Guns);
        assert!(state.guns);
        tick(&mut state, &TickInput::default(), 10_000.0, &mut levels);
        assert!(!state.guns);
    }

    #[test]
    fn test_power_up_falls_off_bottom() {
        let (mut state, mut levels) = playing(vec![far_brick()]);
        state
            .power_ups
            .push(PowerUp::new(Vec2::new(10.0, 590.0), PowerUpKind::Shrink));
        tick(&mut state, &TickInput::default(), 100.0, &mut levels);
        assert!(state.power_ups.is_empty());
        assert_eq!(state.paddle.width, 100.0);
    }

    #[test]
    fn test_speedup_reverts_after_duration() {
        let (mut state, mut levels) = playing(vec![far_brick()]);
        activate(&mut state, PowerUpKind::SpeedUp);
        assert_eq!(state.balls[0].vel, Vec2::new(450.0, -450.0));
        tick(&mut state, &TickInput::default(), 10_000.0, &mut levels);
        assert!((state.balls[0].vel - Vec2::new(300.0, -300.0)).length() < 1e-3);
    }

    #[test]
    fn test_multiball_then_particles_fade() {
        let (mut state, mut levels) = playing(vec![far_brick()]);
        let x = state.paddle.pos.x + 10.0;
        state
            .power_ups
            .push(PowerUp::new(Vec2::new(x, 555.0), PowerUpKind::MultiBall));
        tick(&mut state, &TickInput::default(), 16.0, &mut levels);
        assert_eq!(state.balls.len(), 3);
        assert_eq!(state.particles.len(), PICKUP_PARTICLES);

        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), 16.0, &mut levels);
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_determinism() {
        let run = || {
            let mut levels = crate::sim::level::RandomPattern;
            let mut state = GameState::new(GameConfig::default(), 99999, &mut levels);
            let inputs = [
                TickInput {
                    action: true,
                    ..Default::default()
                },
                TickInput {
                    action: true,
                    direction: 1.0,
                    ..Default::default()
                },
                TickInput {
                    direction: -1.0,
                    ..Default::default()
                },
                TickInput::default(),
            ];
            for _ in 0..100 {
                for input in &inputs {
                    tick(&mut state, input, FRAME_MS, &mut levels);
                }
            }
            state
        };

        let a = run();
        let b = run();
        assert_eq!(a.score, b.score);
        assert_eq!(a.balls.len(), b.balls.len());
        assert_eq!(a.bricks.len(), b.bricks.len());
        assert_eq!(a.paddle.pos, b.paddle.pos);
        assert_eq!(a.balls[0].pos, b.balls[0].pos);
    }
}
