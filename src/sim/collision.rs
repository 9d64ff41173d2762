//! Collision detection and response
//!
//! One function per colliding pair of entity kinds. Each returns whether a
//! hit happened and applies that pair's response in place. Entities already
//! flagged for deletion never collide.

use super::geom::{Axis, Bounds};
use super::state::{Ball, Brick, Bullet, Paddle, PowerUp};
use crate::consts::PADDLE_DEFLECTION;

/// Horizontal speed after a paddle hit at `hit_fraction` (0 = left end, 1 = right end)
#[inline]
pub fn paddle_deflection(hit_fraction: f32) -> f32 {
    PADDLE_DEFLECTION * (hit_fraction - 0.5)
}

/// Ball against paddle.
///
/// Triggers when the ball's bottom passes the paddle top while its centre is
/// strictly within the paddle's horizontal span. The ball is set on top of the
/// paddle, sent upward, and its horizontal speed follows the impact point.
pub fn ball_paddle(ball: &mut Ball, paddle: &Paddle) -> bool {
    if ball.stuck {
        return false;
    }
    let hit = ball.pos.y + ball.radius > paddle.pos.y
        && ball.pos.x > paddle.pos.x
        && ball.pos.x < paddle.pos.x + paddle.width;
    if !hit {
        return false;
    }

    ball.pos.y = paddle.pos.y - ball.radius;
    ball.vel.y = -ball.vel.y.abs();
    let hit_fraction = (ball.pos.x - paddle.pos.x) / paddle.width;
    ball.vel.x = paddle_deflection(hit_fraction);
    true
}

/// Ball fell out of the bottom of the arena
pub fn ball_lost(ball: &Ball, bounds: Bounds) -> bool {
    ball.pos.y + ball.radius > bounds.height
}

/// Ball against brick.
///
/// A regular ball bounces on the axis of shallowest penetration; a fireball
/// keeps its velocity. Either way the brick is flagged as destroyed.
pub fn ball_brick(ball: &mut Ball, brick: &mut Brick) -> bool {
    if brick.deleted {
        return false;
    }
    let ball_box = ball.aabb();
    let brick_box = brick.aabb();
    if !ball_box.overlaps(&brick_box) {
        return false;
    }

    if !ball.fireball {
        match ball_box.penetration(&brick_box).min_axis() {
            Axis::Vertical => ball.vel.y = -ball.vel.y,
            Axis::Horizontal => ball.vel.x = -ball.vel.x,
        }
    }
    brick.deleted = true;
    true
}

/// Bullet against brick; both are destroyed on contact
pub fn bullet_brick(bullet: &mut Bullet, brick: &mut Brick) -> bool {
    if bullet.deleted || brick.deleted {
        return false;
    }
    if !bullet.aabb().overlaps(&brick.aabb()) {
        return false;
    }
    bullet.deleted = true;
    brick.deleted = true;
    true
}

/// Power-up against paddle.
///
/// Caught once its bottom passes the paddle top with horizontal spans
/// intersecting. The capsule is flagged; activating the effect is up to the
/// caller.
pub fn power_up_paddle(power_up: &mut PowerUp, paddle: &Paddle) -> bool {
    if power_up.deleted {
        return false;
    }
    let pu = power_up.aabb();
    let pad = paddle.aabb();
    let hit = pu.bottom() > pad.top() && pu.left() < pad.right() && pu.right() > pad.left();
    if hit {
        power_up.deleted = true;
    }
    hit
}
