//! Level layouts
//!
//! A level is just a set of brick positions (top-left corners). The engine
//! asks a [`LevelGenerator`] for a new set whenever the field is cleared.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::Bounds;
use crate::consts::{BRICK_HEIGHT, BRICK_WIDTH, PADDLE_BOTTOM_GAP, PADDLE_HEIGHT};

/// Horizontal distance between brick origins
const PITCH_X: f32 = BRICK_WIDTH + 2.0;
/// Vertical distance between brick origins
const PITCH_Y: f32 = BRICK_HEIGHT + 2.0;

/// Source of brick layouts
pub trait LevelGenerator {
    fn generate(&mut self, bounds: Bounds, rng: &mut Pcg32) -> Vec<Vec2>;
}

/// Built-in brick layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    /// 20 rows x 32 columns
    Standard,
    /// Rows widening downward from a single brick
    Pyramid,
    /// Two mirrored triangles
    Diamond,
    /// Concentric rings
    Circle,
}

impl Pattern {
    pub const ALL: [Pattern; 4] = [
        Pattern::Standard,
        Pattern::Pyramid,
        Pattern::Diamond,
        Pattern::Circle,
    ];

    /// Brick positions for this pattern, clipped to the reachable part of the arena
    pub fn layout(&self, bounds: Bounds) -> Vec<Vec2> {
        let mut bricks = match self {
            Pattern::Standard => standard(),
            Pattern::Pyramid => pyramid(bounds),
            Pattern::Diamond => diamond(bounds),
            Pattern::Circle => circle(bounds),
        };
        bricks.retain(|&pos| reachable(pos, bounds));
        bricks
    }
}

/// Brick lies fully inside the arena and above the paddle
fn reachable(pos: Vec2, bounds: Bounds) -> bool {
    let floor = bounds.height - PADDLE_HEIGHT - PADDLE_BOTTOM_GAP;
    pos.x >= 0.0
        && pos.y >= 0.0
        && pos.x + BRICK_WIDTH <= bounds.width
        && pos.y + BRICK_HEIGHT <= floor
}

impl LevelGenerator for Pattern {
    fn generate(&mut self, bounds: Bounds, _rng: &mut Pcg32) -> Vec<Vec2> {
        self.layout(bounds)
    }
}

/// Picks one of the built-in patterns at random for every level
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPattern;

impl LevelGenerator for RandomPattern {
    fn generate(&mut self, bounds: Bounds, rng: &mut Pcg32) -> Vec<Vec2> {
        let pattern = Pattern::ALL[rng.random_range(0..Pattern::ALL.len())];
        log::debug!("Generating {:?} pattern", pattern);
        pattern.layout(bounds)
    }
}

/// The same explicit positions every level
#[derive(Debug, Clone, Default)]
pub struct FixedLayout(pub Vec<Vec2>);

impl LevelGenerator for FixedLayout {
    fn generate(&mut self, _bounds: Bounds, _rng: &mut Pcg32) -> Vec<Vec2> {
        self.0.clone()
    }
}

fn standard() -> Vec<Vec2> {
    let mut bricks = Vec::with_capacity(20 * 32);
    for row in 0..20 {
        for col in 0..32 {
            bricks.push(Vec2::new(
                col as f32 * PITCH_X + 35.0,
                row as f32 * PITCH_Y + 30.0,
            ));
        }
    }
    bricks
}

/// Centred row of `count` bricks at height `y`
fn centered_row(bricks: &mut Vec<Vec2>, center_x: f32, y: f32, count: u32) {
    let start_x = center_x - (count as f32 * PITCH_X) / 2.0;
    for i in 0..count {
        bricks.push(Vec2::new(start_x + i as f32 * PITCH_X, y));
    }
}

fn pyramid(bounds: Bounds) -> Vec<Vec2> {
    let center_x = bounds.width / 2.0;
    let base_y = bounds.height / 3.0;
    let mut bricks = Vec::new();
    for row in 0..24u32 {
        centered_row(&mut bricks, center_x, base_y - row as f32 * PITCH_Y, row + 1);
    }
    bricks
}

fn diamond(bounds: Bounds) -> Vec<Vec2> {
    const HALF: u32 = 16;
    let center_x = bounds.width / 2.0;
    let center_y = bounds.height / 3.0;
    let mut bricks = Vec::new();

    // Upper half, widening upward from a single brick on the centre line
    for row in 0..HALF {
        centered_row(&mut bricks, center_x, center_y - row as f32 * PITCH_Y, row * 2 + 1);
    }
    // Lower half, narrowing downward
    for row in (0..HALF - 1).rev() {
        let y = center_y + (HALF - row) as f32 * PITCH_Y;
        centered_row(&mut bricks, center_x, y, row * 2 + 1);
    }
    bricks
}

fn circle(bounds: Bounds) -> Vec<Vec2> {
    const OUTER_RADIUS: f32 = 150.0;
    const OUTER_COUNT: f32 = 64.0;
    let center = Vec2::new(bounds.width / 2.0, bounds.height / 3.0);
    let half_brick = Vec2::new(BRICK_WIDTH / 2.0, BRICK_HEIGHT / 2.0);
    let mut bricks = Vec::new();

    let mut r = OUTER_RADIUS;
    while r > 10.0 {
        let count = (OUTER_COUNT * (r / OUTER_RADIUS)).floor() as u32;
        for i in 0..count {
            let angle = i as f32 / count as f32 * TAU;
            bricks.push(center + Vec2::new(angle.cos(), angle.sin()) * r - half_brick);
        }
        r -= 10.0;
    }
    bricks
}
