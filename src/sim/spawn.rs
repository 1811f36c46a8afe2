//! Spawn strategies: scatter placement and cannon-anchored launches
//!
//! A purchase needs an initial position and velocity for the new ball. The
//! two strategies are scatter (uniform random placement inside the arena,
//! random heading) and cannons (one oscillating launcher per catalog entry).
//! Both are pure factories; the population gate lives in the purchase
//! handler.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Ball, BallColor, GameState};
use crate::consts::*;
use crate::polar_to_cartesian;

/// How purchases place new balls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnMode {
    /// Random position inside the arena, random heading
    #[default]
    Scatter,
    /// Balls launch from a per-type cannon on the left wall
    Cannons,
}

/// An oscillating launch point fixed to the arena wall
#[derive(Debug, Clone)]
pub struct Cannon {
    pub anchor: Vec2,
    /// Catalog entry this cannon launches for
    pub color: BallColor,
    /// Current aim, radians from straight ahead (+x)
    pub angle: f32,
    /// +1 or -1; flips at the aim bounds
    direction: f32,
}

impl Cannon {
    pub fn new(anchor: Vec2, color: BallColor) -> Self {
        Self {
            anchor,
            color,
            angle: 0.0,
            direction: 1.0,
        }
    }

    /// Sweep the aim one step. Ping-pong oscillation: on reaching or passing
    /// either bound the direction flips, it never sticks at the bound.
    pub fn advance(&mut self) {
        self.angle += CANNON_ANGLE_STEP * self.direction;
        if self.angle.abs() >= CANNON_ANGLE_LIMIT {
            self.direction = -self.direction;
        }
    }

    /// Launch one ball along the current aim, from the muzzle
    pub fn fire(&self, value: u64, bounce_limit: u32, speed: f32) -> Ball {
        Ball {
            pos: self.anchor + polar_to_cartesian(CANNON_MUZZLE_LENGTH, self.angle),
            vel: polar_to_cartesian(speed, self.angle),
            radius: BALL_RADIUS,
            color: self.color,
            value,
            bounce_limit,
            bounce_count: 0,
        }
    }
}

/// Build one ball according to the session's spawn mode.
pub(crate) fn spawn_ball(
    state: &mut GameState,
    color: BallColor,
    value: u64,
    bounce_limit: u32,
    speed: f32,
) -> Ball {
    match state.spawn_mode {
        SpawnMode::Scatter => {
            let x = state
                .rng
                .random_range(BALL_RADIUS..state.arena.x - BALL_RADIUS);
            let y = state
                .rng
                .random_range(BALL_RADIUS..state.arena.y - BALL_RADIUS);
            let heading = state.rng.random_range(0.0..std::f32::consts::TAU);
            Ball {
                pos: Vec2::new(x, y),
                vel: polar_to_cartesian(speed, heading),
                radius: BALL_RADIUS,
                color,
                value,
                bounce_limit,
                bounce_count: 0,
            }
        }
        SpawnMode::Cannons => state
            .cannons
            .iter()
            .find(|c| c.color == color)
            .map(|c| c.fire(value, bounce_limit, speed))
            .expect("every catalog entry has a cannon"),
    }
}
