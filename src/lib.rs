//! Bounce Tycoon - incremental bouncing-balls game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball motion, bounce income, economy, commands)
//! - `tuning`: Data-driven game balance
//!
//! Rendering and input binding are the host's job: a presentation adapter
//! submits [`sim::Command`] values and reads state back through the snapshot
//! accessors on [`sim::GameState`].

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (world units; the adapter maps these to pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 300.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;

    /// Cannon aim oscillates within ±45° of straight ahead
    pub const CANNON_ANGLE_LIMIT: f32 = std::f32::consts::FRAC_PI_4;
    /// Aim change per tick (radians)
    pub const CANNON_ANGLE_STEP: f32 = 0.02;
    /// Distance from the cannon anchor to the muzzle, along the aim direction
    pub const CANNON_MUZZLE_LENGTH: f32 = 20.0;
    /// Inset of cannon anchors from the left wall
    pub const CANNON_WALL_INSET: f32 = 12.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
