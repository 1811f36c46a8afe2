//! Game state and core simulation types
//!
//! The session owns everything: wallet, catalog, live balls, cannons, and the
//! seeded RNG. There are no globals; the presentation adapter holds one
//! [`GameState`] and reads it back through the snapshot accessors.

use std::collections::BTreeSet;

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::economy::{Denomination, UpgradeKind, Wallet};
use super::spawn::{Cannon, SpawnMode};
use crate::consts::*;
use crate::tuning::{BallTypeDef, Tuning};

/// Ball type identity. Doubles as the key for that type's collected currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BallColor {
    Green,
    Blue,
    Red,
}

impl BallColor {
    pub const ALL: [BallColor; 3] = [BallColor::Green, BallColor::Blue, BallColor::Red];

    pub fn as_str(&self) -> &'static str {
        match self {
            BallColor::Green => "green",
            BallColor::Blue => "blue",
            BallColor::Red => "red",
        }
    }

    /// The collected denomination credited once per bounce of this color
    pub fn denomination(&self) -> Denomination {
        match self {
            BallColor::Green => Denomination::Green,
            BallColor::Blue => Denomination::Blue,
            BallColor::Red => Denomination::Red,
        }
    }
}

/// Purchased upgrade levels per attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpgradeLevels {
    pub speed: u8,
    pub value: u8,
    pub bounce_limit: u8,
    pub max_balls: u8,
}

impl UpgradeLevels {
    pub fn level(&self, kind: UpgradeKind) -> u8 {
        match kind {
            UpgradeKind::Speed => self.speed,
            UpgradeKind::Value => self.value,
            UpgradeKind::BounceLimit => self.bounce_limit,
            UpgradeKind::MaxBalls => self.max_balls,
        }
    }

    pub(crate) fn bump(&mut self, kind: UpgradeKind) {
        match kind {
            UpgradeKind::Speed => self.speed += 1,
            UpgradeKind::Value => self.value += 1,
            UpgradeKind::BounceLimit => self.bounce_limit += 1,
            UpgradeKind::MaxBalls => self.max_balls += 1,
        }
    }
}

/// One catalog entry: a purchasable ball type with its current (upgraded)
/// stats and live population
#[derive(Debug, Clone)]
pub struct BallType {
    pub name: String,
    pub color: BallColor,
    /// Purchase cost in the primary currency
    pub purchase_cost: u64,
    /// Currency awarded per bounce of balls spawned from now on
    pub value: u64,
    /// Bounce budget of balls spawned from now on
    pub bounce_limit: u32,
    /// Launch speed of balls spawned from now on
    pub speed: f32,
    /// Population cap; raising it never evicts live balls
    pub max_balls: u32,
    /// Live balls of this type. Invariant: `current_balls <= max_balls`.
    pub current_balls: u32,
    pub levels: UpgradeLevels,
}

impl BallType {
    fn from_def(def: &BallTypeDef) -> Self {
        Self {
            name: def.name.clone(),
            color: def.color,
            purchase_cost: def.cost,
            value: def.value,
            bounce_limit: def.bounce_limit,
            speed: def.speed,
            max_balls: def.max_balls,
            current_balls: 0,
            levels: UpgradeLevels::default(),
        }
    }

    /// Population gate: no more of this type may spawn
    pub fn at_capacity(&self) -> bool {
        self.current_balls >= self.max_balls
    }
}

/// A live ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Links back to the owning catalog entry
    pub color: BallColor,
    /// Primary currency per bounce, frozen at spawn time
    pub value: u64,
    /// Bounces before expiry, frozen at spawn time
    pub bounce_limit: u32,
    pub bounce_count: u32,
}

impl Ball {
    /// Advance one discrete step and reflect off the arena walls.
    ///
    /// Each axis is checked independently, so a corner hit counts as two
    /// bounces in the same step. Returns the number of bounces (0, 1, or 2);
    /// the caller credits income per bounce.
    pub fn advance(&mut self, arena: Vec2) -> u32 {
        self.pos += self.vel;

        let mut bounces = 0;
        if self.pos.x + self.radius > arena.x || self.pos.x - self.radius < 0.0 {
            self.vel.x = -self.vel.x;
            bounces += 1;
        }
        if self.pos.y + self.radius > arena.y || self.pos.y - self.radius < 0.0 {
            self.vel.y = -self.vel.y;
            bounces += 1;
        }

        self.bounce_count += bounces;
        bounces
    }

    /// The ball has spent its bounce budget and leaves the arena on the next
    /// sweep
    pub fn is_expired(&self) -> bool {
        self.bounce_count >= self.bounce_limit
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Arena dimensions (balls bounce inside `[0, arena.x] x [0, arena.y]`)
    pub arena: Vec2,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Currency balances
    pub wallet: Wallet,
    /// Purchasable ball types
    pub catalog: Vec<BallType>,
    /// Live balls
    pub balls: Vec<Ball>,
    /// How purchases place new balls
    pub spawn_mode: SpawnMode,
    /// One cannon per catalog entry (empty in [`SpawnMode::Scatter`])
    pub cannons: Vec<Cannon>,
    /// Balance sheet this session was started with
    pub tuning: Tuning,
    /// UI-only: which catalog entries have their upgrade section expanded
    open_sections: BTreeSet<BallColor>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a session with the default balance sheet and scatter spawning
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), SpawnMode::Scatter)
    }

    /// Create a session with an explicit balance sheet and spawn mode
    pub fn with_config(seed: u64, tuning: Tuning, spawn_mode: SpawnMode) -> Self {
        use rand::SeedableRng;

        let arena = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);
        let catalog: Vec<BallType> = tuning.ball_types.iter().map(BallType::from_def).collect();

        // Cannons line the left wall, evenly spaced, one per catalog entry
        let cannons = match spawn_mode {
            SpawnMode::Scatter => Vec::new(),
            SpawnMode::Cannons => {
                let count = catalog.len();
                catalog
                    .iter()
                    .enumerate()
                    .map(|(i, ty)| {
                        let y = arena.y * (i + 1) as f32 / (count + 1) as f32;
                        Cannon::new(Vec2::new(CANNON_WALL_INSET, y), ty.color)
                    })
                    .collect()
            }
        };

        log::info!(
            "Session start: seed={seed}, spawn_mode={spawn_mode:?}, {} ball types",
            catalog.len()
        );

        Self {
            seed,
            arena,
            time_ticks: 0,
            wallet: Wallet::default(),
            catalog,
            balls: Vec::new(),
            spawn_mode,
            cannons,
            tuning,
            open_sections: BTreeSet::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Catalog entry for a color. Colors are a closed enum but a tuning sheet
    /// may omit one; callers that accept adapter input should handle `None`.
    pub fn find_ball_type(&self, color: BallColor) -> Option<&BallType> {
        self.catalog.iter().find(|ty| ty.color == color)
    }

    pub(crate) fn find_ball_type_mut(&mut self, color: BallColor) -> Option<&mut BallType> {
        self.catalog.iter_mut().find(|ty| ty.color == color)
    }

    /// Current balance of one denomination
    pub fn balance(&self, denom: Denomination) -> u64 {
        self.wallet.balance(denom)
    }

    /// Cost of the next upgrade step for `(color, kind)`, `None` when the
    /// attribute is at max level or the color has no catalog entry
    pub fn upgrade_cost(&self, color: BallColor, kind: UpgradeKind) -> Option<u64> {
        let ty = self.find_ball_type(color)?;
        self.tuning.upgrade_cost(kind, ty.levels.level(kind))
    }

    /// Live balls of one color (the catalog's `current_balls` must agree with
    /// this after every tick)
    pub fn live_count(&self, color: BallColor) -> usize {
        self.balls.iter().filter(|b| b.color == color).count()
    }

    /// Flip the upgrade-section flag for one catalog entry. UI state only;
    /// has no simulation meaning.
    pub fn toggle_section(&mut self, color: BallColor) {
        if !self.open_sections.remove(&color) {
            let _ = self.open_sections.insert(color);
        }
    }

    /// Whether the upgrade section for `color` is expanded
    pub fn section_open(&self, color: BallColor) -> bool {
        self.open_sections.contains(&color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ball(vel: Vec2, pos: Vec2, bounce_limit: u32) -> Ball {
        Ball {
            pos,
            vel,
            radius: BALL_RADIUS,
            color: BallColor::Green,
            value: 1,
            bounce_limit,
            bounce_count: 0,
        }
    }

    #[test]
    fn test_advance_no_wall() {
        let arena = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);
        let mut ball = test_ball(Vec2::new(2.0, 1.0), Vec2::new(100.0, 100.0), 10);

        let bounces = ball.advance(arena);
        assert_eq!(bounces, 0);
        assert_eq!(ball.pos, Vec2::new(102.0, 101.0));
        assert_eq!(ball.bounce_count, 0);
    }

    #[test]
    fn test_advance_right_wall_reflects() {
        let arena = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);
        let mut ball = test_ball(Vec2::new(3.0, 0.0), Vec2::new(ARENA_WIDTH - 12.0, 100.0), 10);

        let bounces = ball.advance(arena);
        assert_eq!(bounces, 1);
        assert_eq!(ball.vel, Vec2::new(-3.0, 0.0));
        assert_eq!(ball.bounce_count, 1);
    }

    #[test]
    fn test_advance_corner_counts_two_bounces() {
        let arena = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);
        let mut ball = test_ball(
            Vec2::new(3.0, 3.0),
            Vec2::new(ARENA_WIDTH - 12.0, ARENA_HEIGHT - 12.0),
            10,
        );

        let bounces = ball.advance(arena);
        assert_eq!(bounces, 2);
        assert_eq!(ball.vel, Vec2::new(-3.0, -3.0));
        assert_eq!(ball.bounce_count, 2);
    }

    #[test]
    fn test_is_expired_at_limit() {
        let mut ball = test_ball(Vec2::ZERO, Vec2::new(50.0, 50.0), 2);
        assert!(!ball.is_expired());
        ball.bounce_count = 1;
        assert!(!ball.is_expired());
        ball.bounce_count = 2;
        assert!(ball.is_expired());
    }

    #[test]
    fn test_toggle_section_flips() {
        let mut state = GameState::new(1);
        assert!(!state.section_open(BallColor::Blue));
        state.toggle_section(BallColor::Blue);
        assert!(state.section_open(BallColor::Blue));
        state.toggle_section(BallColor::Blue);
        assert!(!state.section_open(BallColor::Blue));
    }

    #[test]
    fn test_cannons_one_per_type_inside_arena() {
        let state = GameState::with_config(7, Tuning::default(), SpawnMode::Cannons);
        assert_eq!(state.cannons.len(), state.catalog.len());
        for cannon in &state.cannons {
            assert!(cannon.anchor.y > 0.0 && cannon.anchor.y < state.arena.y);
        }
    }
}
