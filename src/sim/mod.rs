//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per tick (cadence is the host's concern)
//! - Seeded RNG only
//! - Single-threaded: commands run to completion between ticks
//! - No rendering or platform dependencies

pub mod economy;
pub mod spawn;
pub mod state;
pub mod tick;

pub use economy::{ActionOutcome, Denomination, UpgradeKind, Wallet};
pub use spawn::{Cannon, SpawnMode};
pub use state::{Ball, BallColor, BallType, GameState, UpgradeLevels};
pub use tick::{Command, apply, tick};
