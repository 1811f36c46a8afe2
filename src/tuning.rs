//! Data-driven game balance
//!
//! Catalog defaults and upgrade price tables. The built-in defaults match the
//! shipped balance; a host can override them with a JSON document at session
//! start. All validation happens up front so the simulation never has to
//! handle a malformed table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::{BallColor, UpgradeKind};

/// Hard cap on upgrade levels per attribute (price tables may be shorter,
/// never longer)
pub const MAX_UPGRADE_LEVELS: usize = 10;

/// Starting definition of one purchasable ball type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallTypeDef {
    /// Display name ("Green Ball")
    pub name: String,
    /// Identity/category key, also the collected-currency key
    pub color: BallColor,
    /// Purchase cost in the primary currency
    pub cost: u64,
    /// Currency awarded per wall bounce
    pub value: u64,
    /// Wall bounces before the ball expires
    pub bounce_limit: u32,
    /// Launch speed (world units per tick)
    pub speed: f32,
    /// Maximum simultaneous live balls of this type
    pub max_balls: u32,
}

/// Upgrade cost tables, indexed by current level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradePrices {
    pub speed: Vec<u64>,
    pub value: Vec<u64>,
    pub bounce_limit: Vec<u64>,
    pub max_balls: Vec<u64>,
}

impl UpgradePrices {
    /// Price table for one upgradeable attribute
    pub fn table(&self, kind: UpgradeKind) -> &[u64] {
        match kind {
            UpgradeKind::Speed => &self.speed,
            UpgradeKind::Value => &self.value,
            UpgradeKind::BounceLimit => &self.bounce_limit,
            UpgradeKind::MaxBalls => &self.max_balls,
        }
    }
}

/// Complete balance sheet for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    pub ball_types: Vec<BallTypeDef>,
    pub upgrade_prices: UpgradePrices,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_types: vec![
                BallTypeDef {
                    name: "Green Ball".into(),
                    color: BallColor::Green,
                    cost: 0,
                    value: 1,
                    bounce_limit: 1,
                    speed: 2.0,
                    max_balls: 3,
                },
                BallTypeDef {
                    name: "Blue Ball".into(),
                    color: BallColor::Blue,
                    cost: 10,
                    value: 1,
                    bounce_limit: 20,
                    speed: 2.0,
                    max_balls: 3,
                },
                BallTypeDef {
                    name: "Red Ball".into(),
                    color: BallColor::Red,
                    cost: 50,
                    value: 5,
                    bounce_limit: 20,
                    speed: 2.0,
                    max_balls: 3,
                },
            ],
            upgrade_prices: UpgradePrices {
                speed: vec![5, 10, 20, 30, 50, 75, 100, 130, 170, 220],
                value: vec![5, 10, 20, 40, 60, 90, 130, 180, 240, 310],
                bounce_limit: vec![10, 20, 30, 50, 80, 120, 170, 230, 300, 380],
                max_balls: vec![10, 20, 40, 70, 110, 160, 220, 290, 370, 460],
            },
        }
    }
}

impl Tuning {
    /// Parse and validate a balance sheet from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Upgrade cost at the given level, `None` once the table is exhausted
    /// (the attribute is at max level)
    pub fn upgrade_cost(&self, kind: UpgradeKind, level: u8) -> Option<u64> {
        self.upgrade_prices.table(kind).get(level as usize).copied()
    }

    /// Check the structural invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.ball_types.is_empty() {
            return Err(TuningError::NoBallTypes);
        }
        for (i, def) in self.ball_types.iter().enumerate() {
            if self.ball_types[..i].iter().any(|d| d.color == def.color) {
                return Err(TuningError::DuplicateColor(def.color));
            }
            if def.speed <= 0.0 {
                return Err(TuningError::NonPositiveSpeed {
                    name: def.name.clone(),
                });
            }
        }
        for kind in UpgradeKind::ALL {
            let len = self.upgrade_prices.table(kind).len();
            if len == 0 || len > MAX_UPGRADE_LEVELS {
                return Err(TuningError::BadPriceTable {
                    attribute: kind.as_str(),
                    len,
                });
            }
        }
        Ok(())
    }
}

/// Why a balance sheet was rejected
#[derive(Debug)]
pub enum TuningError {
    /// Malformed JSON
    Parse(serde_json::Error),
    /// The catalog has no entries
    NoBallTypes,
    /// Two catalog entries share a color
    DuplicateColor(BallColor),
    /// A price table is empty or longer than [`MAX_UPGRADE_LEVELS`]
    BadPriceTable { attribute: &'static str, len: usize },
    /// A ball type would never move
    NonPositiveSpeed { name: String },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "malformed tuning JSON: {e}"),
            TuningError::NoBallTypes => write!(f, "tuning defines no ball types"),
            TuningError::DuplicateColor(color) => {
                write!(f, "duplicate ball type color: {}", color.as_str())
            }
            TuningError::BadPriceTable { attribute, len } => write!(
                f,
                "price table for {attribute} has {len} entries (expected 1..={MAX_UPGRADE_LEVELS})"
            ),
            TuningError::NonPositiveSpeed { name } => {
                write!(f, "ball type {name:?} has non-positive speed")
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}
