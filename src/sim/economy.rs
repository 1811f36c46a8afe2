//! Currency ledger and purchase/upgrade rules
//!
//! Every debit goes through [`Wallet::try_debit`], which performs the
//! sufficiency check and the subtraction in one place. Handlers are
//! straight-line functions, so a declined action leaves no partial state
//! behind. Declines are not errors: the handlers report an
//! [`ActionOutcome`] for logs and tests, and the command surface discards it.

use serde::{Deserialize, Serialize};

use super::spawn;
use super::state::{BallColor, GameState};

/// One of the four currency balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    /// Earned per bounce in proportion to ball value; pays for purchases
    Primary,
    Green,
    Blue,
    Red,
}

impl Denomination {
    pub const ALL: [Denomination; 4] = [
        Denomination::Primary,
        Denomination::Green,
        Denomination::Blue,
        Denomination::Red,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Denomination::Primary => "primary",
            Denomination::Green => "green",
            Denomination::Blue => "blue",
            Denomination::Red => "red",
        }
    }
}

/// Currency balances. Unsigned plus guarded debits means a balance can never
/// go negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wallet {
    primary: u64,
    green: u64,
    blue: u64,
    red: u64,
}

impl Wallet {
    pub fn balance(&self, denom: Denomination) -> u64 {
        match denom {
            Denomination::Primary => self.primary,
            Denomination::Green => self.green,
            Denomination::Blue => self.blue,
            Denomination::Red => self.red,
        }
    }

    pub fn credit(&mut self, denom: Denomination, amount: u64) {
        let slot = self.slot_mut(denom);
        *slot += amount;
    }

    /// Debit `amount` if the balance covers it. Check and subtraction are a
    /// single step; there is no way to observe the balance between them.
    pub fn try_debit(&mut self, denom: Denomination, amount: u64) -> bool {
        let slot = self.slot_mut(denom);
        match slot.checked_sub(amount) {
            Some(rest) => {
                *slot = rest;
                true
            }
            None => false,
        }
    }

    fn slot_mut(&mut self, denom: Denomination) -> &mut u64 {
        match denom {
            Denomination::Primary => &mut self.primary,
            Denomination::Green => &mut self.green,
            Denomination::Blue => &mut self.blue,
            Denomination::Red => &mut self.red,
        }
    }
}

/// Upgradeable ball attributes.
///
/// Each variant knows which denomination pays for it and how it mutates the
/// catalog entry. The denomination mapping is deliberately asymmetric
/// (speed is paid in blue, value in red, the bounce budget in green, and the
/// population cap in primary); it is a resource sink, not a naming scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    Speed,
    Value,
    BounceLimit,
    MaxBalls,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 4] = [
        UpgradeKind::Speed,
        UpgradeKind::Value,
        UpgradeKind::BounceLimit,
        UpgradeKind::MaxBalls,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeKind::Speed => "speed",
            UpgradeKind::Value => "value",
            UpgradeKind::BounceLimit => "bounce_limit",
            UpgradeKind::MaxBalls => "max_balls",
        }
    }

    /// Which balance pays for this upgrade
    pub fn denomination(&self) -> Denomination {
        match self {
            UpgradeKind::Speed => Denomination::Blue,
            UpgradeKind::Value => Denomination::Red,
            UpgradeKind::BounceLimit => Denomination::Green,
            UpgradeKind::MaxBalls => Denomination::Primary,
        }
    }

    /// Apply one level of this upgrade to a catalog entry. The bounce budget
    /// compounds; everything else is additive. Raising `max_balls` widens the
    /// population gate immediately, independent of the current population.
    fn apply(&self, ty: &mut super::state::BallType) {
        match self {
            UpgradeKind::Speed => ty.speed += 1.0,
            UpgradeKind::Value => ty.value += 1,
            UpgradeKind::BounceLimit => ty.bounce_limit *= 2,
            UpgradeKind::MaxBalls => ty.max_balls += 1,
        }
    }
}

/// Why an action was applied or declined. Declines are silent no-ops at the
/// command surface; this exists for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    InsufficientFunds,
    /// Population cap reached for the requested ball type
    AtCapacity,
    /// The attribute's price table is exhausted
    MaxLevel,
    /// No catalog entry for the requested color (contract violation by the
    /// adapter; never reachable from adapter-generated buttons)
    UnknownType,
}

/// Buy one ball of the given type and spawn it with the type's current stats.
pub fn purchase(state: &mut GameState, color: BallColor) -> ActionOutcome {
    let Some(ty) = state.find_ball_type(color) else {
        debug_assert!(false, "purchase for color with no catalog entry: {color:?}");
        return ActionOutcome::UnknownType;
    };
    if ty.at_capacity() {
        return ActionOutcome::AtCapacity;
    }
    let (cost, value, bounce_limit, speed) = (ty.purchase_cost, ty.value, ty.bounce_limit, ty.speed);

    if !state.wallet.try_debit(Denomination::Primary, cost) {
        return ActionOutcome::InsufficientFunds;
    }

    // Debit succeeded; population and spawn happen in the same straight-line
    // sequence, so the admission check can never be overtaken.
    let ball = spawn::spawn_ball(state, color, value, bounce_limit, speed);
    state.balls.push(ball);
    if let Some(ty) = state.find_ball_type_mut(color) {
        ty.current_balls += 1;
    }

    log::debug!(
        "Bought {} ball for {cost} (speed={speed}, value={value}, bounces={bounce_limit})",
        color.as_str()
    );
    ActionOutcome::Applied
}

/// Buy one upgrade level for `(color, kind)`.
pub fn upgrade(state: &mut GameState, color: BallColor, kind: UpgradeKind) -> ActionOutcome {
    let Some(ty) = state.find_ball_type(color) else {
        debug_assert!(false, "upgrade for color with no catalog entry: {color:?}");
        return ActionOutcome::UnknownType;
    };
    let level = ty.levels.level(kind);

    let Some(cost) = state.tuning.upgrade_cost(kind, level) else {
        return ActionOutcome::MaxLevel;
    };
    if !state.wallet.try_debit(kind.denomination(), cost) {
        return ActionOutcome::InsufficientFunds;
    }

    if let Some(ty) = state.find_ball_type_mut(color) {
        ty.levels.bump(kind);
        kind.apply(ty);
        log::debug!(
            "Upgraded {} {} to level {} for {cost} {}",
            color.as_str(),
            kind.as_str(),
            level + 1,
            kind.denomination().as_str()
        );
    }
    ActionOutcome::Applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SpawnMode;
    use crate::tuning::Tuning;

    #[test]
    fn test_wallet_debit_requires_funds() {
        let mut wallet = Wallet::default();
        wallet.credit(Denomination::Blue, 5);

        assert!(!wallet.try_debit(Denomination::Blue, 6));
        assert_eq!(wallet.balance(Denomination::Blue), 5);

        assert!(wallet.try_debit(Denomination::Blue, 5));
        assert_eq!(wallet.balance(Denomination::Blue), 0);
    }

    #[test]
    fn test_upgrade_denomination_mapping() {
        assert_eq!(UpgradeKind::Speed.denomination(), Denomination::Blue);
        assert_eq!(UpgradeKind::Value.denomination(), Denomination::Red);
        assert_eq!(UpgradeKind::BounceLimit.denomination(), Denomination::Green);
        assert_eq!(UpgradeKind::MaxBalls.denomination(), Denomination::Primary);
    }

    #[test]
    fn test_purchase_debits_and_spawns() {
        let mut state = GameState::new(42);
        state.wallet.credit(Denomination::Primary, 10);

        let outcome = purchase(&mut state, BallColor::Blue);
        assert_eq!(outcome, ActionOutcome::Applied);
        assert_eq!(state.balance(Denomination::Primary), 0);

        let ty = state.find_ball_type(BallColor::Blue).unwrap();
        assert_eq!(ty.current_balls, 1);
        assert_eq!(state.balls.len(), 1);

        let ball = &state.balls[0];
        assert_eq!(ball.color, BallColor::Blue);
        assert_eq!(ball.value, ty.value);
        assert_eq!(ball.bounce_limit, ty.bounce_limit);
        assert_eq!(ball.bounce_count, 0);
    }

    #[test]
    fn test_purchase_without_funds_is_noop() {
        let mut state = GameState::new(42);
        state.wallet.credit(Denomination::Primary, 9);
        let before_wallet = state.wallet;

        let outcome = purchase(&mut state, BallColor::Blue);
        assert_eq!(outcome, ActionOutcome::InsufficientFunds);
        assert_eq!(state.wallet, before_wallet);
        assert_eq!(state.balls.len(), 0);
        assert_eq!(state.find_ball_type(BallColor::Blue).unwrap().current_balls, 0);
    }

    #[test]
    fn test_purchase_at_capacity_keeps_funds() {
        let mut state = GameState::new(42);
        state.wallet.credit(Denomination::Primary, 100);

        // Green costs 0, cap 3
        for _ in 0..3 {
            assert_eq!(purchase(&mut state, BallColor::Green), ActionOutcome::Applied);
        }
        assert_eq!(purchase(&mut state, BallColor::Green), ActionOutcome::AtCapacity);
        assert_eq!(state.balance(Denomination::Primary), 100);
        assert_eq!(state.balls.len(), 3);
    }

    #[test]
    fn test_upgrade_bounce_limit_doubles() {
        let mut state = GameState::new(42);
        state.wallet.credit(Denomination::Green, 10);
        let before = state.find_ball_type(BallColor::Blue).unwrap().bounce_limit;

        let outcome = upgrade(&mut state, BallColor::Blue, UpgradeKind::BounceLimit);
        assert_eq!(outcome, ActionOutcome::Applied);
        assert_eq!(state.balance(Denomination::Green), 0);

        let ty = state.find_ball_type(BallColor::Blue).unwrap();
        assert_eq!(ty.bounce_limit, before * 2);
        assert_eq!(ty.levels.bounce_limit, 1);
    }

    #[test]
    fn test_upgrade_max_balls_widens_gate() {
        let mut state = GameState::new(42);
        state.wallet.credit(Denomination::Primary, 100);

        for _ in 0..3 {
            let _ = purchase(&mut state, BallColor::Green);
        }
        assert_eq!(purchase(&mut state, BallColor::Green), ActionOutcome::AtCapacity);

        let outcome = upgrade(&mut state, BallColor::Green, UpgradeKind::MaxBalls);
        assert_eq!(outcome, ActionOutcome::Applied);
        assert_eq!(purchase(&mut state, BallColor::Green), ActionOutcome::Applied);
        assert_eq!(state.find_ball_type(BallColor::Green).unwrap().current_balls, 4);
    }

    #[test]
    fn test_upgrade_caps_at_table_length() {
        let mut state = GameState::new(42);
        state.wallet.credit(Denomination::Blue, 1_000_000);

        for _ in 0..10 {
            assert_eq!(
                upgrade(&mut state, BallColor::Red, UpgradeKind::Speed),
                ActionOutcome::Applied
            );
        }
        let blue_before = state.balance(Denomination::Blue);

        // Eleventh attempt reports max and takes nothing
        assert_eq!(
            upgrade(&mut state, BallColor::Red, UpgradeKind::Speed),
            ActionOutcome::MaxLevel
        );
        assert_eq!(state.balance(Denomination::Blue), blue_before);

        let ty = state.find_ball_type(BallColor::Red).unwrap();
        assert_eq!(ty.levels.speed, 10);
        assert_eq!(ty.speed, 12.0);
        assert_eq!(state.upgrade_cost(BallColor::Red, UpgradeKind::Speed), None);
    }

    #[test]
    fn test_upgrade_does_not_touch_live_balls() {
        let mut state = GameState::with_config(42, Tuning::default(), SpawnMode::Scatter);
        state.wallet.credit(Denomination::Primary, 10);
        state.wallet.credit(Denomination::Red, 5);

        let _ = purchase(&mut state, BallColor::Blue);
        let live_value = state.balls[0].value;

        let _ = upgrade(&mut state, BallColor::Blue, UpgradeKind::Value);
        // Stats are frozen at spawn; only future balls see the upgrade
        assert_eq!(state.balls[0].value, live_value);
        assert_eq!(state.find_ball_type(BallColor::Blue).unwrap().value, live_value + 1);
    }
}
