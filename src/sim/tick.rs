//! Fixed-step simulation tick
//!
//! One discrete step per invocation; the host's frame scheduler sets the
//! cadence. Each tick applies the queued commands, sweeps the cannons,
//! advances every ball (crediting bounce income immediately), and finally
//! retires expired balls. Income lands before the expiry sweep, so a ball
//! that bounces into expiry still earns its final bounce.

use super::economy::{self, ActionOutcome, Denomination};
use super::state::{BallColor, GameState};
use super::{SpawnMode, UpgradeKind};

/// A user intent forwarded by the presentation adapter. Declined commands are
/// silent no-ops; the adapter polls state to reflect availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Buy one ball of the given type
    Purchase { color: BallColor },
    /// Buy one upgrade level for the given type and attribute
    Upgrade { color: BallColor, kind: UpgradeKind },
    /// Flip the UI upgrade-section flag for the given type
    ToggleSection { color: BallColor },
}

/// Execute one command against the session. Runs to completion before any
/// simulation step; check-then-mutate sequences are never interleaved.
pub fn apply(state: &mut GameState, command: &Command) -> ActionOutcome {
    match *command {
        Command::Purchase { color } => economy::purchase(state, color),
        Command::Upgrade { color, kind } => economy::upgrade(state, color, kind),
        Command::ToggleSection { color } => {
            state.toggle_section(color);
            ActionOutcome::Applied
        }
    }
}

/// Advance the session by one step, applying `commands` first.
pub fn tick(state: &mut GameState, commands: &[Command]) {
    for command in commands {
        let outcome = apply(state, command);
        if outcome != ActionOutcome::Applied {
            log::debug!("{command:?} declined: {outcome:?}");
        }
    }

    state.time_ticks += 1;

    if state.spawn_mode == SpawnMode::Cannons {
        for cannon in &mut state.cannons {
            cannon.advance();
        }
    }

    // Motion and income
    let arena = state.arena;
    let GameState { balls, wallet, .. } = state;
    for ball in balls.iter_mut() {
        let bounces = ball.advance(arena);
        if bounces > 0 {
            wallet.credit(Denomination::Primary, ball.value * u64::from(bounces));
            wallet.credit(ball.color.denomination(), u64::from(bounces));
        }
    }

    // Expiry sweep; each removed ball gives its population slot back
    let GameState { balls, catalog, .. } = state;
    balls.retain(|ball| {
        if ball.is_expired() {
            if let Some(ty) = catalog.iter_mut().find(|ty| ty.color == ball.color) {
                debug_assert!(ty.current_balls > 0, "population drifted below live count");
                ty.current_balls -= 1;
            }
            false
        } else {
            true
        }
    });
}
