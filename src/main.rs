//! Headless demo driver
//!
//! Runs a scripted session against the core and prints the resulting economy.
//! Doubles as executable documentation of the adapter contract: queue
//! commands, call `tick` once per frame, read state back through accessors.

use bounce_tycoon::Tuning;
use bounce_tycoon::sim::{BallColor, Command, Denomination, GameState, SpawnMode, UpgradeKind, tick};

const TICKS: u64 = 20_000;

fn main() {
    env_logger::init();
    log::info!("Bounce Tycoon (headless) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xB0B);
    let mut state = GameState::with_config(seed, Tuning::default(), SpawnMode::Cannons);

    for n in 0..TICKS {
        let mut commands = Vec::new();

        // A greedy player: try to buy every type each second...
        if n % 60 == 0 {
            for color in BallColor::ALL {
                commands.push(Command::Purchase { color });
            }
        }
        // ...and sink collected currency into upgrades now and then
        if n % 600 == 0 {
            commands.push(Command::Upgrade {
                color: BallColor::Green,
                kind: UpgradeKind::BounceLimit,
            });
            commands.push(Command::Upgrade {
                color: BallColor::Blue,
                kind: UpgradeKind::Value,
            });
            commands.push(Command::Upgrade {
                color: BallColor::Red,
                kind: UpgradeKind::Speed,
            });
        }

        tick(&mut state, &commands);
    }

    println!("Session summary after {TICKS} ticks (seed {seed})");
    for denom in Denomination::ALL {
        println!("  {:>8}: {}", denom.as_str(), state.balance(denom));
    }
    for ty in &state.catalog {
        println!(
            "  {:<12} pop {}/{}  value {}  bounces {}  speed {}  levels s{}/v{}/b{}/m{}",
            ty.name,
            ty.current_balls,
            ty.max_balls,
            ty.value,
            ty.bounce_limit,
            ty.speed,
            ty.levels.speed,
            ty.levels.value,
            ty.levels.bounce_limit,
            ty.levels.max_balls,
        );
    }
    println!("  live balls: {}", state.balls.len());
}
