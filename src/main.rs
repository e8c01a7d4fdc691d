//! Block-Cycle headless runner
//!
//! Plays a seeded session on autopilot and prints the final frame as JSON.
//!
//! Usage: `block-cycle [tuning.json] [seed] [seconds]`

#[cfg(not(target_arch = "wasm32"))]
use std::error::Error;

#[cfg(not(target_arch = "wasm32"))]
const TICK_RATE: f64 = 60.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn Error>> {
    use block_cycle::Tuning;
    use block_cycle::sim::{GameState, TickInput, tick};

    env_logger::init();
    log::info!("Block-Cycle (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next().filter(|a| a != "-") {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let seed: u64 = match args.next() {
        Some(s) => s.parse()?,
        None => 42,
    };
    let seconds: f64 = match args.next() {
        Some(s) => s.parse()?,
        None => 120.0,
    };

    let mut state = GameState::new(seed, tuning);
    let frames = (seconds * TICK_RATE).round() as u64;
    let dt = (1.0 / TICK_RATE) as f32;

    let mut deaths = 0u32;
    let mut best_score = 0u32;
    for frame in 1..=frames {
        let was_dead = state.died;
        let input = TickInput {
            dt,
            clock: frame as f64 / TICK_RATE,
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut state, &input);

        best_score = best_score.max(state.scoreboard.score);
        if state.died && !was_dead {
            deaths += 1;
        }
    }

    log::info!(
        "Ran {} frames (seed {}): best score {}, {} deaths, {} coins, {} enemies live",
        frames,
        seed,
        best_score,
        deaths,
        state.scoreboard.coins,
        state.enemies.len()
    );

    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is driven by the host page; nothing to run here
}
