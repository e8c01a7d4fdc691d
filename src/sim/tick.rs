//! Per-frame simulation tick
//!
//! One tick runs, in order: input → timers → spawn check → enemy update →
//! continue check.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::autopilot;
use super::behavior::update_enemies;
use super::shield::aim_from_pointer;
use super::state::GameState;

/// Discrete key presses delivered with a tick.
///
/// Any key (including `Other`) dismisses the death screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    ToggleShop,
    NextPage,
    PrevPage,
    /// Buy the item in this slot of the current shop page
    Buy(usize),
    Other,
}

/// Input sample for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Seconds since the previous tick
    pub dt: f32,
    /// Monotonic clock (seconds), keeps spawn phase stable across frame rates
    pub clock: f64,
    /// Pointer position in screen space
    pub pointer: Option<Vec2>,
    /// Viewport size; `None` keeps the current size
    pub window_size: Option<Vec2>,
    pub keys: Vec<KeyEvent>,
    /// Idle/demo mode - the autopilot aims and continues
    pub idle_mode: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    let dt = input.dt.max(0.0);

    // --- Input ---
    if let Some(size) = input.window_size {
        state.resize(size);
    }

    let pointer = if input.idle_mode {
        autopilot::threat_pointer(state).or(input.pointer)
    } else {
        input.pointer
    };
    if !state.died
        && let Some(pointer) = pointer
    {
        state.player_aim = aim_from_pointer(pointer, state.center);
    }

    let mut continue_requested = false;
    if state.died {
        let any_key = !input.keys.is_empty() || (input.idle_mode && autopilot::wants_continue(state));
        continue_requested = any_key && state.death_timer >= state.tuning.continue_delay;
    } else {
        for key in &input.keys {
            handle_key(state, *key);
        }
    }

    // --- Timers ---
    state.scoreboard.advance(dt);
    state.shop.advance(dt);
    if state.died {
        state.death_timer += dt;
    }

    // --- Spawning ---
    if !state.shop.open && !state.died {
        let interval = f64::from(state.tuning.spawn_interval(state.scoreboard.score));
        if crossed_spawn_boundary(state.last_clock, input.clock, interval) {
            let species = state.pick_species();
            state.spawn_enemy(species);
        }
    }
    state.last_clock = input.clock;

    // --- Enemies ---
    if !state.shop.open {
        update_enemies(state, dt);
    }

    // --- Continue after death ---
    if continue_requested {
        state.continue_run();
    }

    state.time_ticks += 1;
}

fn handle_key(state: &mut GameState, key: KeyEvent) {
    let item_count = state.tuning.shop_items.len();
    let page_size = state.tuning.shop_page_size;
    match key {
        KeyEvent::ToggleShop => state.shop.toggle(),
        KeyEvent::NextPage if state.shop.open => state.shop.next_page(item_count, page_size),
        KeyEvent::PrevPage if state.shop.open => state.shop.prev_page(),
        KeyEvent::Buy(slot) if state.shop.open => {
            if let Err(err) = state.purchase(slot) {
                log::debug!("Purchase refused: {}", err);
            }
        }
        _ => {}
    }
}

/// Whether the clock crossed a multiple of `interval` since `prev`
pub fn crossed_spawn_boundary(prev: f64, now: f64, interval: f64) -> bool {
    interval > 0.0 && (now / interval).floor() > (prev / interval).floor()
}
