//! Per-enemy behavior: movement, collisions and species state machines
//!
//! Every live enemy runs through the same pipeline each tick:
//! fade-out → death override → movement → bounds → player hit → shield hit →
//! species step. The species step dispatches on `Species` and only looks at
//! the states that species can be in.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use rand::Rng;

use super::collision::segment_intersects_rect;
use super::enemy::{Enemy, EnemyState, Species};
use super::state::GameState;
use crate::{heading_towards, heading_vector, normalize_angle};

/// What happens to an enemy's slot after its update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Alive,
    Removed,
}

/// Run one update pass over every live enemy, in slot order.
///
/// Splitter children are queued during the pass and placed in free slots
/// afterwards, so they start moving on the next tick.
pub fn update_enemies(state: &mut GameState, dt: f32) {
    let mut spawned = Vec::new();

    for index in 0..state.enemies.capacity() {
        let Some(mut enemy) = state.enemies.slot_mut(index).take() else {
            continue;
        };
        if update_enemy(state, &mut enemy, dt, &mut spawned) == Fate::Alive {
            *state.enemies.slot_mut(index) = Some(enemy);
        }
    }

    for child in spawned {
        if state.enemies.insert(child).is_none() {
            log::warn!("Enemy table full, dropped splitter child");
        }
    }
}

/// Advance a single enemy by `dt`
pub fn update_enemy(
    state: &mut GameState,
    enemy: &mut Enemy,
    dt: f32,
    spawned: &mut Vec<Enemy>,
) -> Fate {
    if enemy.is_dying() {
        return fade_out(state, enemy, dt);
    }

    // Everything fades when the player is gone
    if state.died {
        return kill(state, enemy, spawned);
    }

    let scale = state.scale;
    if enemy.state == EnemyState::Orbiting {
        orbit_step(state, enemy, dt);
    } else {
        enemy.position += heading_vector(enemy.heading) * enemy.speed * dt * scale;
    }
    enemy.update_bounds(scale);

    if enemy.state != EnemyState::Charging && enemy.bounds.overlaps(&state.player_bounds()) {
        state.damage_player();
        return kill(state, enemy, spawned);
    }

    let hit = state
        .shield()
        .world_segments(state.player_aim, scale, state.center)
        .any(|seg| segment_intersects_rect(&seg, &enemy.bounds));
    if hit {
        match (enemy.species, enemy.state) {
            (Species::Charger, EnemyState::Seeking) => {
                enemy.heading += PI;
                enemy.enter(EnemyState::Charging);
            }
            (Species::Charger, EnemyState::Charging) => {
                if approaching_center(enemy, state) {
                    enemy.heading += PI;
                }
            }
            _ => {
                deflect(state, enemy);
                return kill(state, enemy, spawned);
            }
        }
    }

    match enemy.species {
        Species::Charger => charger_step(state, enemy, dt),
        Species::Splitter if enemy.small => scatter_step(state, enemy, dt),
        Species::Orbiter => orbiter_step(state, enemy, dt),
        _ => Fate::Alive,
    }
}

fn fade_out(state: &mut GameState, enemy: &mut Enemy, dt: f32) -> Fate {
    enemy.state_timer += dt;
    if enemy.state_timer <= state.tuning.fade_time {
        return Fate::Alive;
    }
    if !state.died {
        let next = state.scoreboard.score.saturating_add(1);
        state.scoreboard.set_score(next, &state.tuning);
    }
    Fate::Removed
}

/// Start the dying fade. Large splitters burst into children instead.
fn kill(state: &mut GameState, enemy: &mut Enemy, spawned: &mut Vec<Enemy>) -> Fate {
    if enemy.species == Species::Splitter && !enemy.small {
        for _ in 0..state.tuning.splitter_children {
            let heading = state.rng.random_range(0.0..TAU);
            let mut child = Enemy::new(
                Species::Splitter,
                enemy.position,
                heading,
                state.tuning.splitter_child_speed,
            );
            child.small = true;
            child.state = EnemyState::Scattering;
            child.state_timer = state.tuning.splitter_scatter.sample(&mut state.rng);
            child.update_bounds(state.scale);
            spawned.push(child);
        }
        log::debug!("Splitter burst at {:?}", enemy.position);
        return Fate::Removed;
    }
    enemy.enter(EnemyState::Dying);
    Fate::Alive
}

/// Shield deflection: pay out bonuses for this kill
fn deflect(state: &mut GameState, enemy: &Enemy) {
    let distance = enemy.position.distance(state.center);
    let bonuses = state
        .scoreboard
        .resolve_deflection(distance, state.scale, &state.tuning);
    log::debug!(
        "Deflected {:?} at distance {:.1} ({:?})",
        enemy.species,
        distance,
        bonuses
    );
}

fn approaching_center(enemy: &Enemy, state: &GameState) -> bool {
    heading_vector(enemy.heading).dot(state.center - enemy.position) > 0.0
}

fn charger_step(state: &GameState, enemy: &mut Enemy, dt: f32) -> Fate {
    match enemy.state {
        EnemyState::Charging => {
            enemy.state_timer += dt;
            enemy.heading = normalize_angle(enemy.heading + dt * state.tuning.charge_spin_rate);
            if enemy.state_timer >= state.tuning.charge_duration {
                enemy.enter(EnemyState::Returning);
                enemy.heading = heading_towards(enemy.position, state.center);
            }
        }
        EnemyState::Returning => {
            enemy.heading = heading_towards(enemy.position, state.center);
        }
        _ => {}
    }
    Fate::Alive
}

/// Splitter children drift on their own heading, then home in
fn scatter_step(state: &GameState, enemy: &mut Enemy, dt: f32) -> Fate {
    if enemy.state == EnemyState::Scattering {
        enemy.state_timer = (enemy.state_timer - dt).max(0.0);
        if enemy.state_timer <= 0.0 {
            enemy.heading = heading_towards(enemy.position, state.center);
        }
    }
    Fate::Alive
}

fn orbiter_step(state: &mut GameState, enemy: &mut Enemy, dt: f32) -> Fate {
    let radius = state.tuning.orbit_radius * state.scale;
    match enemy.state {
        EnemyState::Seeking => {
            if enemy.position.distance(state.center) < radius {
                enemy.heading += PI;
                enemy.speed = 0.0;
                enemy.state = EnemyState::Orbiting;
                enemy.state_timer = state.tuning.orbit_duration.sample(&mut state.rng);
            }
        }
        EnemyState::Orbiting => {
            enemy.state_timer -= dt;
            if enemy.state_timer <= 0.0 {
                enemy.enter(EnemyState::Breakout);
                enemy.speed = enemy.species.base_speed(&state.tuning);
                enemy.heading += PI;
            }
        }
        EnemyState::Breakout => {
            let limit = state.window_size.length() / 2.0 + state.tuning.breakout_margin * state.scale;
            if enemy.position.distance(state.center) > limit {
                log::debug!("Orbiter left the arena");
                return Fate::Removed;
            }
        }
        _ => {}
    }
    Fate::Alive
}

/// Move along the orbit circle; heading follows the direction of travel
fn orbit_step(state: &GameState, enemy: &mut Enemy, dt: f32) {
    let radius = state.tuning.orbit_radius * state.scale;
    let angle = heading_towards(state.center, enemy.position) + state.tuning.orbit_rate * dt;
    enemy.position = state.center + heading_vector(angle) * radius;
    enemy.heading = normalize_angle(angle + FRAC_PI_2);
}
