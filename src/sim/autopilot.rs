//! Idle/demo mode AI
//!
//! Points the shield at the most dangerous enemy and dismisses the death
//! screen as soon as it accepts input.

use glam::Vec2;

use super::enemy::{Enemy, EnemyState};
use super::state::GameState;

/// Whether an enemy is still coming for the player
fn is_threat(enemy: &Enemy) -> bool {
    matches!(
        enemy.state,
        EnemyState::Seeking | EnemyState::Scattering | EnemyState::Returning
    )
}

/// Pointer position aimed at the threat closest to the center
pub fn threat_pointer(state: &GameState) -> Option<Vec2> {
    state
        .enemies
        .iter()
        .map(|(_, e)| e)
        .filter(|e| is_threat(e))
        .min_by(|a, b| {
            a.position
                .distance_squared(state.center)
                .partial_cmp(&b.position.distance_squared(state.center))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.position)
}

pub fn wants_continue(state: &GameState) -> bool {
    state.died && state.death_timer >= state.tuning.continue_delay
}
