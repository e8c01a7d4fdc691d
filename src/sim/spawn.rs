//! Enemy spawning on the screen edges

use glam::Vec2;
use rand::Rng;

use super::enemy::{Enemy, Species};
use super::state::GameState;
use crate::heading_towards;

/// Random point on one of the four viewport edges.
///
/// Picks a wall axis, then the near or far edge, then a uniform position
/// along it.
pub fn edge_position(rng: &mut impl Rng, window: Vec2) -> Vec2 {
    let mut pos = Vec2::new(
        rng.random_range(0.0..=window.x),
        rng.random_range(0.0..=window.y),
    );
    if rng.random_bool(0.5) {
        pos.x = if rng.random_bool(0.5) { window.x } else { 0.0 };
    } else {
        pos.y = if rng.random_bool(0.5) { window.y } else { 0.0 };
    }
    pos
}

impl GameState {
    /// Species for the next spawn, uniform over those unlocked by the enemy level
    pub fn pick_species(&mut self) -> Species {
        let unlocked = (self.scoreboard.enemy_level + 1).min(Species::ALL.len());
        Species::ALL[self.rng.random_range(0..unlocked)]
    }

    /// Spawn an enemy on a random edge, heading for the center.
    ///
    /// Returns the slot used, or `None` if the table is full.
    pub fn spawn_enemy(&mut self, species: Species) -> Option<usize> {
        let position = edge_position(&mut self.rng, self.window_size);
        self.spawn_enemy_at(species, position)
    }

    /// Spawn an enemy at a fixed position, heading for the center
    pub fn spawn_enemy_at(&mut self, species: Species, position: Vec2) -> Option<usize> {
        let heading = heading_towards(position, self.center);
        let mut enemy = Enemy::new(species, position, heading, species.base_speed(&self.tuning));
        enemy.update_bounds(self.scale);

        let slot = self.enemies.insert(enemy);
        match slot {
            Some(index) => log::debug!("Spawned {:?} in slot {} at {:?}", species, index, position),
            None => log::warn!("Enemy table full, dropped {:?} spawn", species),
        }
        slot
    }
}
