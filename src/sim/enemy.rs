//! Enemy species, lifecycle states and the fixed-capacity slot table

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::MAX_ENEMIES;
use crate::tuning::Tuning;

/// Enemy archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    /// Plain seeker
    Walker,
    /// Fast seeker
    Runner,
    /// Survives the first shield hit, spins, then comes back
    Charger,
    /// Bursts into three small copies when killed
    Splitter,
    /// Circles the player before breaking away
    Orbiter,
}

impl Species {
    pub const ALL: [Species; 5] = [
        Species::Walker,
        Species::Runner,
        Species::Charger,
        Species::Splitter,
        Species::Orbiter,
    ];

    /// Numeric tag (1-based)
    pub fn tag(self) -> u8 {
        match self {
            Species::Walker => 1,
            Species::Runner => 2,
            Species::Charger => 3,
            Species::Splitter => 4,
            Species::Orbiter => 5,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::ALL.get(usize::from(tag).checked_sub(1)?).copied()
    }

    /// Tint used by the renderer
    pub fn color(self) -> [u8; 3] {
        match self {
            Species::Walker => [0, 0, 255],
            Species::Runner => [0, 255, 0],
            Species::Charger => [0, 255, 255],
            Species::Splitter => [160, 32, 240],
            Species::Orbiter => [255, 140, 0],
        }
    }

    pub fn base_speed(self, tuning: &Tuning) -> f32 {
        tuning.species_speeds[usize::from(self.tag() - 1)]
    }
}

/// Lifecycle state. Which states a species visits is species-scoped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyState {
    /// Walking toward the center
    #[default]
    Seeking,
    /// Fading out after a kill or a hit on the player
    Dying,
    /// Charger knocked back by the shield, spinning
    Charging,
    /// Splitter child drifting before it starts homing
    Scattering,
    /// Charger heading back to the center after its spin
    Returning,
    /// Orbiter circling the center
    Orbiting,
    /// Orbiter leaving its orbit
    Breakout,
}

impl EnemyState {
    /// Small integer code for renderers
    pub fn code(self) -> u8 {
        match self {
            EnemyState::Seeking => 0,
            EnemyState::Dying => 1,
            EnemyState::Charging => 2,
            EnemyState::Scattering => 3,
            EnemyState::Returning => 4,
            EnemyState::Orbiting => 5,
            EnemyState::Breakout => 6,
        }
    }
}

/// A live enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub species: Species,
    pub position: Vec2,
    /// Direction of travel; movement is `(sin, cos) * speed`
    pub heading: f32,
    /// Logical units per second (multiplied by scale)
    pub speed: f32,
    pub bounds: Rect,
    /// Elapsed time or countdown depending on `state`
    pub state_timer: f32,
    pub state: EnemyState,
    /// Splitter child
    pub small: bool,
}

impl Enemy {
    pub fn new(species: Species, position: Vec2, heading: f32, speed: f32) -> Self {
        Self {
            species,
            position,
            heading,
            speed,
            bounds: Rect::default(),
            state_timer: 0.0,
            state: EnemyState::Seeking,
            small: false,
        }
    }

    /// Half-width of the collision box in scale units
    pub fn half_extent(&self) -> f32 {
        if self.small || self.species == Species::Orbiter {
            0.5
        } else {
            1.0
        }
    }

    pub fn update_bounds(&mut self, scale: f32) {
        self.bounds = Rect::centered(self.position, self.half_extent() * scale);
    }

    /// Switch state and reset the state timer
    pub fn enter(&mut self, state: EnemyState) {
        self.state = state;
        self.state_timer = 0.0;
    }

    pub fn is_dying(&self) -> bool {
        self.state == EnemyState::Dying
    }

    /// Render alpha; fades out over the dying period
    pub fn alpha(&self, fade_time: f32) -> u8 {
        if self.is_dying() {
            let t = (1.0 - self.state_timer / fade_time).clamp(0.0, 1.0);
            (t * 255.0) as u8
        } else {
            255
        }
    }

    /// Sprite faces left when travelling toward -x
    pub fn flipped(&self) -> bool {
        self.heading.sin() < 0.0
    }
}

/// Fixed-capacity enemy table; `None` marks a free slot.
///
/// Allocation always takes the lowest free slot so iteration order is stable.
#[derive(Debug, Clone)]
pub struct EnemyTable {
    slots: Vec<Option<Enemy>>,
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl EnemyTable {
    pub fn new() -> Self {
        Self {
            slots: vec![None; MAX_ENEMIES],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live enemies
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Place an enemy in the first free slot; `None` when the table is full
    pub fn insert(&mut self, enemy: Enemy) -> Option<usize> {
        let index = self.first_free()?;
        self.slots[index] = Some(enemy);
        Some(index)
    }

    pub fn remove(&mut self, index: usize) -> Option<Enemy> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    pub fn get(&self, index: usize) -> Option<&Enemy> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Enemy> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Raw slot access for the update pass
    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut Option<Enemy> {
        &mut self.slots[index]
    }

    /// Live enemies with their slot index, in slot order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Enemy)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|e| (i, e)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.slots.iter_mut().flatten()
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walker() -> Enemy {
        Enemy::new(Species::Walker, Vec2::ZERO, 0.0, 8.0)
    }

    #[test]
    fn test_species_tags_round_trip() {
        for species in Species::ALL {
            assert_eq!(Species::from_tag(species.tag()), Some(species));
        }
        assert_eq!(Species::from_tag(0), None);
        assert_eq!(Species::from_tag(6), None);
    }

    #[test]
    fn test_insert_takes_first_free_slot() {
        let mut table = EnemyTable::new();
        assert_eq!(table.insert(walker()), Some(0));
        assert_eq!(table.insert(walker()), Some(1));
        assert_eq!(table.insert(walker()), Some(2));

        table.remove(1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.insert(walker()), Some(1));
        assert_eq!(table.insert(walker()), Some(3));
    }

    #[test]
    fn test_full_table_drops_insert() {
        let mut table = EnemyTable::new();
        for i in 0..MAX_ENEMIES {
            let mut e = walker();
            e.position.x = i as f32;
            assert_eq!(table.insert(e), Some(i));
        }
        assert_eq!(table.insert(walker()), None);
        assert_eq!(table.len(), MAX_ENEMIES);
        for (i, e) in table.iter() {
            assert_eq!(e.position.x, i as f32);
        }
    }

    #[test]
    fn test_bounds_half_extent() {
        let mut e = walker();
        e.position = Vec2::new(10.0, 10.0);
        e.update_bounds(4.0);
        assert_eq!(e.bounds, Rect::new(6.0, 6.0, 8.0, 8.0));

        e.small = true;
        e.update_bounds(4.0);
        assert_eq!(e.bounds, Rect::new(8.0, 8.0, 4.0, 4.0));
    }

    #[test]
    fn test_alpha_fades_while_dying() {
        let mut e = walker();
        assert_eq!(e.alpha(0.5), 255);
        e.enter(EnemyState::Dying);
        e.state_timer = 0.25;
        assert_eq!(e.alpha(0.5), 127);
        e.state_timer = 0.6;
        assert_eq!(e.alpha(0.5), 0);
    }
}
