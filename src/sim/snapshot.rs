//! Read-only view of the world for renderers and the headless runner

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::{EnemyState, Species};
use super::geometry::{Rect, Segment};
use super::shop::{Shop, ShopItemKind};
use super::state::GameState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub slot: usize,
    pub species: Species,
    pub position: Vec2,
    pub heading: f32,
    pub state: EnemyState,
    pub state_code: u8,
    pub state_timer: f32,
    pub bounds: Rect,
    pub color: [u8; 3],
    pub alpha: u8,
    pub flipped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub aim: f32,
    pub hearts: u32,
    pub died: bool,
    pub death_timer: f32,
    pub bounds: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShieldView {
    pub index: usize,
    pub name: String,
    pub texture: String,
    pub local_segments: Vec<Segment>,
    pub world_segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusView {
    pub name: String,
    pub reward: u32,
    /// Seconds since the bonus was awarded
    pub elapsed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItemView {
    pub name: String,
    pub texture: String,
    pub cost: u32,
    pub kind: ShopItemKind,
    pub affordable: bool,
    /// Shield items only: currently worn
    pub equipped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopView {
    pub open: bool,
    pub animation_elapsed: f32,
    pub page: usize,
    pub page_count: usize,
    /// Items on the current page
    pub items: Vec<ShopItemView>,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub enemies: Vec<EnemyView>,
    pub player: PlayerView,
    pub shield: ShieldView,
    pub score: u32,
    pub coins: u32,
    pub enemy_level: usize,
    pub bonus: Option<BonusView>,
    pub shop: ShopView,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let tuning = &state.tuning;

        let enemies = state
            .enemies
            .iter()
            .map(|(slot, e)| EnemyView {
                slot,
                species: e.species,
                position: e.position,
                heading: e.heading,
                state: e.state,
                state_code: e.state.code(),
                state_timer: e.state_timer,
                bounds: e.bounds,
                color: e.species.color(),
                alpha: e.alpha(tuning.fade_time),
                flipped: e.flipped(),
            })
            .collect();

        let shield = state.shield();
        let shield = ShieldView {
            index: state.active_shield,
            name: shield.name.clone(),
            texture: shield.texture.clone(),
            local_segments: shield.segments.clone(),
            world_segments: shield
                .world_segments(state.player_aim, state.scale, state.center)
                .collect(),
        };

        let bonus = state.scoreboard.visible_bonus(tuning).map(|b| BonusView {
            name: b.name.clone(),
            reward: b.reward,
            elapsed: b.display_timer,
        });

        let page_size = tuning.shop_page_size;
        let first = state.shop.page * page_size;
        let items = tuning
            .shop_items
            .iter()
            .skip(first)
            .take(page_size)
            .map(|item| ShopItemView {
                name: item.name.clone(),
                texture: item.texture.clone(),
                cost: item.cost,
                kind: item.kind,
                affordable: item.cost <= state.scoreboard.coins,
                equipped: item.kind == ShopItemKind::Shield(state.active_shield),
            })
            .collect();

        Self {
            tick: state.time_ticks,
            enemies,
            player: PlayerView {
                position: state.center,
                aim: state.player_aim,
                hearts: state.hearts,
                died: state.died,
                death_timer: state.death_timer,
                bounds: state.player_bounds(),
            },
            shield,
            score: state.scoreboard.score,
            coins: state.scoreboard.coins,
            enemy_level: state.scoreboard.enemy_level,
            bonus,
            shop: ShopView {
                open: state.shop.open,
                animation_elapsed: state.shop.timer,
                page: state.shop.page,
                page_count: Shop::page_count(tuning.shop_items.len(), page_size),
                items,
            },
        }
    }
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scoring::BonusId;
    use crate::tuning::Tuning;

    #[test]
    fn test_enemies_in_slot_order() {
        let mut state = GameState::new(1, Tuning::default());
        state.spawn_enemy(Species::Walker);
        state.spawn_enemy(Species::Orbiter);
        state.spawn_enemy(Species::Runner);
        state.enemies.remove(1);

        let snap = state.snapshot();
        let slots: Vec<_> = snap.enemies.iter().map(|e| e.slot).collect();
        assert_eq!(slots, vec![0, 2]);
        assert_eq!(snap.enemies[1].species, Species::Runner);
        assert_eq!(snap.enemies[1].alpha, 255);
        assert_eq!(snap.enemies[1].state_code, 0);
    }

    #[test]
    fn test_dying_enemy_fades() {
        let mut state = GameState::new(1, Tuning::default());
        let slot = state.spawn_enemy(Species::Walker).unwrap();
        let enemy = state.enemies.get_mut(slot).unwrap();
        enemy.enter(EnemyState::Dying);
        enemy.state_timer = 0.25;

        let snap = state.snapshot();
        let view = &snap.enemies[0];
        assert_eq!(view.state_code, 1);
        assert_eq!(view.alpha, 127);
    }

    #[test]
    fn test_bonus_hidden_after_display_time() {
        let mut state = GameState::new(1, Tuning::default());
        state.scoreboard.award_bonus(BonusId::DoubleKill, &state.tuning);
        let bonus = state.snapshot().bonus.unwrap();
        assert_eq!(bonus.name, "Double kill");
        assert_eq!(bonus.reward, 5);

        state.scoreboard.advance(2.5);
        assert!(state.snapshot().bonus.is_none());
    }

    #[test]
    fn test_shop_page_view() {
        let mut state = GameState::new(1, Tuning::default());
        state.scoreboard.coins = 50;
        let snap = state.snapshot();
        assert_eq!(snap.shop.page_count, 2);
        assert_eq!(snap.shop.items.len(), 3);
        assert!(snap.shop.items[0].equipped);
        assert!(snap.shop.items[1].affordable);
        assert!(!snap.shop.items[2].affordable);

        state.shop.page = 1;
        let names: Vec<_> = state.snapshot().shop.items.into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Twin shield", "Heart", "Heart pack"]);
    }

    #[test]
    fn test_shield_world_segments_follow_aim() {
        let mut state = GameState::new(1, Tuning::default());
        state.player_aim = std::f32::consts::PI;
        let snap = state.snapshot();
        assert_eq!(snap.shield.local_segments.len(), 1);
        // Aiming down puts the shield below the player
        let seg = snap.shield.world_segments[0];
        assert!(seg.a.y > state.center.y && seg.b.y > state.center.y);
        assert_eq!(snap.player.position, state.center);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = GameState::new(1, Tuning::default());
        state.spawn_enemy(Species::Charger);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"species\":\"Charger\""));
        assert!(json.contains("\"hearts\":1"));
    }
}
