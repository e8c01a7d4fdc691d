//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep and clock only
//! - Seeded RNG only
//! - Stable iteration order (by enemy slot)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod behavior;
pub mod collision;
pub mod enemy;
pub mod geometry;
pub mod scoring;
pub mod shield;
pub mod shop;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use behavior::{Fate, update_enemies, update_enemy};
pub use collision::{segment_intersects_rect, segments_intersect};
pub use enemy::{Enemy, EnemyState, EnemyTable, Species};
pub use geometry::{Rect, Segment, rotate_point, rotate_segment};
pub use scoring::{BonusCatalog, BonusDef, BonusId, DeflectionBonuses, LatestBonus, Scoreboard};
pub use shield::{Shield, aim_from_pointer};
pub use shop::{PurchaseReceipt, Shop, ShopError, ShopItem, ShopItemKind};
pub use snapshot::Snapshot;
pub use state::GameState;
pub use tick::{KeyEvent, TickInput, tick};
