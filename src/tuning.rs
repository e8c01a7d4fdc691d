//! Data-driven game balance
//!
//! Every gameplay constant lives here so a session can be re-tuned from a JSON
//! file without recompiling. Missing fields fall back to the defaults.

use std::f32::consts::FRAC_PI_2;
use std::path::{Path, PathBuf};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_SHIELD_SEGMENTS;
use crate::sim::geometry::Segment;
use crate::sim::scoring::{BonusCatalog, BonusDef};
use crate::sim::shield::Shield;
use crate::sim::shop::{ShopItem, ShopItemKind};

/// Errors raised when loading or validating tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level thresholds must be strictly ascending")]
    ThresholdsNotAscending,
    #[error("shield catalog is empty")]
    NoShields,
    #[error("shield {index} has {count} segments (allowed 1 to 4)")]
    ShieldSegments { index: usize, count: usize },
    #[error("shop item {item} refers to missing shield {shield}")]
    UnknownShield { item: usize, shield: usize },
    #[error("shop page size must be positive")]
    ZeroPageSize,
    #[error("{0}: minimum exceeds maximum")]
    InvertedSpan(&'static str),
    #[error("{0} must be positive")]
    NonPositive(&'static str),
}

/// Inclusive-exclusive range for random rolls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v < self.max
    }

    /// Uniform roll; a zero-width span always yields `min`
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        if self.max > self.min {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Scoring ===
    /// Exact scores that advance the enemy level (index = level)
    pub level_scores: Vec<u32>,
    pub bonuses: BonusCatalog,
    /// Max seconds between kills for a combo bonus
    pub combo_window: f32,
    /// Seconds a bonus stays on screen (and counts as fresh for the ladder)
    pub bonus_display_time: f32,
    /// Deflections nearer than this (scale units) are a close call
    pub close_call_radius: f32,

    // === Enemies ===
    /// Seconds a killed enemy takes to fade out
    pub fade_time: f32,
    /// Base speed per species, indexed by tag - 1
    pub species_speeds: [f32; 5],
    pub splitter_children: u32,
    pub splitter_child_speed: f32,
    /// Countdown before a splitter child starts homing
    pub splitter_scatter: Span,
    /// Seconds a charger spins after its first shield hit
    pub charge_duration: f32,
    /// Charger spin rate (radians/second)
    pub charge_spin_rate: f32,
    /// Orbit radius (scale units)
    pub orbit_radius: f32,
    /// Orbit angular rate (radians/second)
    pub orbit_rate: f32,
    pub orbit_duration: Span,
    /// Distance past the arena corners (scale units) before a breakout enemy is culled
    pub breakout_margin: f32,

    // === Spawning ===
    pub spawn_base_interval: f32,
    /// Score points per second of interval shaved off
    pub spawn_score_divisor: f32,
    pub spawn_min_interval: f32,

    // === Player ===
    pub starting_hearts: u32,
    /// Seconds the death screen must show before a key continues
    pub continue_delay: f32,

    // === Catalogs ===
    pub shields: Vec<Shield>,
    pub shop_items: Vec<ShopItem>,
    pub shop_page_size: usize,
}

fn line(ax: f32, ay: f32, bx: f32, by: f32) -> Segment {
    Segment::new(Vec2::new(ax, ay), Vec2::new(bx, by))
}

fn default_shields() -> Vec<Shield> {
    vec![
        Shield::new("Basic", "shield/basic.png", vec![line(2.2, -1.8, 2.2, 1.8)]),
        Shield::new("Wide", "shield/wide.png", vec![line(2.2, -2.8, 2.2, 2.8)]),
        Shield::new(
            "Bracket",
            "shield/bracket.png",
            vec![
                line(2.2, -1.8, 2.2, 1.8),
                line(2.2, -1.8, 1.2, -2.6),
                line(2.2, 1.8, 1.2, 2.6),
            ],
        ),
        Shield::new(
            "Twin",
            "shield/twin.png",
            vec![line(2.2, -1.8, 2.2, 1.8), line(-2.2, -1.8, -2.2, 1.8)],
        ),
    ]
}

fn default_shop() -> Vec<ShopItem> {
    vec![
        ShopItem::new("Basic shield", "shop/basic.png", 0, ShopItemKind::Shield(0)),
        ShopItem::new("Wide shield", "shop/wide.png", 40, ShopItemKind::Shield(1)),
        ShopItem::new("Bracket shield", "shop/bracket.png", 80, ShopItemKind::Shield(2)),
        ShopItem::new("Twin shield", "shop/twin.png", 150, ShopItemKind::Shield(3)),
        ShopItem::new("Heart", "shop/heart.png", 25, ShopItemKind::Heart(1)),
        ShopItem::new("Heart pack", "shop/hearts.png", 60, ShopItemKind::Heart(3)),
    ]
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            level_scores: vec![0, 5, 10, 40, 80],
            bonuses: BonusCatalog {
                close_call: BonusDef::new("Close call", 10),
                double_kill: BonusDef::new("Double kill", 5),
                triple_kill: BonusDef::new("Triple kill", 5),
                multi_kill: BonusDef::new("Multi kill", 10),
                milestone: BonusDef::new("Milestone", 20),
            },
            combo_window: 0.3,
            bonus_display_time: 2.0,
            close_call_radius: 3.0,

            fade_time: 0.5,
            species_speeds: [8.0, 16.0, 8.0, 6.0, 10.0],
            splitter_children: 3,
            splitter_child_speed: 12.0,
            splitter_scatter: Span::new(0.2, 0.6),
            charge_duration: 2.0,
            charge_spin_rate: FRAC_PI_2,
            orbit_radius: 6.0,
            orbit_rate: 2.0,
            orbit_duration: Span::new(4.0, 8.0),
            breakout_margin: 2.0,

            spawn_base_interval: 3.0,
            spawn_score_divisor: 70.0,
            spawn_min_interval: 0.5,

            starting_hearts: 1,
            continue_delay: 0.0,

            shields: default_shields(),
            shop_items: default_shop(),
            shop_page_size: 3,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Spawn interval for the current score
    pub fn spawn_interval(&self, score: u32) -> f32 {
        (self.spawn_base_interval - score as f32 / self.spawn_score_divisor)
            .max(self.spawn_min_interval)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.level_scores.windows(2).any(|w| w[0] >= w[1]) {
            return Err(TuningError::ThresholdsNotAscending);
        }
        if self.shields.is_empty() {
            return Err(TuningError::NoShields);
        }
        for (index, shield) in self.shields.iter().enumerate() {
            let count = shield.segments.len();
            if count == 0 || count > MAX_SHIELD_SEGMENTS {
                return Err(TuningError::ShieldSegments { index, count });
            }
        }
        for (item, entry) in self.shop_items.iter().enumerate() {
            if let ShopItemKind::Shield(shield) = entry.kind
                && shield >= self.shields.len()
            {
                return Err(TuningError::UnknownShield { item, shield });
            }
        }
        if self.shop_page_size == 0 {
            return Err(TuningError::ZeroPageSize);
        }

        for (name, span) in [
            ("splitter_scatter", self.splitter_scatter),
            ("orbit_duration", self.orbit_duration),
        ] {
            if span.min > span.max {
                return Err(TuningError::InvertedSpan(name));
            }
        }

        for (name, value) in [
            ("combo_window", self.combo_window),
            ("bonus_display_time", self.bonus_display_time),
            ("fade_time", self.fade_time),
            ("charge_duration", self.charge_duration),
            ("orbit_radius", self.orbit_radius),
            ("spawn_score_divisor", self.spawn_score_divisor),
            ("spawn_min_interval", self.spawn_min_interval),
        ] {
            if value <= 0.0 {
                return Err(TuningError::NonPositive(name));
            }
        }
        if self.species_speeds.iter().any(|&s| s <= 0.0) {
            return Err(TuningError::NonPositive("species_speeds"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        Tuning::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "starting_hearts": 3, "combo_window": 0.5 }"#).unwrap();
        assert_eq!(tuning.starting_hearts, 3);
        assert!((tuning.combo_window - 0.5).abs() < 1e-6);
        assert_eq!(tuning.level_scores, vec![0, 5, 10, 40, 80]);
        assert_eq!(tuning.shields.len(), 4);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_descending_thresholds() {
        let err = Tuning::from_json(r#"{ "level_scores": [0, 10, 5] }"#).unwrap_err();
        assert!(matches!(err, TuningError::ThresholdsNotAscending));
    }

    #[test]
    fn test_rejects_oversized_shield() {
        let mut tuning = Tuning::default();
        tuning.shields[1].segments = vec![line(0.0, 0.0, 1.0, 1.0); 5];
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::ShieldSegments { index: 1, count: 5 })
        ));
    }

    #[test]
    fn test_rejects_dangling_shop_item() {
        let mut tuning = Tuning::default();
        tuning.shop_items.push(ShopItem::new("Ghost", "x.png", 1, ShopItemKind::Shield(9)));
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::UnknownShield { shield: 9, .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_span() {
        let mut tuning = Tuning::default();
        tuning.orbit_duration = Span::new(8.0, 4.0);
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::InvertedSpan("orbit_duration"))
        ));
    }

    #[test]
    fn test_spawn_interval_shrinks_and_floors() {
        let tuning = Tuning::default();
        assert!((tuning.spawn_interval(0) - 3.0).abs() < 1e-6);
        assert!((tuning.spawn_interval(70) - 2.0).abs() < 1e-6);
        assert!((tuning.spawn_interval(175) - 0.5).abs() < 1e-6);
        assert!((tuning.spawn_interval(10_000) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
    }
}
