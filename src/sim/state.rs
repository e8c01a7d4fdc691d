//! Session state
//!
//! Everything the tick mutates lives in `GameState`; there are no globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::enemy::EnemyTable;
use super::geometry::Rect;
use super::scoring::Scoreboard;
use super::shield::Shield;
use super::shop::Shop;
use crate::consts::DEFAULT_WINDOW;
use crate::scale_for_window;
use crate::tuning::Tuning;

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    /// Live enemies (slot order is spawn order)
    pub enemies: EnemyTable,
    pub scoreboard: Scoreboard,
    pub shop: Shop,
    /// Index into `tuning.shields`
    pub active_shield: usize,
    /// Player lives
    pub hearts: u32,
    pub died: bool,
    /// Seconds since death
    pub death_timer: f32,
    /// Aim angle (radians), see `shield::aim_from_pointer`
    pub player_aim: f32,
    pub window_size: Vec2,
    pub center: Vec2,
    /// Viewport diagonal / 50
    pub scale: f32,
    /// Previous monotonic clock sample (spawn phase)
    pub last_clock: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let window_size = Vec2::new(DEFAULT_WINDOW.0, DEFAULT_WINDOW.1);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            hearts: tuning.starting_hearts,
            scoreboard: Scoreboard::new(&tuning),
            tuning,
            enemies: EnemyTable::new(),
            shop: Shop::default(),
            active_shield: 0,
            died: false,
            death_timer: 0.0,
            player_aim: 0.0,
            window_size,
            center: window_size / 2.0,
            scale: scale_for_window(window_size),
            last_clock: 0.0,
            time_ticks: 0,
        }
    }

    /// The equipped shield
    pub fn shield(&self) -> &Shield {
        &self.tuning.shields[self.active_shield]
    }

    /// Player hit box: center ± scale
    pub fn player_bounds(&self) -> Rect {
        Rect::centered(self.center, self.scale)
    }

    /// Apply a new viewport size.
    ///
    /// Enemy offsets from the center are stored in scale units across the
    /// change so nothing visibly jumps. Degenerate sizes (a minimized window)
    /// are ignored and the previous geometry is kept.
    pub fn resize(&mut self, size: Vec2) {
        if size == self.window_size {
            return;
        }
        if size.x <= 0.0 || size.y <= 0.0 {
            log::debug!("Ignoring degenerate window size {}x{}", size.x, size.y);
            return;
        }
        let old_center = self.center;
        let old_scale = self.scale;

        self.window_size = size;
        self.center = size / 2.0;
        self.scale = scale_for_window(size);

        if old_scale > 0.0 {
            for enemy in self.enemies.iter_mut() {
                let logical = (enemy.position - old_center) / old_scale;
                enemy.position = self.center + logical * self.scale;
                enemy.update_bounds(self.scale);
            }
        }
        log::debug!("Resized to {}x{} (scale {:.2})", size.x, size.y, self.scale);
    }

    /// Dismiss the death screen and start over.
    ///
    /// Coins and the equipped shield carry over; score, hearts and enemies reset.
    pub fn continue_run(&mut self) {
        self.died = false;
        self.death_timer = 0.0;
        self.hearts = self.tuning.starting_hearts;
        self.scoreboard.set_score(0, &self.tuning);
        self.scoreboard.kill_timer = self.tuning.combo_window;
        self.enemies.clear();
        log::info!("Continuing with {} coins", self.scoreboard.coins);
    }

    /// Record a hit on the player
    pub(crate) fn damage_player(&mut self) {
        self.hearts = self.hearts.saturating_sub(1);
        if self.hearts == 0 && !self.died {
            self.died = true;
            self.death_timer = 0.0;
            log::info!("Player died with score {}", self.scoreboard.score);
        }
    }
}
