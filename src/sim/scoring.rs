//! Score, coins, difficulty level and the bonus/combo ladder

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Bonus identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusId {
    CloseCall,
    DoubleKill,
    TripleKill,
    MultiKill,
    Milestone,
}

/// Catalog entry: display name and coin reward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusDef {
    pub name: String,
    pub reward: u32,
}

impl BonusDef {
    pub fn new(name: &str, reward: u32) -> Self {
        Self {
            name: name.to_string(),
            reward,
        }
    }
}

/// One entry per `BonusId`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusCatalog {
    pub close_call: BonusDef,
    pub double_kill: BonusDef,
    pub triple_kill: BonusDef,
    pub multi_kill: BonusDef,
    pub milestone: BonusDef,
}

impl BonusCatalog {
    pub fn get(&self, id: BonusId) -> &BonusDef {
        match id {
            BonusId::CloseCall => &self.close_call,
            BonusId::DoubleKill => &self.double_kill,
            BonusId::TripleKill => &self.triple_kill,
            BonusId::MultiKill => &self.multi_kill,
            BonusId::Milestone => &self.milestone,
        }
    }
}

/// Most recently awarded bonus, kept for the HUD fade-out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestBonus {
    pub id: BonusId,
    pub name: String,
    pub reward: u32,
    /// Seconds since it was awarded
    pub display_timer: f32,
}

/// Bonuses produced by a single deflection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeflectionBonuses {
    pub close_call: bool,
    pub combo: Option<BonusId>,
}

/// Score and economy state
#[derive(Debug, Clone)]
pub struct Scoreboard {
    pub score: u32,
    pub coins: u32,
    /// Difficulty tier (0-based)
    pub enemy_level: usize,
    /// Seconds since the last deflection
    pub kill_timer: f32,
    pub latest: Option<LatestBonus>,
}

impl Scoreboard {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            coins: 0,
            enemy_level: 0,
            // Start outside the combo window so the first kill never chains
            kill_timer: tuning.combo_window,
            latest: None,
        }
    }

    /// Advance the free-running timers
    pub fn advance(&mut self, dt: f32) {
        self.kill_timer += dt;
        if let Some(bonus) = &mut self.latest {
            bonus.display_timer += dt;
        }
    }

    /// Record a bonus as the latest and pay out its reward
    pub fn award_bonus(&mut self, id: BonusId, tuning: &Tuning) {
        let def = tuning.bonuses.get(id);
        self.coins = self.coins.saturating_add(def.reward);
        log::debug!("Bonus {} (+{})", def.name, def.reward);
        self.latest = Some(LatestBonus {
            id,
            name: def.name.clone(),
            reward: def.reward,
            display_timer: 0.0,
        });
    }

    /// Whether the latest bonus has finished displaying (or none exists)
    pub fn bonus_expired(&self, tuning: &Tuning) -> bool {
        self.latest
            .as_ref()
            .is_none_or(|b| b.display_timer > tuning.bonus_display_time)
    }

    /// Latest bonus while it is still on screen
    pub fn visible_bonus(&self, tuning: &Tuning) -> Option<&LatestBonus> {
        self.latest
            .as_ref()
            .filter(|b| b.display_timer < tuning.bonus_display_time)
    }

    /// Evaluate close-call and combo bonuses for one deflection.
    ///
    /// `distance` and `scale` are in screen units.
    pub fn resolve_deflection(
        &mut self,
        distance: f32,
        scale: f32,
        tuning: &Tuning,
    ) -> DeflectionBonuses {
        let mut awarded = DeflectionBonuses::default();

        if distance < tuning.close_call_radius * scale {
            self.award_bonus(BonusId::CloseCall, tuning);
            awarded.close_call = true;
        }

        if self.kill_timer < tuning.combo_window {
            let previous = self.latest.as_ref().map(|b| b.id);
            let next = if self.bonus_expired(tuning) {
                BonusId::DoubleKill
            } else {
                match previous {
                    Some(BonusId::DoubleKill) => BonusId::TripleKill,
                    Some(BonusId::TripleKill | BonusId::MultiKill) => BonusId::MultiKill,
                    _ => BonusId::DoubleKill,
                }
            };
            self.award_bonus(next, tuning);
            awarded.combo = Some(next);
        }

        self.kill_timer = 0.0;
        awarded
    }

    /// Set the score and apply exact-threshold level-ups
    pub fn set_score(&mut self, value: u32, tuning: &Tuning) {
        self.score = value;
        if value == 0 {
            self.enemy_level = 0;
            return;
        }
        // Exact match only: jumping past a threshold skips that level-up
        if let Some(level) = tuning.level_scores.iter().position(|&t| t == value) {
            self.enemy_level = level;
            log::info!("Score {} reached, enemy level {}", value, level);
            self.award_bonus(BonusId::Milestone, tuning);
        }
    }

    /// Deduct coins if affordable
    pub fn spend(&mut self, cost: u32) -> bool {
        match self.coins.checked_sub(cost) {
            Some(left) => {
                self.coins = left;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> (Scoreboard, Tuning) {
        let tuning = Tuning::default();
        (Scoreboard::new(&tuning), tuning)
    }

    const SCALE: f32 = 10.0;
    const FAR: f32 = 200.0;

    #[test]
    fn test_award_bonus_pays_coins() {
        let (mut board, tuning) = board();
        board.award_bonus(BonusId::Milestone, &tuning);
        assert_eq!(board.coins, 20);
        let latest = board.latest.as_ref().unwrap();
        assert_eq!(latest.name, "Milestone");
        assert_eq!(latest.display_timer, 0.0);
    }

    #[test]
    fn test_close_call_regardless_of_combo() {
        let (mut board, tuning) = board();
        let got = board.resolve_deflection(2.9 * SCALE, SCALE, &tuning);
        assert!(got.close_call);
        assert_eq!(got.combo, None);
        assert_eq!(board.coins, 10);

        // Rapid follow-up: close call plus a combo in the same event
        board.advance(0.1);
        let got = board.resolve_deflection(1.0, SCALE, &tuning);
        assert!(got.close_call);
        assert_eq!(got.combo, Some(BonusId::DoubleKill));
    }

    #[test]
    fn test_first_kill_does_not_chain() {
        let (mut board, tuning) = board();
        let got = board.resolve_deflection(FAR, SCALE, &tuning);
        assert_eq!(got, DeflectionBonuses::default());
        assert_eq!(board.kill_timer, 0.0);
        assert_eq!(board.coins, 0);
    }

    #[test]
    fn test_combo_ladder_saturates() {
        let (mut board, tuning) = board();
        board.resolve_deflection(FAR, SCALE, &tuning);

        let mut ladder = Vec::new();
        for _ in 0..4 {
            board.advance(0.1);
            ladder.push(board.resolve_deflection(FAR, SCALE, &tuning).combo);
        }
        assert_eq!(
            ladder,
            vec![
                Some(BonusId::DoubleKill),
                Some(BonusId::TripleKill),
                Some(BonusId::MultiKill),
                Some(BonusId::MultiKill),
            ]
        );
        assert_eq!(board.coins, 5 + 5 + 10 + 10);
    }

    #[test]
    fn test_slow_kills_reset_ladder() {
        let (mut board, tuning) = board();
        board.resolve_deflection(FAR, SCALE, &tuning);
        board.advance(0.1);
        assert_eq!(
            board.resolve_deflection(FAR, SCALE, &tuning).combo,
            Some(BonusId::DoubleKill)
        );
        board.advance(0.5);
        assert_eq!(board.resolve_deflection(FAR, SCALE, &tuning).combo, None);
        board.advance(0.1);
        // Double kill is still fresh on screen, so the ladder continues
        assert_eq!(
            board.resolve_deflection(FAR, SCALE, &tuning).combo,
            Some(BonusId::TripleKill)
        );
    }

    #[test]
    fn test_expired_bonus_restarts_at_double() {
        let (mut board, tuning) = board();
        board.award_bonus(BonusId::TripleKill, &tuning);
        board.advance(2.5);
        board.kill_timer = 0.1;
        assert_eq!(
            board.resolve_deflection(FAR, SCALE, &tuning).combo,
            Some(BonusId::DoubleKill)
        );
    }

    #[test]
    fn test_set_score_exact_threshold() {
        let (mut board, tuning) = board();
        board.set_score(5, &tuning);
        assert_eq!(board.enemy_level, 1);
        assert_eq!(board.latest.as_ref().unwrap().id, BonusId::Milestone);
        assert_eq!(board.coins, 20);
    }

    #[test]
    fn test_set_score_overshoot_skips_level() {
        let (mut board, tuning) = board();
        board.set_score(6, &tuning);
        assert_eq!(board.enemy_level, 0);
        assert!(board.latest.is_none());
        assert_eq!(board.coins, 0);
    }

    #[test]
    fn test_set_score_zero_resets_level() {
        let (mut board, tuning) = board();
        board.set_score(10, &tuning);
        assert_eq!(board.enemy_level, 2);
        board.set_score(0, &tuning);
        assert_eq!(board.enemy_level, 0);
    }

    #[test]
    fn test_visible_bonus_window() {
        let (mut board, tuning) = board();
        assert!(board.visible_bonus(&tuning).is_none());
        board.award_bonus(BonusId::CloseCall, &tuning);
        board.advance(1.9);
        assert!(board.visible_bonus(&tuning).is_some());
        board.advance(0.2);
        assert!(board.visible_bonus(&tuning).is_none());
    }

    #[test]
    fn test_spend() {
        let (mut board, _) = board();
        board.coins = 30;
        assert!(!board.spend(31));
        assert_eq!(board.coins, 30);
        assert!(board.spend(30));
        assert_eq!(board.coins, 0);
    }
}
