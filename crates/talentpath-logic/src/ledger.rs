//! Caller-owned progression totals and reward application.
//!
//! The achievement engine only reports what newly qualifies; this module is
//! the caller side of that contract. It owns the persisted totals — XP,
//! currency, the unlocked-id set — and applies rewards: achievement XP, a
//! currency credit per unlock, and the level-up currency bonus.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::achievements::AchievementDef;
use crate::experience::ExperienceConfig;

/// Currency credited per level-up, times the level reached.
const LEVEL_UP_CURRENCY_BONUS: u64 = 10;

/// Persisted progression totals for one employee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressLedger {
    /// Lifetime XP. Monotonically non-decreasing.
    pub total_xp: u64,
    /// Internal currency balance.
    pub currency: u64,
    /// Ids of unlocked achievements.
    pub unlocked: HashSet<String>,
}

/// What a ledger update changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockOutcome {
    pub xp_awarded: u64,
    pub currency_awarded: u64,
    pub old_level: u32,
    pub new_level: u32,
}

impl UnlockOutcome {
    /// Whether the update crossed at least one level threshold.
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.old_level
    }
}

/// Aggregate stats for the dashboard panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamificationStats {
    pub total_xp: u64,
    pub level: u32,
    pub currency: u64,
    pub unlocked_count: usize,
    /// Incremental XP cost of the next level.
    pub next_level_xp: u64,
    /// 0–100.
    pub progress_to_next_level: f64,
}

/// Currency credit for one achievement: a tenth of its XP reward, at least 1.
fn currency_for(def: &AchievementDef) -> u64 {
    (def.xp_reward / 10).max(1)
}

impl ProgressLedger {
    /// Apply newly unlocked achievements to the totals.
    ///
    /// Ids already present in the ledger are skipped, so replaying an
    /// evaluation result is harmless. Returns what changed, including the
    /// level transition so the caller can show level-up feedback.
    pub fn apply_unlocks(
        &mut self,
        new: &[&AchievementDef],
        config: &ExperienceConfig,
    ) -> UnlockOutcome {
        let old_level = config.level_for_total_xp(self.total_xp);
        let mut xp_awarded: u64 = 0;
        let mut currency_awarded: u64 = 0;
        for def in new {
            if !self.unlocked.insert(def.id.to_string()) {
                continue;
            }
            xp_awarded = xp_awarded.saturating_add(def.xp_reward);
            currency_awarded = currency_awarded.saturating_add(currency_for(def));
        }
        self.total_xp = self.total_xp.saturating_add(xp_awarded);
        let new_level = config.level_for_total_xp(self.total_xp);
        if new_level > old_level {
            currency_awarded = currency_awarded
                .saturating_add((new_level as u64).saturating_mul(LEVEL_UP_CURRENCY_BONUS));
        }
        self.currency = self.currency.saturating_add(currency_awarded);
        UnlockOutcome {
            xp_awarded,
            currency_awarded,
            old_level,
            new_level,
        }
    }

    /// Credit a flat XP grant (profile saves, assistant queries, ...).
    pub fn add_xp(&mut self, xp: u64, config: &ExperienceConfig) -> UnlockOutcome {
        let old_level = config.level_for_total_xp(self.total_xp);
        self.total_xp = self.total_xp.saturating_add(xp);
        let new_level = config.level_for_total_xp(self.total_xp);
        let mut currency_awarded = 0;
        if new_level > old_level {
            currency_awarded = (new_level as u64).saturating_mul(LEVEL_UP_CURRENCY_BONUS);
            self.currency = self.currency.saturating_add(currency_awarded);
        }
        UnlockOutcome {
            xp_awarded: xp,
            currency_awarded,
            old_level,
            new_level,
        }
    }

    /// Read-model for the stats panel.
    pub fn stats(&self, config: &ExperienceConfig) -> GamificationStats {
        let progress = config.progress_to_next_level(self.total_xp);
        GamificationStats {
            total_xp: self.total_xp,
            level: progress.current_level,
            currency: self.currency,
            unlocked_count: self.unlocked.len(),
            next_level_xp: progress.xp_needed_for_next_level,
            progress_to_next_level: progress.progress_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::standard_catalog;

    fn catalog_entry(id: &str) -> AchievementDef {
        standard_catalog()
            .into_iter()
            .find(|def| def.id == id)
            .expect("id in standard catalog")
    }

    #[test]
    fn unlock_credits_xp_and_currency() {
        let config = ExperienceConfig::default();
        let mut ledger = ProgressLedger::default();
        let first = catalog_entry("first_profile");

        let outcome = ledger.apply_unlocks(&[&first], &config);
        assert_eq!(outcome.xp_awarded, 50);
        assert_eq!(outcome.currency_awarded, 5);
        assert_eq!(ledger.total_xp, 50);
        assert_eq!(ledger.currency, 5);
        assert!(ledger.unlocked.contains("first_profile"));
        assert!(!outcome.leveled_up());
    }

    #[test]
    fn replaying_an_unlock_is_a_no_op() {
        let config = ExperienceConfig::default();
        let mut ledger = ProgressLedger::default();
        let first = catalog_entry("first_profile");

        ledger.apply_unlocks(&[&first], &config);
        let replay = ledger.apply_unlocks(&[&first], &config);
        assert_eq!(replay.xp_awarded, 0);
        assert_eq!(replay.currency_awarded, 0);
        assert_eq!(ledger.total_xp, 50);
        assert_eq!(ledger.currency, 5);
    }

    #[test]
    fn level_up_adds_bonus_currency() {
        let config = ExperienceConfig::default();
        let mut ledger = ProgressLedger::default();
        let complete = catalog_entry("profile_complete");

        // 200 XP crosses the 100 XP threshold into level 2.
        let outcome = ledger.apply_unlocks(&[&complete], &config);
        assert!(outcome.leveled_up());
        assert_eq!(outcome.old_level, 1);
        assert_eq!(outcome.new_level, 2);
        // 20 from the achievement, 20 bonus for reaching level 2.
        assert_eq!(outcome.currency_awarded, 40);
        assert_eq!(ledger.currency, 40);
    }

    #[test]
    fn add_xp_reports_level_transition() {
        let config = ExperienceConfig::default();
        let mut ledger = ProgressLedger::default();

        let quiet = ledger.add_xp(40, &config);
        assert!(!quiet.leveled_up());
        assert_eq!(quiet.currency_awarded, 0);

        let noisy = ledger.add_xp(300, &config);
        assert!(noisy.leveled_up());
        assert_eq!(noisy.old_level, 1);
        // 340 total XP: past 100 (level 2) and 250 (level 3).
        assert_eq!(noisy.new_level, 3);
        assert_eq!(noisy.currency_awarded, 30);
    }

    #[test]
    fn stats_reflect_the_ledger() {
        let config = ExperienceConfig::default();
        let mut ledger = ProgressLedger::default();
        ledger.apply_unlocks(
            &[&catalog_entry("first_profile"), &catalog_entry("goal_setter")],
            &config,
        );

        let stats = ledger.stats(&config);
        assert_eq!(stats.total_xp, 150);
        assert_eq!(stats.level, 2);
        assert_eq!(stats.unlocked_count, 2);
        assert_eq!(stats.next_level_xp, 150);
        assert!((stats.progress_to_next_level - 100.0 * 50.0 / 150.0).abs() < 1e-9);
    }
}
