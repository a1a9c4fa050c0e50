//! Fixed achievement catalog and predicate evaluation.
//!
//! Achievements are one-way unlocks: the engine reports which catalog
//! entries a profile newly qualifies for, and the caller owns the persisted
//! set of already-unlocked ids. An unlock is never revoked, even if the
//! profile later stops satisfying its predicate.
//!
//! ```
//! use std::collections::HashSet;
//! use talentpath_logic::achievements::AchievementEngine;
//! use talentpath_logic::profile::ProfileSnapshot;
//!
//! let engine = AchievementEngine::default();
//! let snapshot = ProfileSnapshot {
//!     name: "Avery Chen".into(),
//!     position: "Developer".into(),
//!     ..ProfileSnapshot::default()
//! };
//! let result = engine.evaluate(&snapshot, &HashSet::new());
//! assert_eq!(result.unlocked[0].id, "first_profile");
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::profile::{FieldError, ProfileSnapshot};

/// Predicate deciding whether a profile qualifies for an achievement.
///
/// Pure function of the snapshot. A malformed snapshot field surfaces as an
/// error for that one predicate instead of aborting the evaluation pass.
pub type Predicate = fn(&ProfileSnapshot) -> Result<bool, FieldError>;

/// Grouping for the achievements screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Profile,
    Skills,
    Goals,
    Experience,
    Team,
    Level,
}

impl AchievementCategory {
    /// All categories in display order.
    pub const ALL: [AchievementCategory; 6] = [
        AchievementCategory::Profile,
        AchievementCategory::Skills,
        AchievementCategory::Goals,
        AchievementCategory::Experience,
        AchievementCategory::Team,
        AchievementCategory::Level,
    ];

    pub const fn display_name(&self) -> &'static str {
        match self {
            AchievementCategory::Profile => "Profile",
            AchievementCategory::Skills => "Skills",
            AchievementCategory::Goals => "Goals",
            AchievementCategory::Experience => "Experience",
            AchievementCategory::Team => "Team",
            AchievementCategory::Level => "Level",
        }
    }
}

/// One entry in the achievement catalog.
#[derive(Debug, Clone)]
pub struct AchievementDef {
    /// Stable identity, used to test "already unlocked".
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Icon name for the front end.
    pub icon: &'static str,
    pub xp_reward: u64,
    pub category: AchievementCategory,
    pub condition: Predicate,
}

/// A predicate that could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateFailure {
    /// Id of the achievement whose predicate failed.
    pub id: &'static str,
    pub error: FieldError,
}

/// Result of one evaluation pass.
#[derive(Debug, Clone)]
pub struct Evaluation<'a> {
    /// Newly qualifying achievements, in catalog order.
    pub unlocked: Vec<&'a AchievementDef>,
    /// Per-achievement evaluation failures. Non-fatal: the affected entries
    /// count as not qualified for this pass.
    pub failures: Vec<PredicateFailure>,
}

/// Evaluates the achievement catalog against profile snapshots.
///
/// Holds the catalog as explicit immutable state; construct one per
/// configuration rather than sharing a global instance.
#[derive(Debug, Clone)]
pub struct AchievementEngine {
    catalog: Vec<AchievementDef>,
}

impl Default for AchievementEngine {
    /// Engine with the standard catalog.
    fn default() -> Self {
        Self::new(standard_catalog())
    }
}

impl AchievementEngine {
    /// Engine with a custom catalog. Catalog order is preserved in every
    /// output.
    pub fn new(catalog: Vec<AchievementDef>) -> Self {
        Self { catalog }
    }

    /// The full catalog in order.
    pub fn catalog(&self) -> &[AchievementDef] {
        &self.catalog
    }

    /// Evaluate the catalog against a snapshot.
    ///
    /// Entries whose id is already in `unlocked` are skipped. A predicate
    /// failure is logged and recorded, the entry counts as not qualified,
    /// and the rest of the catalog is still evaluated. The unlocked set is
    /// never mutated here; merging the result back is the caller's job.
    pub fn evaluate<'a>(
        &'a self,
        snapshot: &ProfileSnapshot,
        unlocked: &HashSet<String>,
    ) -> Evaluation<'a> {
        let mut result = Evaluation {
            unlocked: Vec::new(),
            failures: Vec::new(),
        };
        for def in &self.catalog {
            if unlocked.contains(def.id) {
                continue;
            }
            match (def.condition)(snapshot) {
                Ok(true) => result.unlocked.push(def),
                Ok(false) => {}
                Err(error) => {
                    log::warn!("achievement {}: predicate failed: {}", def.id, error);
                    result.failures.push(PredicateFailure { id: def.id, error });
                }
            }
        }
        result
    }

    /// Catalog entries in the given category, in catalog order.
    pub fn by_category(&self, category: AchievementCategory) -> Vec<&AchievementDef> {
        self.catalog
            .iter()
            .filter(|def| def.category == category)
            .collect()
    }
}

// ── Standard catalog predicates ─────────────────────────────────────────

fn has_name_and_position(s: &ProfileSnapshot) -> Result<bool, FieldError> {
    Ok(!s.name.trim().is_empty() && !s.position.trim().is_empty())
}

fn has_three_skills(s: &ProfileSnapshot) -> Result<bool, FieldError> {
    Ok(s.skill_list().len() >= 3)
}

fn has_goals(s: &ProfileSnapshot) -> Result<bool, FieldError> {
    Ok(!s.goals.trim().is_empty())
}

fn profile_fully_complete(s: &ProfileSnapshot) -> Result<bool, FieldError> {
    Ok(s.profile_complete >= 100)
}

fn three_years_experience(s: &ProfileSnapshot) -> Result<bool, FieldError> {
    Ok(s.parsed_experience_years()? >= 3)
}

fn has_department_and_position(s: &ProfileSnapshot) -> Result<bool, FieldError> {
    Ok(!s.department.trim().is_empty() && !s.position.trim().is_empty())
}

fn reached_level_5(s: &ProfileSnapshot) -> Result<bool, FieldError> {
    Ok(s.level >= 5)
}

fn reached_level_10(s: &ProfileSnapshot) -> Result<bool, FieldError> {
    Ok(s.level >= 10)
}

/// The standard achievement catalog, in display order.
pub fn standard_catalog() -> Vec<AchievementDef> {
    vec![
        AchievementDef {
            id: "first_profile",
            title: "First Steps",
            description: "Create your profile",
            icon: "user-plus",
            xp_reward: 50,
            category: AchievementCategory::Profile,
            condition: has_name_and_position,
        },
        AchievementDef {
            id: "skill_master",
            title: "Skill Master",
            description: "List three or more skills",
            icon: "tools",
            xp_reward: 75,
            category: AchievementCategory::Skills,
            condition: has_three_skills,
        },
        AchievementDef {
            id: "goal_setter",
            title: "Goal Setter",
            description: "Set your development goals",
            icon: "bullseye",
            xp_reward: 100,
            category: AchievementCategory::Goals,
            condition: has_goals,
        },
        AchievementDef {
            id: "profile_complete",
            title: "Profile Complete",
            description: "Fill out your profile completely",
            icon: "trophy",
            xp_reward: 200,
            category: AchievementCategory::Profile,
            condition: profile_fully_complete,
        },
        AchievementDef {
            id: "experienced",
            title: "Seasoned Professional",
            description: "Log three or more years of experience",
            icon: "clock",
            xp_reward: 150,
            category: AchievementCategory::Experience,
            condition: three_years_experience,
        },
        AchievementDef {
            id: "team_player",
            title: "Team Player",
            description: "List your department and position",
            icon: "users",
            xp_reward: 100,
            category: AchievementCategory::Team,
            condition: has_department_and_position,
        },
        AchievementDef {
            id: "level_5",
            title: "Level Five",
            description: "Reach level 5",
            icon: "star",
            xp_reward: 300,
            category: AchievementCategory::Level,
            condition: reached_level_5,
        },
        AchievementDef {
            id: "level_10",
            title: "Level Ten",
            description: "Reach level 10",
            icon: "crown",
            xp_reward: 500,
            category: AchievementCategory::Level,
            condition: reached_level_10,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(evaluation: &Evaluation<'_>) -> Vec<&'static str> {
        evaluation.unlocked.iter().map(|def| def.id).collect()
    }

    #[test]
    fn empty_profile_unlocks_nothing() {
        let engine = AchievementEngine::default();
        let result = engine.evaluate(&ProfileSnapshot::default(), &HashSet::new());
        assert!(result.unlocked.is_empty());
        assert!(result.failures.is_empty());
    }

    #[test]
    fn name_and_position_unlock_first_profile_only() {
        let engine = AchievementEngine::default();
        let snapshot = ProfileSnapshot {
            name: "A".into(),
            position: "Dev".into(),
            ..ProfileSnapshot::default()
        };
        let result = engine.evaluate(&snapshot, &HashSet::new());
        assert_eq!(ids(&result), vec!["first_profile"]);
    }

    #[test]
    fn three_skills_unlock_skill_master() {
        let engine = AchievementEngine::default();
        let snapshot = ProfileSnapshot {
            skills: "Python, SQL, Docker".into(),
            ..ProfileSnapshot::default()
        };
        let result = engine.evaluate(&snapshot, &HashSet::new());
        assert!(ids(&result).contains(&"skill_master"));
    }

    #[test]
    fn two_skills_do_not_unlock_skill_master() {
        let engine = AchievementEngine::default();
        let snapshot = ProfileSnapshot {
            skills: "Python, SQL".into(),
            ..ProfileSnapshot::default()
        };
        let result = engine.evaluate(&snapshot, &HashSet::new());
        assert!(!ids(&result).contains(&"skill_master"));
    }

    #[test]
    fn already_unlocked_ids_are_never_returned() {
        let engine = AchievementEngine::default();
        let snapshot = ProfileSnapshot {
            name: "A".into(),
            position: "Dev".into(),
            department: "IT".into(),
            ..ProfileSnapshot::default()
        };
        let unlocked: HashSet<String> = ["first_profile".to_string()].into_iter().collect();
        let result = engine.evaluate(&snapshot, &unlocked);
        assert_eq!(ids(&result), vec!["team_player"]);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let engine = AchievementEngine::default();
        let snapshot = ProfileSnapshot {
            name: "A".into(),
            position: "Dev".into(),
            skills: "Rust, SQL, Docker".into(),
            goals: "Lead a team".into(),
            ..ProfileSnapshot::default()
        };
        let first = ids(&engine.evaluate(&snapshot, &HashSet::new()));
        let second = ids(&engine.evaluate(&snapshot, &HashSet::new()));
        assert_eq!(first, second);
    }

    #[test]
    fn output_preserves_catalog_order() {
        let engine = AchievementEngine::default();
        let snapshot = ProfileSnapshot {
            name: "A".into(),
            position: "Dev".into(),
            department: "IT".into(),
            skills: "Rust, SQL, Docker".into(),
            goals: "Lead a team".into(),
            experience_years: "4".into(),
            profile_complete: 100,
            level: 5,
        };
        let result = engine.evaluate(&snapshot, &HashSet::new());
        assert_eq!(
            ids(&result),
            vec![
                "first_profile",
                "skill_master",
                "goal_setter",
                "profile_complete",
                "experienced",
                "team_player",
                "level_5",
            ]
        );
    }

    #[test]
    fn malformed_experience_skips_only_that_achievement() {
        let engine = AchievementEngine::default();
        let snapshot = ProfileSnapshot {
            name: "A".into(),
            position: "Dev".into(),
            experience_years: "a few".into(),
            ..ProfileSnapshot::default()
        };
        let result = engine.evaluate(&snapshot, &HashSet::new());
        assert_eq!(ids(&result), vec!["first_profile"]);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].id, "experienced");
    }

    #[test]
    fn by_category_filters_in_order() {
        let engine = AchievementEngine::default();
        let profile: Vec<_> = engine
            .by_category(AchievementCategory::Profile)
            .iter()
            .map(|def| def.id)
            .collect();
        assert_eq!(profile, vec!["first_profile", "profile_complete"]);

        let level: Vec<_> = engine
            .by_category(AchievementCategory::Level)
            .iter()
            .map(|def| def.id)
            .collect();
        assert_eq!(level, vec!["level_5", "level_10"]);
    }

    #[test]
    fn standard_catalog_ids_are_unique() {
        let catalog = standard_catalog();
        let mut seen = HashSet::new();
        for def in &catalog {
            assert!(seen.insert(def.id), "duplicate id {}", def.id);
        }
        assert_eq!(catalog.len(), 8);
    }

    #[test]
    fn custom_catalog_is_respected() {
        let catalog = vec![AchievementDef {
            id: "night_owl",
            title: "Night Owl",
            description: "Save a profile after midnight",
            icon: "moon",
            xp_reward: 25,
            category: AchievementCategory::Profile,
            condition: has_name_and_position,
        }];
        let engine = AchievementEngine::new(catalog);
        let snapshot = ProfileSnapshot {
            name: "A".into(),
            position: "Dev".into(),
            ..ProfileSnapshot::default()
        };
        let result = engine.evaluate(&snapshot, &HashSet::new());
        assert_eq!(ids(&result), vec!["night_owl"]);
    }
}
