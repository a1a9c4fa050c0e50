//! TalentPath Headless Validation Harness
//!
//! Validates pure gamification logic and demo data without any server or
//! front end. Runs entirely in-process — no DB, no networking, no UI.
//!
//! Usage:
//!   cargo run -p talentpath-simtest
//!   cargo run -p talentpath-simtest -- --verbose

use std::collections::HashSet;

use serde::Deserialize;

use talentpath_logic::achievements::{AchievementCategory, AchievementEngine};
use talentpath_logic::experience::ExperienceConfig;
use talentpath_logic::ledger::ProgressLedger;
use talentpath_logic::motivation::{messages, MotivationCategory};
use talentpath_logic::profile::ProfileSnapshot;

// ── Demo profiles (same JSON the front end ships as fallback data) ──────
const DEMO_JSON: &str = include_str!("../../../data/demo_profiles.json");

#[derive(Debug, Deserialize)]
struct DemoProfile {
    name: String,
    position: String,
    department: String,
    experience_years: String,
    skills: String,
    goals: String,
    profile_complete: u8,
    level: u32,
    xp: u64,
    achievements: Vec<String>,
}

impl DemoProfile {
    fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot {
            name: self.name.clone(),
            position: self.position.clone(),
            department: self.department.clone(),
            skills: self.skills.clone(),
            goals: self.goals.clone(),
            experience_years: self.experience_years.clone(),
            profile_complete: self.profile_complete,
            level: self.level,
        }
    }
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== TalentPath Gamification Harness ===\n");

    let mut results = Vec::new();

    // 1. Catalog integrity
    results.extend(validate_catalog(verbose));

    // 2. Experience curve sweep
    results.extend(validate_experience_curve(verbose));

    // 3. Demo profile consistency
    results.extend(validate_demo_profiles(verbose));

    // 4. Predicate failure recovery
    results.extend(validate_failure_recovery(verbose));

    // 5. Ledger walkthrough
    results.extend(validate_ledger(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Catalog integrity ────────────────────────────────────────────────

fn validate_catalog(_verbose: bool) -> Vec<TestResult> {
    println!("--- Achievement Catalog ---");
    let mut results = Vec::new();
    let engine = AchievementEngine::default();
    let catalog = engine.catalog();

    results.push(TestResult {
        name: "catalog_not_empty".into(),
        passed: !catalog.is_empty(),
        detail: format!("{} achievements", catalog.len()),
    });

    let mut seen = HashSet::new();
    let duplicates: Vec<_> = catalog
        .iter()
        .filter(|def| !seen.insert(def.id))
        .map(|def| def.id)
        .collect();
    results.push(TestResult {
        name: "catalog_unique_ids".into(),
        passed: duplicates.is_empty(),
        detail: if duplicates.is_empty() {
            "all ids unique".into()
        } else {
            format!("duplicate ids: {:?}", duplicates)
        },
    });

    let incomplete: Vec<_> = catalog
        .iter()
        .filter(|def| {
            def.title.is_empty()
                || def.description.is_empty()
                || def.icon.is_empty()
                || def.xp_reward == 0
        })
        .map(|def| def.id)
        .collect();
    results.push(TestResult {
        name: "catalog_entries_complete".into(),
        passed: incomplete.is_empty(),
        detail: if incomplete.is_empty() {
            "all entries have title, description, icon, reward".into()
        } else {
            format!("incomplete entries: {:?}", incomplete)
        },
    });

    let by_category: usize = AchievementCategory::ALL
        .iter()
        .map(|c| engine.by_category(*c).len())
        .sum();
    results.push(TestResult {
        name: "categories_partition_catalog".into(),
        passed: by_category == catalog.len(),
        detail: format!("{} entries across {} categories", by_category, AchievementCategory::ALL.len()),
    });

    results
}

// ── 2. Experience curve ─────────────────────────────────────────────────

fn validate_experience_curve(verbose: bool) -> Vec<TestResult> {
    println!("--- Experience Curve ---");
    let mut results = Vec::new();
    let config = ExperienceConfig::default();

    let expected = [(2u32, 100u64), (3, 150), (4, 225), (5, 337)];
    let mismatches: Vec<_> = expected
        .iter()
        .filter(|(level, xp)| config.xp_required_for_level(*level) != *xp)
        .collect();
    results.push(TestResult {
        name: "curve_reference_values".into(),
        passed: mismatches.is_empty(),
        detail: if mismatches.is_empty() {
            "levels 2-5 cost 100/150/225/337".into()
        } else {
            format!("{} mismatched reference values", mismatches.len())
        },
    });

    let mut round_trip_ok = true;
    for level in 1..=30 {
        let threshold = config.cumulative_xp_for_level(level);
        if config.level_for_total_xp(threshold) != level {
            round_trip_ok = false;
            if verbose {
                println!("  round-trip failed at level {}", level);
            }
        }
    }
    results.push(TestResult {
        name: "curve_round_trip".into(),
        passed: round_trip_ok,
        detail: "threshold XP maps back to its level (1-30)".into(),
    });

    let mut monotonic = true;
    let mut bounded = true;
    let mut previous = 0;
    for xp in (0..20_000).step_by(11) {
        let level = config.level_for_total_xp(xp);
        if level < previous {
            monotonic = false;
        }
        previous = level;
        let progress = config.progress_to_next_level(xp);
        if !(0.0..=100.0).contains(&progress.progress_percent) {
            bounded = false;
        }
    }
    results.push(TestResult {
        name: "curve_monotonic".into(),
        passed: monotonic,
        detail: "level never decreases over XP sweep".into(),
    });
    results.push(TestResult {
        name: "progress_bounded".into(),
        passed: bounded,
        detail: "progress percent stays within 0-100".into(),
    });

    results
}

// ── 3. Demo profiles ────────────────────────────────────────────────────

fn validate_demo_profiles(verbose: bool) -> Vec<TestResult> {
    println!("--- Demo Profiles ---");
    let mut results = Vec::new();

    let profiles: Vec<DemoProfile> = match serde_json::from_str(DEMO_JSON) {
        Ok(p) => p,
        Err(e) => {
            results.push(TestResult {
                name: "demo_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "demo_not_empty".into(),
        passed: profiles.len() >= 8,
        detail: format!("{} demo profiles loaded", profiles.len()),
    });

    let engine = AchievementEngine::default();
    let config = ExperienceConfig::default();
    let known_ids: HashSet<&str> = engine.catalog().iter().map(|def| def.id).collect();

    let mut unknown_ids = Vec::new();
    let mut level_mismatches = Vec::new();
    let mut completion_mismatches = Vec::new();
    let mut unsettled = Vec::new();

    for profile in &profiles {
        for id in &profile.achievements {
            if !known_ids.contains(id.as_str()) {
                unknown_ids.push(format!("{}: {}", profile.name, id));
            }
        }

        if config.level_for_total_xp(profile.xp) != profile.level {
            level_mismatches.push(format!(
                "{}: {} XP is level {}, recorded {}",
                profile.name,
                profile.xp,
                config.level_for_total_xp(profile.xp),
                profile.level
            ));
        }

        let snapshot = profile.snapshot();
        if snapshot.completion_percent() != profile.profile_complete {
            completion_mismatches.push(format!(
                "{}: computed {}%, recorded {}%",
                profile.name,
                snapshot.completion_percent(),
                profile.profile_complete
            ));
        }

        // Every earned achievement is already recorded, so a fresh
        // evaluation pass over the recorded set finds nothing new.
        let recorded: HashSet<String> = profile.achievements.iter().cloned().collect();
        let evaluation = engine.evaluate(&snapshot, &recorded);
        if !evaluation.unlocked.is_empty() || !evaluation.failures.is_empty() {
            unsettled.push(format!(
                "{}: {} new, {} failures",
                profile.name,
                evaluation.unlocked.len(),
                evaluation.failures.len()
            ));
        }

        if verbose {
            println!(
                "  {} — level {}, {} XP, {} achievements",
                profile.name,
                profile.level,
                profile.xp,
                profile.achievements.len()
            );
        }
    }

    results.push(TestResult {
        name: "demo_known_achievement_ids".into(),
        passed: unknown_ids.is_empty(),
        detail: if unknown_ids.is_empty() {
            "all recorded ids exist in the catalog".into()
        } else {
            format!("unknown ids: {:?}", unknown_ids)
        },
    });
    results.push(TestResult {
        name: "demo_levels_match_xp".into(),
        passed: level_mismatches.is_empty(),
        detail: if level_mismatches.is_empty() {
            "recorded levels re-derive from XP".into()
        } else {
            level_mismatches.join("; ")
        },
    });
    results.push(TestResult {
        name: "demo_completion_matches".into(),
        passed: completion_mismatches.is_empty(),
        detail: if completion_mismatches.is_empty() {
            "recorded completion matches the five-field rule".into()
        } else {
            completion_mismatches.join("; ")
        },
    });
    results.push(TestResult {
        name: "demo_profiles_settled".into(),
        passed: unsettled.is_empty(),
        detail: if unsettled.is_empty() {
            "no profile qualifies for unrecorded achievements".into()
        } else {
            unsettled.join("; ")
        },
    });

    results
}

// ── 4. Predicate failure recovery ───────────────────────────────────────

fn validate_failure_recovery(_verbose: bool) -> Vec<TestResult> {
    println!("--- Failure Recovery ---");
    let mut results = Vec::new();
    let engine = AchievementEngine::default();

    let snapshot = ProfileSnapshot {
        name: "Broken Import".into(),
        position: "Developer".into(),
        experience_years: "ten-ish".into(),
        ..ProfileSnapshot::default()
    };
    let evaluation = engine.evaluate(&snapshot, &HashSet::new());

    results.push(TestResult {
        name: "bad_field_is_isolated".into(),
        passed: evaluation.failures.len() == 1
            && evaluation.failures[0].id == "experienced",
        detail: format!("{} predicate failure(s)", evaluation.failures.len()),
    });
    results.push(TestResult {
        name: "rest_of_catalog_still_evaluated".into(),
        passed: evaluation.unlocked.iter().any(|def| def.id == "first_profile"),
        detail: format!("{} achievements still unlocked", evaluation.unlocked.len()),
    });

    results
}

// ── 5. Ledger walkthrough ───────────────────────────────────────────────

fn validate_ledger(_verbose: bool) -> Vec<TestResult> {
    println!("--- Progress Ledger ---");
    let mut results = Vec::new();
    let engine = AchievementEngine::default();
    let config = ExperienceConfig::default();

    let mut snapshot = ProfileSnapshot {
        name: "Avery Chen".into(),
        position: "Developer".into(),
        department: "Engineering".into(),
        skills: "Rust, SQL, Docker".into(),
        goals: "Ship the gamification core".into(),
        experience_years: "3".into(),
        profile_complete: 100,
        level: 1,
    };
    let mut ledger = ProgressLedger::default();

    let evaluation = engine.evaluate(&snapshot, &ledger.unlocked);
    let outcome = ledger.apply_unlocks(&evaluation.unlocked, &config);
    snapshot.level = config.level_for_total_xp(ledger.total_xp);

    results.push(TestResult {
        name: "ledger_credits_rewards".into(),
        passed: outcome.xp_awarded == 675 && ledger.total_xp == 675,
        detail: format!("{} XP awarded", outcome.xp_awarded),
    });
    results.push(TestResult {
        name: "ledger_levels_up".into(),
        passed: outcome.leveled_up() && snapshot.level == 4,
        detail: format!("level {} -> {}", outcome.old_level, outcome.new_level),
    });

    let replay = ledger.apply_unlocks(&evaluation.unlocked, &config);
    results.push(TestResult {
        name: "ledger_replay_is_noop".into(),
        passed: replay.xp_awarded == 0 && ledger.total_xp == 675,
        detail: "re-applying the same unlocks changes nothing".into(),
    });

    let stats = ledger.stats(&config);
    results.push(TestResult {
        name: "stats_consistent".into(),
        passed: stats.level == config.level_for_total_xp(stats.total_xp)
            && stats.unlocked_count == ledger.unlocked.len(),
        detail: format!(
            "level {}, {} XP, {} unlocked",
            stats.level, stats.total_xp, stats.unlocked_count
        ),
    });

    let empty_pools: Vec<_> = [
        MotivationCategory::Profile,
        MotivationCategory::Achievement,
        MotivationCategory::LevelUp,
    ]
    .iter()
    .filter(|c| messages(**c).is_empty())
    .collect();
    results.push(TestResult {
        name: "motivation_pools_populated".into(),
        passed: empty_pools.is_empty(),
        detail: "every event category has messages".into(),
    });

    results
}
