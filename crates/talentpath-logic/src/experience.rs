//! Geometric experience curve: levels, thresholds, and progress.
//!
//! Levels are always derived from a total XP count and never stored as
//! ground truth of their own. Level 1 is free; each level after that costs
//! `base_xp * growth^(level - 2)` XP, so the per-level cost grows
//! geometrically.
//!
//! ```
//! use talentpath_logic::experience::ExperienceConfig;
//!
//! let config = ExperienceConfig::default();
//! assert_eq!(config.xp_required_for_level(2), 100);
//! assert_eq!(config.level_for_total_xp(250), 3);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Experience curve configuration error.
#[derive(Debug, Clone, PartialEq)]
pub enum ExperienceError {
    /// Base XP must be at least 1.
    InvalidBaseXp(u32),
    /// Growth factor must be finite and greater than 1.
    InvalidGrowth(f64),
}

impl fmt::Display for ExperienceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceError::InvalidBaseXp(v) => {
                write!(f, "base XP must be at least 1, got {}", v)
            }
            ExperienceError::InvalidGrowth(v) => {
                write!(f, "growth factor must be finite and greater than 1, got {}", v)
            }
        }
    }
}

impl std::error::Error for ExperienceError {}

/// Experience curve parameters.
///
/// Constructed once and passed by reference; there is no global instance.
/// XP totals and levels are unsigned throughout, so negative inputs are
/// unrepresentable rather than checked at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperienceConfig {
    /// XP cost of reaching level 2.
    pub base_xp: u32,
    /// Geometric growth factor for each level past 2.
    pub growth: f64,
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        Self {
            base_xp: 100,
            growth: 1.5,
        }
    }
}

/// Progress within the current level, for progress-bar display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub current_level: u32,
    /// XP earned since reaching the current level.
    pub xp_into_current_level: u64,
    /// Incremental XP cost of the next level.
    pub xp_needed_for_next_level: u64,
    /// 0–100.
    pub progress_percent: f64,
}

impl ExperienceConfig {
    /// Create a validated configuration.
    pub fn new(base_xp: u32, growth: f64) -> Result<Self, ExperienceError> {
        if base_xp == 0 {
            return Err(ExperienceError::InvalidBaseXp(base_xp));
        }
        if !growth.is_finite() || growth <= 1.0 {
            return Err(ExperienceError::InvalidGrowth(growth));
        }
        Ok(Self { base_xp, growth })
    }

    /// XP cost of a single level.
    ///
    /// Level 1 is free. Level `n >= 2` costs `floor(base_xp * growth^(n-2))`,
    /// saturating at `u64::MAX` once the curve outgrows the integer range.
    /// This is the incremental cost of that one level, not a cumulative
    /// threshold.
    pub fn xp_required_for_level(&self, level: u32) -> u64 {
        if level <= 1 {
            return 0;
        }
        let cost = self.base_xp as f64 * self.growth.powf((level - 2) as f64);
        // Float-to-int casts saturate, so an overflowing curve pins at MAX.
        cost as u64
    }

    /// Total XP required to sit at `level` exactly.
    pub fn cumulative_xp_for_level(&self, level: u32) -> u64 {
        let mut total: u64 = 0;
        for l in 2..=level {
            total = match total.checked_add(self.xp_required_for_level(l)) {
                Some(t) => t,
                None => return u64::MAX,
            };
        }
        total
    }

    /// Highest level whose cumulative requirement does not exceed `total_xp`.
    ///
    /// Terminates for every input: per-level cost is strictly positive from
    /// level 2 onward, and accumulation stops once it overflows `u64`.
    pub fn level_for_total_xp(&self, total_xp: u64) -> u32 {
        let mut level: u32 = 1;
        let mut required: u64 = 0;
        loop {
            let next_cost = self.xp_required_for_level(level + 1);
            if next_cost == 0 {
                // Zero cost only happens with an unvalidated config; stop
                // rather than spin.
                return level;
            }
            required = match required.checked_add(next_cost) {
                Some(r) => r,
                None => return level,
            };
            if required > total_xp {
                return level;
            }
            if level == u32::MAX - 1 {
                return u32::MAX;
            }
            level += 1;
        }
    }

    /// Progress toward the next level.
    ///
    /// A zero next-level cost is reported as 100% rather than dividing by
    /// zero; with a validated configuration this only happens once the curve
    /// has saturated past the representable range.
    pub fn progress_to_next_level(&self, total_xp: u64) -> LevelProgress {
        let current_level = self.level_for_total_xp(total_xp);
        let xp_into_current_level = total_xp - self.cumulative_xp_for_level(current_level);
        let xp_needed_for_next_level = self.xp_required_for_level(current_level.saturating_add(1));
        let progress_percent = if xp_needed_for_next_level == 0 {
            100.0
        } else {
            (100.0 * xp_into_current_level as f64 / xp_needed_for_next_level as f64).min(100.0)
        };
        LevelProgress {
            current_level,
            xp_into_current_level,
            xp_needed_for_next_level,
            progress_percent,
        }
    }
}
