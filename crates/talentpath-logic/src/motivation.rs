//! Motivational messages shown after profile and progression events.
//!
//! The front end pairs every gamification event with a short encouraging
//! message. The catalogs are fixed; selection is uniform over the
//! category's pool.

use rand::Rng;

/// Event class a message is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotivationCategory {
    /// Profile created or updated.
    Profile,
    /// Achievement unlocked.
    Achievement,
    /// Level threshold crossed.
    LevelUp,
}

/// All messages for a category.
pub const fn messages(category: MotivationCategory) -> &'static [&'static str] {
    match category {
        MotivationCategory::Profile => &[
            "Great work! You are on the right track!",
            "Every step brings you closer to your goal!",
            "Keep it up!",
            "Your profile keeps getting better!",
        ],
        MotivationCategory::Achievement => &[
            "Congratulations on the new achievement!",
            "You are a true professional!",
            "Excellent work, keep going!",
            "New achievement unlocked!",
        ],
        MotivationCategory::LevelUp => &[
            "New level reached!",
            "You are growing as a professional!",
            "Congratulations on leveling up!",
            "Great progress, keep it up!",
        ],
    }
}

/// Pick a message for the event, uniformly at random.
pub fn pick_message<R: Rng + ?Sized>(category: MotivationCategory, rng: &mut R) -> &'static str {
    let pool = messages(category);
    pool[rng.gen_range(0..pool.len())]
}
