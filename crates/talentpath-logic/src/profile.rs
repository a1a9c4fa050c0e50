//! Typed read-only profile snapshot.
//!
//! The upstream profile source (REST API or local cache) hands over loosely
//! structured form data. This module pins that data to explicit types: every
//! field a predicate may inspect is present with an explicit default, so
//! "absent" and "zero" never blur together. The experience field is kept as
//! entered — the form accepts free text — and parsed on demand.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A snapshot field that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A field expected to hold a number held something else.
    NonNumeric {
        field: &'static str,
        value: String,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::NonNumeric { field, value } => {
                write!(f, "field `{}` is not numeric: {:?}", field, value)
            }
        }
    }
}

impl std::error::Error for FieldError {}

/// Read-only view of the profile fields achievement predicates inspect.
///
/// Missing upstream fields deserialize to their defaults (empty string,
/// zero) rather than failing the whole payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSnapshot {
    pub name: String,
    pub position: String,
    pub department: String,
    /// Comma-separated skill list, as entered.
    pub skills: String,
    /// Free-text development goals.
    pub goals: String,
    /// Years of experience, as entered.
    pub experience_years: String,
    /// Profile completion percentage (0–100) as reported upstream.
    pub profile_complete: u8,
    /// Current level, derived from total XP by the caller.
    pub level: u32,
}

impl ProfileSnapshot {
    /// Parse the free-text experience field.
    ///
    /// Blank means "not filled in" and defaults to zero years. Anything
    /// else must parse as a whole number of years.
    pub fn parsed_experience_years(&self) -> Result<u32, FieldError> {
        let raw = self.experience_years.trim();
        if raw.is_empty() {
            return Ok(0);
        }
        raw.parse().map_err(|_| FieldError::NonNumeric {
            field: "experience_years",
            value: raw.to_string(),
        })
    }

    /// Split the comma-separated skills field into trimmed non-empty entries.
    pub fn skill_list(&self) -> Vec<&str> {
        self.skills
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Percentage of the core profile fields that are filled in.
    ///
    /// Counts name, position, department, experience, and goals. The
    /// experience entry only counts once it parses to a non-zero number of
    /// years.
    pub fn completion_percent(&self) -> u8 {
        let filled = [
            !self.name.trim().is_empty(),
            !self.position.trim().is_empty(),
            !self.department.trim().is_empty(),
            self.parsed_experience_years().map_or(false, |y| y > 0),
            !self.goals.trim().is_empty(),
        ];
        let count = filled.iter().filter(|f| **f).count();
        ((count as f64 / filled.len() as f64) * 100.0).round() as u8
    }
}
