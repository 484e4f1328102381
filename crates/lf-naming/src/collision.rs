//! Collision detection between a candidate name and an existing cast.
//!
//! Each existing character is checked against five rules: exact match, same
//! initial with a similar syllable count, shared surname, a small edit
//! distance between given names, and identical first and last sounds. The
//! severity of a report only ever rises while a check runs.

use std::fmt;

use serde::{Deserialize, Serialize};

use lf_core::{LfError, LfResult};

use crate::cast::Character;
use crate::distance::levenshtein;
use crate::sound::{SoundProfile, first_token, last_token};

/// Maximum given-name edit distance that still reads as "too similar".
pub const MAX_SIMILAR_DISTANCE: usize = 2;

/// How risky a candidate name is, ordered `None < Warning < High`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No collision found.
    #[default]
    None,
    /// Readers may confuse the names.
    Warning,
    /// Readers will confuse the names; adding requires `--force`.
    High,
}

impl Severity {
    /// Raise to `to` if it is more severe. Never lowers.
    pub fn raise(&mut self, to: Severity) {
        if to > *self {
            *self = to;
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Warning => write!(f, "warning"),
            Self::High => write!(f, "high"),
        }
    }
}

/// The outcome of checking one name against a cast.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionReport {
    /// Whether any rule fired.
    pub has_collision: bool,
    /// The highest severity reached.
    pub severity: Severity,
    /// Distinct issue messages, in the order first raised.
    pub issues: Vec<String>,
    /// Distinct names of the colliding characters, in the order first raised.
    pub similar_to: Vec<String>,
}

impl CollisionReport {
    fn flag(&mut self, severity: Severity, issue: String, character: &str) {
        self.has_collision = true;
        self.severity.raise(severity);
        if !self.issues.contains(&issue) {
            self.issues.push(issue);
        }
        self.note_similar(character);
    }

    fn note_similar(&mut self, character: &str) {
        if !self.similar_to.iter().any(|n| n == character) {
            self.similar_to.push(character.to_string());
        }
    }

    fn is_similar_to(&self, character: &str) -> bool {
        self.similar_to.iter().any(|n| n == character)
    }

    /// Decide whether `name` may join the cast. A high-risk collision is
    /// refused unless `force` is set.
    pub fn admit(&self, name: &str, force: bool) -> LfResult<()> {
        if self.severity == Severity::High && !force {
            return Err(LfError::Validation(format!(
                "\"{name}\" was not added; use --force to add anyway, or choose a different name"
            )));
        }
        Ok(())
    }
}

/// Check `name` against every character in `characters`.
pub fn check_collision(name: &str, characters: &[Character]) -> CollisionReport {
    let mut report = CollisionReport::default();

    let profile = SoundProfile::analyze(name);
    let name_lower = name.trim().to_lowercase();
    let first = first_token(&name_lower);
    let last = last_token(&name_lower);

    for character in characters {
        let other_lower = character.name.trim().to_lowercase();
        let other_first = first_token(&other_lower);
        let other_last = last_token(&other_lower);
        let other = &character.sound_profile;

        if name_lower == other_lower {
            report.flag(
                Severity::High,
                "Exact match with existing character".into(),
                &character.name,
            );
            continue;
        }

        let same_initial = profile.starts_with == other.starts_with;

        if same_initial && profile.syllables.abs_diff(other.syllables) <= 1 {
            report.flag(
                Severity::Warning,
                format!(
                    "Same first initial '{}' with similar syllable count",
                    profile.starts_with.to_uppercase()
                ),
                &character.name,
            );
        }

        if let (Some(mine), Some(theirs)) = (last, other_last) {
            if mine == theirs {
                report.flag(
                    Severity::High,
                    format!("Same surname '{mine}'"),
                    &character.name,
                );
            }
        }

        if first != other_first && levenshtein(first, other_first) <= MAX_SIMILAR_DISTANCE {
            report.flag(
                Severity::Warning,
                format!("Very similar to '{other_first}' (small edit distance)"),
                &character.name,
            );
        }

        // Only reported for characters no earlier rule caught.
        if same_initial
            && profile.ends_with == other.ends_with
            && !report.is_similar_to(&character.name)
        {
            report.flag(
                Severity::Warning,
                "Same start and end sounds".into(),
                &character.name,
            );
        }
    }

    tracing::debug!(
        name,
        severity = %report.severity,
        issues = report.issues.len(),
        "collision check"
    );
    report
}
