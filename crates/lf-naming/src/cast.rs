//! The cast file: every character a project has named so far.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use lf_core::{LfError, LfResult, load_json, write_json_pretty};

use crate::sound::{SoundProfile, first_token, last_token};

/// Default cast file name in the working directory.
pub const DEFAULT_CAST_FILE: &str = "cast-tracker.json";

/// Format version written into new cast files.
pub const CAST_VERSION: &str = "1.0";

/// Cultures below this share of the cast are suggested for more characters.
pub const UNDERREPRESENTED_SHARE: f64 = 0.2;

/// Project metadata stored under `_meta`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastMeta {
    /// Project title.
    pub project: String,
    /// Creation date, `YYYY-MM-DD`.
    pub created: String,
    /// Date of the last write, `YYYY-MM-DD`.
    pub updated: String,
    /// File format version.
    pub version: String,
}

/// A named character in the cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Full name as entered.
    pub name: String,
    /// Narrative role, e.g. "protagonist".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Cultural background used for distribution tracking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culture: Option<String>,
    /// Sound profile computed when the character was added.
    #[serde(default)]
    pub sound_profile: SoundProfile,
    /// Date added, `YYYY-MM-DD`.
    #[serde(default)]
    pub added_at: String,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A character about to be added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCharacter {
    /// Full name.
    pub name: String,
    /// Narrative role.
    pub role: Option<String>,
    /// Cultural background.
    pub culture: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl NewCharacter {
    /// A character with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the culture.
    pub fn with_culture(mut self, culture: impl Into<String>) -> Self {
        self.culture = Some(culture.into());
        self
    }

    /// Set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// The persisted cast document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CastFile {
    /// Project metadata.
    #[serde(rename = "_meta")]
    pub meta: CastMeta,
    /// Characters in the order they were added.
    pub characters: Vec<Character>,
    /// Surnames of multi-token names, in order of use.
    pub used_surnames: Vec<String>,
    /// Given names, in order of use.
    pub used_given_names: Vec<String>,
    /// Number of characters per culture.
    pub cultural_distribution: BTreeMap<String, u32>,
}

/// One row of the cultural distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CultureShare {
    /// Culture name.
    pub culture: String,
    /// Characters with this culture.
    pub count: u32,
    /// Share of the whole cast, in percent.
    pub percent: f64,
}

/// Advice for choosing the next name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestions {
    /// Initials already used by more than one character.
    pub avoid_initials: Vec<String>,
    /// Initials A-Z no character uses.
    pub available_initials: Vec<String>,
    /// Cultures under 20% of the cast.
    pub underrepresented_cultures: Vec<String>,
}

impl CastFile {
    /// An empty cast for `project`, created on `date`.
    pub fn new(project: impl Into<String>, date: &str) -> Self {
        Self {
            meta: CastMeta {
                project: project.into(),
                created: date.to_string(),
                updated: date.to_string(),
                version: CAST_VERSION.to_string(),
            },
            ..Self::default()
        }
    }

    /// Append a character and update the usage lists and distribution.
    ///
    /// No collision check happens here.
    pub fn add(&mut self, new: NewCharacter, date: &str) -> &Character {
        let given = first_token(&new.name).to_string();
        if let Some(surname) = last_token(&new.name) {
            self.used_surnames.push(surname.to_string());
        }
        self.used_given_names.push(given);
        if let Some(culture) = &new.culture {
            *self
                .cultural_distribution
                .entry(culture.clone())
                .or_insert(0) += 1;
        }

        let index = self.characters.len();
        self.characters.push(Character {
            sound_profile: SoundProfile::analyze(&new.name),
            name: new.name,
            role: new.role,
            culture: new.culture,
            added_at: date.to_string(),
            notes: new.notes,
        });
        &self.characters[index]
    }

    /// Refresh `_meta.updated`.
    pub fn touch(&mut self, date: &str) {
        self.meta.updated = date.to_string();
    }

    /// Characters per uppercase first initial, most used first.
    ///
    /// Ties keep the order in which the initial first appeared.
    pub fn initial_usage(&self) -> Vec<(String, u32)> {
        let mut usage: Vec<(String, u32)> = Vec::new();
        for character in &self.characters {
            let initial = character.sound_profile.starts_with.to_uppercase();
            match usage.iter_mut().find(|(i, _)| *i == initial) {
                Some((_, count)) => *count += 1,
                None => usage.push((initial, 1)),
            }
        }
        usage.sort_by(|a, b| b.1.cmp(&a.1));
        usage
    }

    /// Cultural distribution, largest first, with shares of the cast size.
    pub fn culture_shares(&self) -> Vec<CultureShare> {
        let total = self.characters.len();
        let mut shares: Vec<CultureShare> = self
            .cultural_distribution
            .iter()
            .map(|(culture, &count)| CultureShare {
                culture: culture.clone(),
                count,
                percent: if total == 0 {
                    0.0
                } else {
                    f64::from(count) / total as f64 * 100.0
                },
            })
            .collect();
        shares.sort_by(|a, b| b.count.cmp(&a.count));
        shares
    }

    /// Initials to avoid, initials still free, and cultures worth adding.
    pub fn suggestions(&self) -> Suggestions {
        let initials = self.initial_usage();
        let avoid_initials = initials
            .iter()
            .filter(|(_, count)| *count > 1)
            .map(|(initial, _)| initial.clone())
            .collect();
        let available_initials = ('A'..='Z')
            .map(String::from)
            .filter(|letter| !initials.iter().any(|(i, _)| i == letter))
            .collect();

        let total = self.characters.len() as f64;
        let underrepresented_cultures = self
            .cultural_distribution
            .iter()
            .filter(|(_, count)| total > 0.0 && f64::from(**count) / total < UNDERREPRESENTED_SHARE)
            .map(|(culture, _)| culture.clone())
            .collect();

        Suggestions {
            avoid_initials,
            available_initials,
            underrepresented_cultures,
        }
    }
}

/// Load the cast file at `path`.
pub fn load_cast(path: &Path) -> LfResult<CastFile> {
    load_json(path)?.ok_or_else(|| LfError::NotFound(format!("cast file at {}", path.display())))
}

/// Write the cast file, refreshing `_meta.updated` to `date` first.
pub fn save_cast(path: &Path, cast: &mut CastFile, date: &str) -> LfResult<()> {
    cast.touch(date);
    write_json_pretty(path, cast)?;
    tracing::info!(
        path = %path.display(),
        characters = cast.characters.len(),
        "cast saved"
    );
    Ok(())
}

/// Create a new cast file. Fails if `path` already exists.
pub fn init_cast(path: &Path, project: &str, date: &str) -> LfResult<CastFile> {
    if path.exists() {
        return Err(LfError::AlreadyExists(format!(
            "cast file at {}",
            path.display()
        )));
    }
    let mut cast = CastFile::new(project, date);
    save_cast(path, &mut cast, date)?;
    Ok(cast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DAY: &str = "2026-03-01";

    fn sample() -> CastFile {
        let mut cast = CastFile::new("Harbor Lights", DAY);
        cast.add(
            NewCharacter::named("Sarah Chen")
                .with_role("protagonist")
                .with_culture("chinese-american"),
            DAY,
        );
        cast.add(NewCharacter::named("Marcus Webb").with_culture("anglo"), DAY);
        cast.add(NewCharacter::named("Mira").with_culture("anglo"), DAY);
        cast.add(NewCharacter::named("Tobiah Okafor").with_culture("anglo"), DAY);
        cast.add(NewCharacter::named("Ines Alvarez").with_culture("anglo"), DAY);
        cast.add(NewCharacter::named("Dov Levin").with_culture("anglo"), DAY);
        cast
    }

    #[test]
    fn new_cast_meta() {
        let cast = CastFile::new("Harbor Lights", DAY);
        assert_eq!(cast.meta.project, "Harbor Lights");
        assert_eq!(cast.meta.created, DAY);
        assert_eq!(cast.meta.updated, DAY);
        assert_eq!(cast.meta.version, "1.0");
        assert!(cast.characters.is_empty());
    }

    #[test]
    fn add_tracks_names_and_culture() {
        let mut cast = CastFile::new("P", DAY);
        let added = cast.add(
            NewCharacter::named("Sarah Chen").with_culture("chinese-american"),
            DAY,
        );
        assert_eq!(added.sound_profile.starts_with, "s");
        assert_eq!(added.added_at, DAY);
        cast.add(NewCharacter::named("Mira"), DAY);

        assert_eq!(cast.used_surnames, vec!["Chen"]);
        assert_eq!(cast.used_given_names, vec!["Sarah", "Mira"]);
        assert_eq!(cast.cultural_distribution.get("chinese-american"), Some(&1));
        assert_eq!(cast.cultural_distribution.len(), 1);
    }

    #[test]
    fn initial_usage_most_used_first() {
        let usage = sample().initial_usage();
        assert_eq!(usage[0], ("M".to_string(), 2));
        assert_eq!(usage[1], ("S".to_string(), 1));
        assert_eq!(usage.len(), 5);
    }

    #[test]
    fn culture_shares_sorted() {
        let shares = sample().culture_shares();
        assert_eq!(shares[0].culture, "anglo");
        assert_eq!(shares[0].count, 5);
        assert_eq!(shares[1].culture, "chinese-american");
        assert!((shares[1].percent - 100.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn suggestions_cover_initials_and_cultures() {
        let s = sample().suggestions();
        assert_eq!(s.avoid_initials, vec!["M"]);
        assert!(!s.available_initials.contains(&"S".to_string()));
        assert!(s.available_initials.contains(&"A".to_string()));
        assert_eq!(s.available_initials.len(), 26 - 5);
        assert_eq!(s.underrepresented_cultures, vec!["chinese-american"]);
    }

    #[test]
    fn empty_cast_suggests_every_initial() {
        let s = CastFile::new("P", DAY).suggestions();
        assert!(s.avoid_initials.is_empty());
        assert_eq!(s.available_initials.len(), 26);
        assert!(s.underrepresented_cultures.is_empty());
    }

    #[test]
    fn file_format_uses_meta_and_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["_meta"]["project"], "Harbor Lights");
        assert_eq!(json["characters"][0]["soundProfile"]["startsWith"], "s");
        assert_eq!(json["characters"][0]["addedAt"], DAY);
        assert_eq!(json["usedSurnames"][0], "Chen");
        assert_eq!(json["culturalDistribution"]["anglo"], 5);
        assert!(json["characters"][1].get("role").is_none());
    }

    #[test]
    fn init_save_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cast.json");

        let mut cast = init_cast(&path, "Harbor Lights", DAY).unwrap();
        cast.add(NewCharacter::named("Sarah Chen"), DAY);
        save_cast(&path, &mut cast, "2026-03-02").unwrap();

        let loaded = load_cast(&path).unwrap();
        assert_eq!(loaded.meta.created, DAY);
        assert_eq!(loaded.meta.updated, "2026-03-02");
        assert_eq!(loaded.characters.len(), 1);
    }

    #[test]
    fn init_refuses_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cast.json");
        init_cast(&path, "A", DAY).unwrap();
        let err = init_cast(&path, "B", DAY).unwrap_err();
        assert!(matches!(err, LfError::AlreadyExists(_)));
    }

    #[test]
    fn load_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load_cast(&dir.path().join("none.json")).unwrap_err();
        assert!(matches!(err, LfError::NotFound(_)));
    }
}
