//! Name generation from curated lists, mixed pools, and phoneme presets.
//!
//! All randomness comes from the caller's [`Lcg`], so the same seed and
//! request reproduce the same names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use lf_core::{Lcg, LfError, LfResult};

use crate::cast::Character;
use crate::library::{ListKind, NameLibrary, NameList, PhonemePreset};

/// Names generated when no count is given.
pub const DEFAULT_COUNT: usize = 5;

/// Given names at most this long with the same initial are compared by letters.
const SHORT_NAME_LEN: usize = 5;

/// Letter-set similarity above which two short names collide.
const SHORT_NAME_SIMILARITY: f64 = 0.6;

/// One generated name with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedName {
    /// The name.
    pub name: String,
    /// Where it came from, e.g. `fantasy:elvish-like` or `culture:anglo:surnames`.
    pub source: String,
    /// Whether it collides with the cast; absent when no cast was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collision: Option<bool>,
    /// The character it collides with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collision_with: Option<String>,
}

impl GeneratedName {
    fn new(name: String, source: &str) -> Self {
        Self {
            name,
            source: source.to_string(),
            collision: None,
            collision_with: None,
        }
    }
}

/// Gender filter for given-name lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    /// Use the female given-name list.
    Female,
    /// Use the male given-name list.
    Male,
}

impl Gender {
    /// The list holding given names of this gender.
    pub fn given_kind(self) -> ListKind {
        match self {
            Self::Female => ListKind::GivenFemale,
            Self::Male => ListKind::GivenMale,
        }
    }
}

impl FromStr for Gender {
    type Err = LfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "f" | "female" => Ok(Self::Female),
            "m" | "male" => Ok(Self::Male),
            other => Err(LfError::InvalidArgument(format!(
                "gender must be 'f' or 'm', got '{other}'"
            ))),
        }
    }
}

/// Inclusive syllable count range for invented names, written `A-B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyllableRange {
    /// Fewest syllables.
    pub min: u32,
    /// Most syllables.
    pub max: u32,
}

impl Default for SyllableRange {
    fn default() -> Self {
        Self { min: 2, max: 3 }
    }
}

impl FromStr for SyllableRange {
    type Err = LfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            LfError::InvalidArgument(format!("syllable range must look like 2-3, got '{s}'"))
        };
        let (min, max) = s.split_once('-').ok_or_else(invalid)?;
        let min = min.trim().parse().map_err(|_| invalid())?;
        let max = max.trim().parse().map_err(|_| invalid())?;
        if min == 0 || min > max {
            return Err(invalid());
        }
        Ok(Self { min, max })
    }
}

impl fmt::Display for SyllableRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Where generated names come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameSource {
    /// Invented from a phoneme preset.
    Fantasy {
        /// Preset name.
        preset: String,
        /// Syllables per name.
        syllables: SyllableRange,
    },
    /// Drawn from a mixed pool.
    Pool(String),
    /// Drawn from a culture's lists.
    Culture {
        /// Culture name.
        culture: String,
        /// Gendered given names instead of surnames.
        gender: Option<Gender>,
        /// Pair given names with surnames.
        full_name: bool,
    },
}

/// A generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRequest {
    /// Source of the names.
    pub source: NameSource,
    /// Names wanted. Lists may yield fewer.
    pub count: usize,
}

impl NameRequest {
    /// A request for [`DEFAULT_COUNT`] names from `source`.
    pub fn new(source: NameSource) -> Self {
        Self {
            source,
            count: DEFAULT_COUNT,
        }
    }

    /// Set the number of names.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// Generate names for `request`, checking each against `cast` when given.
pub fn generate_names(
    library: &NameLibrary,
    request: &NameRequest,
    cast: Option<&[Character]>,
    rng: &mut Lcg,
) -> LfResult<Vec<GeneratedName>> {
    let mut names: Vec<GeneratedName> = match &request.source {
        NameSource::Fantasy { preset, syllables } => {
            let loaded = library
                .load_preset(preset)?
                .ok_or_else(|| LfError::NotFound(format!("fantasy preset \"{preset}\"")))?;
            let source = format!("fantasy:{preset}");
            (0..request.count)
                .map(|_| {
                    let count = rng.range(i64::from(syllables.min), i64::from(syllables.max));
                    GeneratedName::new(fantasy_name(&loaded, count.max(0) as usize, rng), &source)
                })
                .collect()
        }
        NameSource::Pool(pool) => {
            let list = library
                .load_pool(pool)?
                .ok_or_else(|| LfError::NotFound(format!("pool \"{pool}\"")))?;
            let source = format!("pool:{pool}");
            from_list(&list, request.count, rng)
                .into_iter()
                .map(|name| GeneratedName::new(name, &source))
                .collect()
        }
        NameSource::Culture {
            culture,
            gender,
            full_name: true,
        } => {
            let surnames = library.load_list(culture, ListKind::Surnames)?;
            let given_kind = gender.map_or(ListKind::Given, Gender::given_kind);
            let given = match library.load_list(culture, given_kind)? {
                Some(list) => Some(list),
                None => library.load_list(culture, ListKind::Given)?,
            };
            let (Some(surnames), Some(given)) = (surnames, given) else {
                return Err(LfError::NotFound(format!(
                    "name lists for culture \"{culture}\""
                )));
            };

            let surnames = from_list(&surnames, request.count, rng);
            let given = from_list(&given, request.count, rng);
            let source = format!("culture:{culture}");
            given
                .iter()
                .zip(&surnames)
                .map(|(g, s)| GeneratedName::new(format!("{g} {s}"), &source))
                .collect()
        }
        NameSource::Culture {
            culture,
            gender,
            full_name: false,
        } => {
            let kind = gender.map_or(ListKind::Surnames, Gender::given_kind);
            let list = match library.load_list(culture, kind)? {
                Some(list) => list,
                None => library.load_list(culture, ListKind::Given)?.ok_or_else(|| {
                    LfError::NotFound(format!("name list for culture \"{culture}\""))
                })?,
            };
            let source = format!("culture:{culture}:{kind}");
            from_list(&list, request.count, rng)
                .into_iter()
                .map(|name| GeneratedName::new(name, &source))
                .collect()
        }
    };

    if let Some(characters) = cast {
        for generated in &mut names {
            let hit = quick_collision(&generated.name, characters);
            generated.collision = Some(hit.is_some());
            generated.collision_with = hit;
        }
    }

    tracing::debug!(count = names.len(), "names generated");
    Ok(names)
}

/// Shuffle the list and take up to `count` names.
pub fn from_list(list: &NameList, count: usize, rng: &mut Lcg) -> Vec<String> {
    let mut shuffled = rng.shuffle(&list.names);
    shuffled.truncate(count);
    shuffled
}

/// Fill a `C`/`V` template with phonemes from `preset`.
pub fn syllable(preset: &PhonemePreset, template: &str, rng: &mut Lcg) -> String {
    let mut out = String::new();
    for c in template.chars() {
        let pool = match c {
            'C' => &preset.consonants,
            'V' => &preset.vowels,
            _ => continue,
        };
        if let Some(phoneme) = rng.pick(pool) {
            out.push_str(phoneme);
        }
    }
    out
}

/// Invent a name of `syllables` syllables, capitalised.
pub fn fantasy_name(preset: &PhonemePreset, syllables: usize, rng: &mut Lcg) -> String {
    let mut name = String::new();
    for _ in 0..syllables {
        let template = rng.pick(&preset.syllable_templates).cloned().unwrap_or_default();
        name.push_str(&syllable(preset, &template, rng));
    }
    capitalize(&name)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A lighter collision check used while generating.
///
/// Returns the colliding character's name, suffixed with `(same surname)`
/// for a shared surname.
pub fn quick_collision(name: &str, characters: &[Character]) -> Option<String> {
    let lower = name.to_lowercase();
    let parts: Vec<&str> = lower.split_whitespace().collect();
    let first = parts.first().copied().unwrap_or("");
    let initial = lower.chars().next();

    for character in characters {
        let other = character.name.to_lowercase();
        let other_parts: Vec<&str> = other.split_whitespace().collect();
        let other_first = other_parts.first().copied().unwrap_or("");

        if lower == other {
            return Some(character.name.clone());
        }

        if initial.is_some()
            && initial == other.chars().next()
            && first.chars().count() <= SHORT_NAME_LEN
            && other_first.chars().count() <= SHORT_NAME_LEN
            && letter_similarity(first, other_first) > SHORT_NAME_SIMILARITY
        {
            return Some(character.name.clone());
        }

        if parts.len() > 1 && other_parts.len() > 1 && parts.last() == other_parts.last() {
            return Some(format!("{} (same surname)", character.name));
        }
    }
    None
}

/// Shared distinct letters over the larger distinct-letter count.
pub fn letter_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let mut a_chars: Vec<char> = a.chars().collect();
    let mut b_chars: Vec<char> = b.chars().collect();
    a_chars.sort_unstable();
    a_chars.dedup();
    b_chars.sort_unstable();
    b_chars.dedup();
    let shared = a_chars.iter().filter(|c| b_chars.contains(c)).count();
    shared as f64 / a_chars.len().max(b_chars.len()) as f64
}
