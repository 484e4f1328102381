//! Name lists, mixed pools, and phoneme presets under the data directory.

use std::fmt;
use std::fs;

use serde::{Deserialize, Serialize};

use lf_core::{DataDir, LfResult, load_json};

const CULTURES_DIR: &str = "names/cultures";
const POOLS_DIR: &str = "names/mixed-pools";
const PRESETS_DIR: &str = "names/phoneme-presets";

/// Which list of a culture to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Family names.
    Surnames,
    /// Given names of any gender.
    Given,
    /// Male given names.
    GivenMale,
    /// Female given names.
    GivenFemale,
}

impl ListKind {
    /// Every kind, longest file suffix first.
    pub const ALL: [ListKind; 4] = [
        ListKind::GivenFemale,
        ListKind::GivenMale,
        ListKind::Surnames,
        ListKind::Given,
    ];

    /// The file-name suffix for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Surnames => "surnames",
            Self::Given => "given",
            Self::GivenMale => "given-male",
            Self::GivenFemale => "given-female",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A curated list of names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NameList {
    /// Free-form provenance information.
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    /// The names.
    #[serde(default)]
    pub names: Vec<String>,
}

/// Phonemes and syllable shapes for invented names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhonemePreset {
    /// Free-form description of the aesthetic.
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    /// Consonants and consonant clusters substituted for `C`.
    #[serde(default)]
    pub consonants: Vec<String>,
    /// Vowels and diphthongs substituted for `V`.
    #[serde(default)]
    pub vowels: Vec<String>,
    /// Syllable shapes over `C` and `V`, e.g. `"CVC"`.
    #[serde(default)]
    pub syllable_templates: Vec<String>,
    /// Advisory cluster limit; not enforced by the generator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_clusters: Option<u32>,
}

/// Read access to the naming data files.
#[derive(Debug, Clone)]
pub struct NameLibrary {
    data: DataDir,
}

impl NameLibrary {
    /// A library over `data`.
    pub fn new(data: DataDir) -> Self {
        Self { data }
    }

    /// Load one list of `culture`.
    ///
    /// Tries `<culture>-<kind>.json`, then `<culture>/<kind>.json`, then a
    /// single `<culture>.json`.
    pub fn load_list(&self, culture: &str, kind: ListKind) -> LfResult<Option<NameList>> {
        let candidates = [
            format!("{CULTURES_DIR}/{culture}-{kind}.json"),
            format!("{CULTURES_DIR}/{culture}/{kind}.json"),
            format!("{CULTURES_DIR}/{culture}.json"),
        ];
        for candidate in &candidates {
            if let Some(list) = load_json(&self.data.join(candidate))? {
                tracing::debug!(path = %candidate, "loaded name list");
                return Ok(Some(list));
            }
        }
        Ok(None)
    }

    /// Load a mixed pool by name.
    pub fn load_pool(&self, pool: &str) -> LfResult<Option<NameList>> {
        load_json(&self.data.join(format!("{POOLS_DIR}/{pool}.json")))
    }

    /// Load a phoneme preset by name.
    pub fn load_preset(&self, preset: &str) -> LfResult<Option<PhonemePreset>> {
        load_json(&self.data.join(format!("{PRESETS_DIR}/{preset}.json")))
    }

    /// Cultures with at least one list, sorted and deduplicated.
    pub fn cultures(&self) -> Vec<String> {
        let mut cultures: Vec<String> = self
            .data
            .json_stems(CULTURES_DIR)
            .iter()
            .map(|stem| culture_of(stem).to_string())
            .collect();

        if let Ok(entries) = fs::read_dir(self.data.join(CULTURES_DIR)) {
            cultures.extend(
                entries
                    .filter_map(|e| e.ok())
                    .filter(|e| e.path().is_dir())
                    .map(|e| e.file_name().to_string_lossy().into_owned()),
            );
        }

        cultures.sort();
        cultures.dedup();
        cultures
    }

    /// Available mixed pools.
    pub fn pools(&self) -> Vec<String> {
        self.data.json_stems(POOLS_DIR)
    }

    /// Available phoneme presets.
    pub fn presets(&self) -> Vec<String> {
        self.data.json_stems(PRESETS_DIR)
    }
}

/// Strip a list-kind suffix from a culture file stem.
fn culture_of(stem: &str) -> &str {
    for kind in ListKind::ALL {
        if let Some(culture) = stem.strip_suffix(kind.as_str()) {
            if let Some(culture) = culture.strip_suffix('-') {
                if !culture.is_empty() {
                    return culture;
                }
            }
        }
    }
    stem
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, rel: &str, content: &str) {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn culture_of_strips_longest_suffix() {
        assert_eq!(culture_of("chinese-given-female"), "chinese");
        assert_eq!(culture_of("chinese-given"), "chinese");
        assert_eq!(culture_of("west-african-surnames"), "west-african");
        assert_eq!(culture_of("nordic"), "nordic");
        assert_eq!(culture_of("given"), "given");
    }

    #[test]
    fn load_list_tries_each_layout() {
        let dir = TempDir::new().unwrap();
        write(&dir, "names/cultures/anglo-surnames.json", r#"{"names":["Webb"]}"#);
        write(&dir, "names/cultures/nordic/given.json", r#"{"names":["Sigrid"]}"#);
        write(&dir, "names/cultures/basque.json", r#"{"names":["Ane"]}"#);
        let lib = NameLibrary::new(DataDir::new(dir.path()));

        let anglo = lib.load_list("anglo", ListKind::Surnames).unwrap().unwrap();
        assert_eq!(anglo.names, vec!["Webb"]);
        let nordic = lib.load_list("nordic", ListKind::Given).unwrap().unwrap();
        assert_eq!(nordic.names, vec!["Sigrid"]);
        let basque = lib.load_list("basque", ListKind::GivenMale).unwrap().unwrap();
        assert_eq!(basque.names, vec!["Ane"]);
        assert!(lib.load_list("anglo", ListKind::Given).unwrap().is_none());
    }

    #[test]
    fn malformed_list_is_an_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "names/cultures/anglo-given.json", "[oops");
        let lib = NameLibrary::new(DataDir::new(dir.path()));
        assert!(lib.load_list("anglo", ListKind::Given).is_err());
    }

    #[test]
    fn listings() {
        let dir = TempDir::new().unwrap();
        write(&dir, "names/cultures/anglo-surnames.json", "{}");
        write(&dir, "names/cultures/anglo-given-female.json", "{}");
        write(&dir, "names/cultures/nordic/given.json", "{}");
        write(&dir, "names/mixed-pools/contemporary-american.json", "{}");
        write(&dir, "names/phoneme-presets/neutral.json", "{}");
        write(&dir, "names/phoneme-presets/elvish-like.json", "{}");
        let lib = NameLibrary::new(DataDir::new(dir.path()));

        assert_eq!(lib.cultures(), vec!["anglo", "nordic"]);
        assert_eq!(lib.pools(), vec!["contemporary-american"]);
        assert_eq!(lib.presets(), vec!["elvish-like", "neutral"]);
    }

    #[test]
    fn preset_parses_camel_case() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "names/phoneme-presets/neutral.json",
            r#"{"consonants":["b"],"vowels":["a"],"syllableTemplates":["CV"],"maxClusters":1}"#,
        );
        let lib = NameLibrary::new(DataDir::new(dir.path()));
        let preset = lib.load_preset("neutral").unwrap().unwrap();
        assert_eq!(preset.syllable_templates, vec!["CV"]);
        assert_eq!(preset.max_clusters, Some(1));
    }
}
