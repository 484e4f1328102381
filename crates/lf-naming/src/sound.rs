//! Sound profiles: a cheap phonetic fingerprint of a character's given name.

use serde::{Deserialize, Serialize};

const VOWELS: &str = "aeiouy";
const CONSONANTS: &str = "bcdfghjklmnpqrstvwxz";

/// Phonetic summary of the first token of a name.
///
/// A pure function of the name string; stored alongside each character so
/// later checks compare against the profile recorded at the time it was added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SoundProfile {
    /// First letter, lowercase.
    pub starts_with: String,
    /// Number of vowel groups (at least 1).
    pub syllables: u32,
    /// Last letter, lowercase.
    pub ends_with: String,
    /// Distinct consonants in order of first appearance.
    pub consonants: Vec<char>,
    /// The vowels of the name with everything else removed.
    pub vowel_pattern: String,
}

impl SoundProfile {
    /// Analyze the given name (the first whitespace-separated token) of `name`.
    pub fn analyze(name: &str) -> Self {
        let first = first_token(name).to_lowercase();
        Self {
            starts_with: first.chars().next().map(String::from).unwrap_or_default(),
            syllables: count_syllables(&first),
            ends_with: first.chars().next_back().map(String::from).unwrap_or_default(),
            consonants: consonants(&first),
            vowel_pattern: vowel_pattern(&first),
        }
    }
}

/// The first whitespace-separated token of a name, or `""` for a blank name.
pub fn first_token(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or("")
}

/// The last token of a multi-token name; `None` for a single token.
pub fn last_token(name: &str) -> Option<&str> {
    let mut tokens = name.split_whitespace();
    tokens.next()?;
    tokens.next_back()
}

fn is_vowel(c: char) -> bool {
    VOWELS.contains(c)
}

/// Count vowel groups. Names with no vowels count as one syllable.
pub fn count_syllables(word: &str) -> u32 {
    let mut groups = 0;
    let mut in_group = false;
    for c in word.to_lowercase().chars() {
        let vowel = is_vowel(c);
        if vowel && !in_group {
            groups += 1;
        }
        in_group = vowel;
    }
    groups.max(1)
}

/// Distinct consonants of `word`, lowercase, in order of first appearance.
pub fn consonants(word: &str) -> Vec<char> {
    let mut seen = Vec::new();
    for c in word.to_lowercase().chars() {
        if CONSONANTS.contains(c) && !seen.contains(&c) {
            seen.push(c);
        }
    }
    seen
}

/// The vowel letters of `word`, lowercase, in order.
pub fn vowel_pattern(word: &str) -> String {
    word.to_lowercase().chars().filter(|c| is_vowel(*c)).collect()
}
