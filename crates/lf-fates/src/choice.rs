//! Tier 2 fate choices.
//!
//! When pressure runs high, the entity is offered a dramatic choice: one path
//! trades player control for survival, one faces the death roll, and an
//! optional third changes the terms. Patterns are static templates; a choice
//! picks an example situation, names the antagonist, and fills in the current
//! death odds.

use std::path::Path;

use serde::{Deserialize, Serialize};

use lf_core::{Lcg, LfResult, load_json};

use crate::roll::death_threshold;

/// Phrases in example situations that stand for the antagonist.
pub const ANTAGONIST_PLACEHOLDERS: [&str; 4] =
    ["The Queen of Shadows", "the demon", "The emperor", "the enemy"];

/// Marker in consequence text replaced by the computed death odds.
pub const ODDS_MARKER: &str = "current odds";

/// One path through a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoicePath {
    /// Outcome kind, e.g. `npc_transition` or `fate_roll`.
    #[serde(default)]
    pub outcome: String,
    /// What taking the path means.
    pub description: String,
    /// What follows.
    #[serde(default)]
    pub consequences: Vec<String>,
}

/// A reusable choice template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoicePattern {
    /// One-line summary.
    pub description: String,
    /// Situations that suggest this pattern.
    #[serde(default)]
    pub triggers: Vec<String>,
    /// Paths keyed by name, in document order.
    #[serde(with = "ordered")]
    pub paths: Vec<(String, ChoicePath)>,
    /// Example situations.
    #[serde(default)]
    pub examples: Vec<String>,
}

/// The contents of `fate-choices.json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FateChoiceData {
    /// Patterns keyed by name, in document order.
    #[serde(with = "ordered")]
    pub choice_patterns: Vec<(String, ChoicePattern)>,
    /// Descriptions of outcome kinds; informational only.
    #[serde(default)]
    pub outcome_types: serde_json::Value,
}

impl FateChoiceData {
    /// Load from a file; `Ok(None)` when it does not exist.
    pub fn load(path: &Path) -> LfResult<Option<Self>> {
        load_json(path)
    }

    /// Find a pattern by key.
    pub fn pattern(&self, key: &str) -> Option<&ChoicePattern> {
        self.choice_patterns
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, p)| p)
    }
}

/// JSON objects as ordered `(key, value)` lists.
mod ordered {
    use std::fmt;
    use std::marker::PhantomData;

    use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
    use serde::ser::{SerializeMap, Serializer};
    use serde::Serialize;

    pub fn serialize<S, T>(entries: &[(String, T)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<(String, T)>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        struct EntriesVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
            type Value = Vec<(String, T)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, T>()? {
                    entries.push((key, value));
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// The pattern used when no choice data is available.
pub fn builtin_pattern() -> (String, ChoicePattern) {
    let path = |outcome: &str, description: &str, consequences: [&str; 3]| ChoicePath {
        outcome: outcome.to_string(),
        description: description.to_string(),
        consequences: consequences.iter().map(|c| c.to_string()).collect(),
    };
    (
        "dark_bargain".to_string(),
        ChoicePattern {
            description: "A powerful entity offers safety at the cost of service".to_string(),
            triggers: vec!["high_pressure".to_string()],
            paths: vec![
                (
                    "accept".to_string(),
                    path(
                        "npc_transition",
                        "Accept the bargain. Survive, but serve.",
                        [
                            "Character becomes NPC in antagonist's service",
                            "May appear as ally, enemy, or neutral figure later",
                            "Player loses control but character persists",
                        ],
                    ),
                ),
                (
                    "refuse".to_string(),
                    path(
                        "fate_roll",
                        "Refuse. Face what comes.",
                        [
                            "Roll death/fall check at current odds",
                            "If survived: fortune buffer decreases",
                            "If failed: death or major fall",
                        ],
                    ),
                ),
                (
                    "counter".to_string(),
                    path(
                        "complication",
                        "Make a counter-offer. Change the terms.",
                        [
                            "Temporary reprieve",
                            "New obligation or debt",
                            "Fate pressure temporarily reduced but will return",
                        ],
                    ),
                ),
            ],
            examples: vec![
                "The Dark One offers sanctuary, serve them and lose yourself".to_string(),
                "Your enemy offers pardon in exchange for eternal loyalty".to_string(),
                "The power offers itself, take it and be changed forever".to_string(),
            ],
        },
    )
}

/// Death odds in percent; zero unless pressure is above 50% and fortune below 1.
pub fn death_odds(pressure: f64, fortune: f64) -> f64 {
    if pressure <= 0.5 || fortune >= 1.0 {
        return 0.0;
    }
    death_threshold(pressure, fortune) * 100.0
}

/// Replace every antagonist placeholder in `situation`, ignoring ASCII case.
pub fn personalize(situation: &str, antagonist: &str) -> String {
    let mut out = String::with_capacity(situation.len());
    let mut rest = situation;
    'scan: while let Some(c) = rest.chars().next() {
        for placeholder in ANTAGONIST_PLACEHOLDERS {
            let len = placeholder.len();
            if rest.len() >= len && rest.as_bytes()[..len].eq_ignore_ascii_case(placeholder.as_bytes()) {
                out.push_str(antagonist);
                rest = &rest[len..];
                continue 'scan;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Pick a pattern.
///
/// A known `requested` key is used directly. Otherwise a pattern is drawn from
/// `data` with `rng`, and with no data (or an empty table) the built-in
/// pattern is used.
pub fn select_pattern(
    data: Option<&FateChoiceData>,
    requested: Option<&str>,
    rng: &mut Lcg,
) -> (String, ChoicePattern) {
    let Some(data) = data else {
        tracing::warn!("fate-choice data unavailable, using the built-in dark bargain");
        return builtin_pattern();
    };
    if let Some(key) = requested {
        if let Some(pattern) = data.pattern(key) {
            return (key.to_string(), pattern.clone());
        }
        tracing::warn!(pattern = key, "unknown choice pattern, picking one at random");
    }
    match rng.pick(&data.choice_patterns) {
        Some((key, pattern)) => (key.clone(), pattern.clone()),
        None => builtin_pattern(),
    }
}

/// A path as presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPath {
    /// `A`, `B`, `C`, ...
    pub label: char,
    /// Path key upper-cased with underscores as spaces.
    pub title: String,
    /// What taking the path means.
    pub description: String,
    /// Consequences with the death odds filled in.
    pub consequences: Vec<String>,
}

/// A choice ready to present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FateChoice {
    /// Entity facing the choice.
    pub name: String,
    /// Pattern key.
    pub pattern: String,
    /// Fate pressure.
    pub pressure: f64,
    /// Fortune buffer.
    pub fortune: f64,
    /// Death odds in percent.
    pub death_odds: f64,
    /// The situation, with the antagonist named.
    pub situation: String,
    /// The paths in order.
    pub paths: Vec<RenderedPath>,
}

impl FateChoice {
    /// Build a choice from a pattern. Draws one value from `rng` for the situation.
    pub fn generate(
        name: &str,
        pressure: f64,
        fortune: f64,
        (key, pattern): (String, ChoicePattern),
        antagonist: Option<&str>,
        rng: &mut Lcg,
    ) -> Self {
        let odds = death_odds(pressure, fortune);
        let mut situation = rng.pick(&pattern.examples).cloned().unwrap_or_default();
        if let Some(antagonist) = antagonist {
            situation = personalize(&situation, antagonist);
        }

        let odds_text = format!("{odds:.0}% death chance");
        let paths = pattern
            .paths
            .iter()
            .zip('A'..)
            .map(|((key, path), label)| RenderedPath {
                label,
                title: key.to_uppercase().replace('_', " "),
                description: path.description.clone(),
                consequences: path
                    .consequences
                    .iter()
                    .map(|c| c.replacen(ODDS_MARKER, &odds_text, 1))
                    .collect(),
            })
            .collect();

        Self {
            name: name.to_string(),
            pattern: key,
            pressure,
            fortune,
            death_odds: odds,
            situation,
            paths,
        }
    }

    /// Plain-text presentation for the facilitator.
    pub fn render(&self) -> String {
        let rule = "-".repeat(50);
        let mut lines = vec![
            format!("FATE CHOICE: {}", self.name),
            "=".repeat(50),
            String::new(),
            format!(
                "The wheel turns. Fate pressure is {:.0}%.",
                self.pressure * 100.0
            ),
            "A choice presents itself:".to_string(),
            String::new(),
            format!("\"{}\"", self.situation),
            String::new(),
        ];
        for path in &self.paths {
            lines.push(format!("{}) {}", path.label, path.title));
            lines.push(format!("   {}", path.description));
            for consequence in &path.consequences {
                lines.push(format!("   -> {consequence}"));
            }
            lines.push(String::new());
        }
        lines.push(rule.clone());
        lines.push("MECHANICS".to_string());
        lines.push(rule.clone());
        lines.push(format!("  Fate Pressure: {:.0}%", self.pressure * 100.0));
        lines.push(format!("  Fortune Buffer: {}/5", self.fortune));
        if self.death_odds > 0.0 {
            lines.push(format!("  Death Odds (if roll path): {:.0}%", self.death_odds));
        } else {
            lines.push("  Death: Not eligible (fortune > 0 or pressure <= 50%)".to_string());
        }
        lines.push(String::new());
        lines.push("NOTES FOR FACILITATOR".to_string());
        lines.push(rule);
        lines.push("  - Present this choice at a dramatic moment".to_string());
        lines.push("  - The NPC path should feel like a real cost, not escape".to_string());
        lines.push("  - If they choose to roll, use fate-roll with --danger".to_string());
        lines.push("  - Honor their choice. This IS the climax".to_string());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = r#"{
        "choice_patterns": {
            "final_stand": {
                "description": "No escape, only how the end comes",
                "triggers": ["cornered"],
                "paths": {
                    "last_charge": {"outcome": "fate_roll", "description": "Charge.", "consequences": ["Roll at current odds"]},
                    "surrender": {"outcome": "npc_transition", "description": "Yield.", "consequences": []}
                },
                "examples": ["The enemy holds the gate"]
            },
            "dark_bargain": {
                "description": "Safety at the cost of service",
                "paths": {
                    "accept": {"description": "Serve."}
                },
                "examples": ["the demon offers a hand"]
            }
        },
        "outcome_types": {}
    }"#;

    fn data() -> FateChoiceData {
        serde_json::from_str(DATA).unwrap()
    }

    #[test]
    fn patterns_keep_document_order() {
        let data = data();
        let keys: Vec<&str> = data.choice_patterns.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["final_stand", "dark_bargain"]);
        let paths: Vec<&str> = data
            .pattern("final_stand")
            .unwrap()
            .paths
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(paths, vec!["last_charge", "surrender"]);
    }

    #[test]
    fn ordered_serialization_round_trips_order() {
        let data = data();
        let text = serde_json::to_string(&data).unwrap();
        assert!(text.find("final_stand").unwrap() < text.find("dark_bargain").unwrap());
    }

    #[test]
    fn death_odds_formula() {
        assert_eq!(death_odds(0.5, 0.0), 0.0);
        assert_eq!(death_odds(0.9, 1.0), 0.0);
        assert!((death_odds(0.8, 0.0) - 60.0).abs() < 1e-9);
        assert!((death_odds(0.75, 0.5) - 45.0).abs() < 1e-9);
    }

    #[test]
    fn personalize_is_case_insensitive() {
        assert_eq!(
            personalize("THE ENEMY offers pardon; the Demon waits", "House Blackwood"),
            "House Blackwood offers pardon; House Blackwood waits"
        );
        assert_eq!(
            personalize("The Queen of Shadows smiles", "Vex"),
            "Vex smiles"
        );
        assert_eq!(personalize("Naïve hope", "Vex"), "Naïve hope");
    }

    #[test]
    fn requested_pattern_is_used_without_drawing() {
        let data = data();
        let mut rng = Lcg::new(4);
        let (key, _) = select_pattern(Some(&data), Some("dark_bargain"), &mut rng);
        assert_eq!(key, "dark_bargain");
        assert_eq!(rng.state(), 4);
    }

    #[test]
    fn unknown_pattern_falls_back_to_random() {
        let data = data();
        let (key, _) = select_pattern(Some(&data), Some("nonexistent"), &mut Lcg::new(4));
        assert!(key == "final_stand" || key == "dark_bargain");
    }

    #[test]
    fn missing_data_uses_builtin() {
        let (key, pattern) = select_pattern(None, Some("final_stand"), &mut Lcg::new(4));
        assert_eq!(key, "dark_bargain");
        assert_eq!(pattern.paths.len(), 3);
    }

    #[test]
    fn generate_fills_odds_and_antagonist() {
        let data = data();
        let pattern = (
            "final_stand".to_string(),
            data.pattern("final_stand").unwrap().clone(),
        );
        let choice = FateChoice::generate("Kaira", 0.8, 0.0, pattern, Some("Vex"), &mut Lcg::new(1));
        assert_eq!(choice.situation, "Vex holds the gate");
        assert_eq!(choice.paths[0].label, 'A');
        assert_eq!(choice.paths[0].title, "LAST CHARGE");
        assert_eq!(choice.paths[0].consequences, vec!["Roll at 60% death chance"]);
        assert_eq!(choice.paths[1].label, 'B');

        let text = choice.render();
        assert!(text.starts_with("FATE CHOICE: Kaira"));
        assert!(text.contains("Death Odds (if roll path): 60%"));
    }

    #[test]
    fn builtin_refuse_path_mentions_odds() {
        let choice = FateChoice::generate("Kaira", 0.3, 3.0, builtin_pattern(), None, &mut Lcg::new(9));
        assert_eq!(choice.death_odds, 0.0);
        assert_eq!(
            choice.paths[1].consequences[0],
            "Roll death/fall check at 0% death chance"
        );
        assert!(choice.render().contains("Death: Not eligible"));
    }
}
