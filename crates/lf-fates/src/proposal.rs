//! Fate-shift proposals.
//!
//! A proposal is a Markdown document describing a shift for human review
//! before anything in the world bible changes.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use lf_core::{Lcg, LfError, LfResult, load_json};

use crate::roll::ShiftSeverity;

/// Pressure assumed when none is given.
pub const DEFAULT_PRESSURE: f64 = 0.65;
/// Trigger text used when none is given.
pub const DEFAULT_TRIGGER: &str = "Manual assessment";

/// What kind of entity shifts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftCategory {
    /// A person.
    #[default]
    Character,
    /// An organisation.
    Faction,
    /// A place.
    Location,
}

impl ShiftCategory {
    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Faction => "faction",
            Self::Location => "location",
        }
    }

    /// The shift types with templates and alternatives for this category.
    pub fn shift_types(self) -> &'static [&'static str] {
        match self {
            Self::Character => &[
                "death",
                "fall",
                "corruption",
                "exile",
                "transformation",
                "diminishment",
            ],
            Self::Faction => &[
                "collapse",
                "schism",
                "absorption",
                "decline",
                "reformation",
                "defeat",
            ],
            Self::Location => &[
                "destruction",
                "conquest",
                "disaster",
                "decline",
                "transformation",
                "isolation",
            ],
        }
    }
}

impl fmt::Display for ShiftCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftCategory {
    type Err = LfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "character" => Ok(Self::Character),
            "faction" => Ok(Self::Faction),
            "location" => Ok(Self::Location),
            _ => Err(LfError::InvalidArgument(format!(
                "category must be character, faction, or location, got '{s}'"
            ))),
        }
    }
}

/// Preconditions for a shift type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eligibility {
    /// The entity must be in danger.
    #[serde(default)]
    pub requires_danger: Option<bool>,
    /// Minimum pressure.
    #[serde(default)]
    pub min_pressure: Option<f64>,
    /// Maximum fortune buffer.
    #[serde(default)]
    pub max_fortune_buffer: Option<f64>,
}

/// Template text for one shift type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftTypeTemplate {
    /// One-line description.
    pub description: String,
    /// Consequence text per severity name.
    #[serde(default)]
    pub severities: BTreeMap<String, String>,
    /// Preconditions, informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eligibility: Option<Eligibility>,
    /// Ways the shift can enter the story.
    #[serde(default)]
    pub narrative_hooks: Vec<String>,
}

impl ShiftTypeTemplate {
    /// A template for shift types without data.
    pub fn generic(shift_type: &str, category: ShiftCategory) -> Self {
        Self {
            description: format!("A {shift_type} affecting {category}"),
            severities: ShiftSeverity::ALL
                .iter()
                .map(|s| {
                    let word = s.as_str();
                    let mut title = word.to_string();
                    title[..1].make_ascii_uppercase();
                    (word.to_string(), format!("{title} consequences"))
                })
                .collect(),
            eligibility: None,
            narrative_hooks: vec!["The circumstances unfold through play".to_string()],
        }
    }

    /// Consequence text for `severity`.
    pub fn severity_text(&self, severity: ShiftSeverity) -> &str {
        self.severities
            .get(severity.as_str())
            .map_or("Consequences to be determined.", String::as_str)
    }
}

/// The contents of `shift-types.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftTypes {
    /// Character shift types.
    #[serde(default)]
    pub character: BTreeMap<String, ShiftTypeTemplate>,
    /// Faction shift types.
    #[serde(default)]
    pub faction: BTreeMap<String, ShiftTypeTemplate>,
    /// Location shift types.
    #[serde(default)]
    pub location: BTreeMap<String, ShiftTypeTemplate>,
}

impl ShiftTypes {
    /// Load from a file; `Ok(None)` when it does not exist.
    pub fn load(path: &Path) -> LfResult<Option<Self>> {
        load_json(path)
    }

    /// The template for `shift_type` in `category`, if present.
    pub fn get(&self, category: ShiftCategory, shift_type: &str) -> Option<&ShiftTypeTemplate> {
        match category {
            ShiftCategory::Character => self.character.get(shift_type),
            ShiftCategory::Faction => self.faction.get(shift_type),
            ShiftCategory::Location => self.location.get(shift_type),
        }
    }

    /// The template for `shift_type`, or a generic one.
    pub fn template_or_generic(
        types: Option<&Self>,
        category: ShiftCategory,
        shift_type: &str,
    ) -> ShiftTypeTemplate {
        match types.and_then(|t| t.get(category, shift_type)) {
            Some(template) => template.clone(),
            None => {
                tracing::warn!(%category, shift_type, "no shift-type template, using a generic one");
                ShiftTypeTemplate::generic(shift_type, category)
            }
        }
    }
}

/// The next milder severity, or "warning sign" below minor.
pub fn lesser_severity(severity: ShiftSeverity) -> &'static str {
    severity.lesser().map_or("warning sign", ShiftSeverity::as_str)
}

/// A comparable shift of a different type.
pub fn alternative_type(shift_type: &str, category: ShiftCategory) -> &'static str {
    match (category, shift_type) {
        (ShiftCategory::Character, "death") => "fall",
        (ShiftCategory::Character, "fall") => "diminishment",
        (ShiftCategory::Character, "corruption") => "transformation",
        (ShiftCategory::Character, "exile") => "fall",
        (ShiftCategory::Character, "transformation") => "corruption",
        (ShiftCategory::Character, "diminishment") => "fall",
        (ShiftCategory::Faction, "collapse") => "schism",
        (ShiftCategory::Faction, "schism") => "decline",
        (ShiftCategory::Faction, "absorption") => "decline",
        (ShiftCategory::Faction, "decline") => "defeat",
        (ShiftCategory::Faction, "reformation") => "schism",
        (ShiftCategory::Faction, "defeat") => "decline",
        (ShiftCategory::Location, "destruction") => "disaster",
        (ShiftCategory::Location, "conquest") => "decline",
        (ShiftCategory::Location, "disaster") => "decline",
        (ShiftCategory::Location, "decline") => "isolation",
        (ShiftCategory::Location, "transformation") => "decline",
        (ShiftCategory::Location, "isolation") => "decline",
        _ => "different fate",
    }
}

/// Everything a proposal describes.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposalRequest {
    /// Entity name.
    pub name: String,
    /// Entity category.
    pub category: ShiftCategory,
    /// Shift type, e.g. `fall`.
    pub shift_type: String,
    /// Severity.
    pub severity: ShiftSeverity,
    /// Pressure at assessment.
    pub pressure: f64,
    /// The triggering roll, when recorded.
    pub roll: Option<u32>,
    /// What prompted the assessment.
    pub trigger: String,
    /// Contributing vulnerabilities.
    pub vulnerabilities: Vec<String>,
    /// Date stamped on the document.
    pub date: String,
}

impl ProposalRequest {
    /// A request with default pressure and trigger and no roll.
    pub fn new(
        name: impl Into<String>,
        shift_type: impl Into<String>,
        severity: ShiftSeverity,
        date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: ShiftCategory::default(),
            shift_type: shift_type.into(),
            severity,
            pressure: DEFAULT_PRESSURE,
            roll: None,
            trigger: DEFAULT_TRIGGER.to_string(),
            vulnerabilities: Vec::new(),
            date: date.into(),
        }
    }

    /// Render the proposal. Draws one value from `rng` for the narrative hook.
    pub fn render(&self, template: &ShiftTypeTemplate, rng: &mut Lcg) -> String {
        let name = &self.name;
        let shift_type = &self.shift_type;
        let category = self.category;
        let threshold = self.pressure * 100.0;
        let hook = rng
            .pick(&template.narrative_hooks)
            .map_or("The circumstances unfold through play", String::as_str);
        let severity_text = template.severity_text(self.severity);
        let severity_upper = self.severity.as_str().to_uppercase();

        let mut lines = vec![
            format!("# Fate-Shift Proposal: {name}"),
            String::new(),
            format!("**Date Generated:** {}", self.date),
            format!("**Trigger:** {}", self.trigger),
            format!("**Fate Pressure at Assessment:** {:.1}%", self.pressure * 100.0),
            String::new(),
            "## Current State Summary".to_string(),
            String::new(),
            format!("{name} is a {category} currently under significant fate pressure."),
            "The wheel of fortune has turned against them.".to_string(),
            String::new(),
            "## Vulnerability Analysis".to_string(),
            String::new(),
        ];

        if self.vulnerabilities.is_empty() {
            lines.push(
                "Vulnerabilities should be documented from the entity's world bible entry."
                    .to_string(),
            );
        } else {
            lines.push("The following vulnerabilities contributed to this fate-shift:".to_string());
            lines.extend(self.vulnerabilities.iter().map(|v| format!("- {v}")));
        }
        lines.push(String::new());

        lines.push("## The Fate Roll".to_string());
        lines.push(String::new());
        match self.roll {
            Some(roll) => {
                lines.push(format!("- **Roll:** {roll}"));
                lines.push(format!("- **Threshold:** {threshold:.0}"));
            }
            None => {
                lines.push("- **Roll:** [Not recorded - manual proposal]".to_string());
                lines.push(format!("- **Threshold:** {threshold:.0} (based on pressure)"));
            }
        }
        lines.push(format!("- **Severity:** {severity_upper}"));
        lines.push(String::new());

        lines.extend([
            "## Proposed Fate-Shift".to_string(),
            String::new(),
            format!("{name} experiences a {} {shift_type}.", self.severity),
            String::new(),
            format!("**{}**", template.description),
            String::new(),
            severity_text.to_string(),
            String::new(),
            "### Type".to_string(),
            String::new(),
            shift_type.clone(),
            String::new(),
            "### Narrative Hook".to_string(),
            String::new(),
            hook.to_string(),
            String::new(),
            "### Consequences".to_string(),
            String::new(),
            format!("- **For {name}:** {severity_text}"),
        ]);

        let (world, campaigns) = match category {
            ShiftCategory::Character => (
                format!(
                    "Power vacuum in {name}'s sphere of influence. Allies and enemies respond."
                ),
                "Review active campaigns involving this character for impact.",
            ),
            ShiftCategory::Faction => (
                format!(
                    "{name}'s {shift_type} creates opportunities for rivals and instability for allies."
                ),
                "Review campaigns with faction involvement for necessary adjustments.",
            ),
            ShiftCategory::Location => (
                format!(
                    "The {shift_type} of {name} ripples outward, affecting connected locations."
                ),
                "Review campaigns set in or connected to this location.",
            ),
        };
        lines.push(format!("- **For the world:** {world}"));
        lines.push(format!("- **For campaigns:** {campaigns}"));
        lines.push(String::new());

        lines.extend([
            "## Alternative Options".to_string(),
            String::new(),
            format!(
                "1. Reduce severity to {} with slower progression",
                lesser_severity(self.severity)
            ),
            format!(
                "2. Change type to {} with equivalent severity",
                alternative_type(shift_type, category)
            ),
            "3. Defer decision and increase pressure by 0.1 for next assessment".to_string(),
            String::new(),
            "## Approval Required".to_string(),
            String::new(),
            "- [ ] Approve as proposed".to_string(),
            "- [ ] Approve with modifications: _______________".to_string(),
            "- [ ] Reject and explain: _______________".to_string(),
            "- [ ] Defer decision to later".to_string(),
            String::new(),
            "---".to_string(),
            String::new(),
            format!("*Generated by world-fates skill on {}*", self.date),
        ]);

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ProposalRequest {
        ProposalRequest::new("Lord Varen", "fall", ShiftSeverity::Major, "2026-05-01")
    }

    #[test]
    fn lesser_severity_steps_down() {
        assert_eq!(lesser_severity(ShiftSeverity::Catastrophic), "major");
        assert_eq!(lesser_severity(ShiftSeverity::Moderate), "minor");
        assert_eq!(lesser_severity(ShiftSeverity::Minor), "warning sign");
    }

    #[test]
    fn alternative_types_by_category() {
        assert_eq!(alternative_type("death", ShiftCategory::Character), "fall");
        assert_eq!(alternative_type("decline", ShiftCategory::Faction), "defeat");
        assert_eq!(alternative_type("decline", ShiftCategory::Location), "isolation");
        assert_eq!(alternative_type("death", ShiftCategory::Faction), "different fate");
        for category in [
            ShiftCategory::Character,
            ShiftCategory::Faction,
            ShiftCategory::Location,
        ] {
            for t in category.shift_types() {
                assert_ne!(alternative_type(t, category), "different fate");
            }
        }
    }

    #[test]
    fn generic_template_text() {
        let t = ShiftTypeTemplate::generic("exile", ShiftCategory::Character);
        assert_eq!(t.description, "A exile affecting character");
        assert_eq!(t.severity_text(ShiftSeverity::Major), "Major consequences");
        assert_eq!(t.narrative_hooks.len(), 1);
    }

    #[test]
    fn shift_types_parse_camel_case() {
        let types: ShiftTypes = serde_json::from_str(
            r#"{"character":{"fall":{"description":"Loss of status","severities":{"major":"Stripped of title"},"eligibility":{"minPressure":0.5},"narrativeHooks":["A rival strikes"]}}}"#,
        )
        .unwrap();
        let fall = types.get(ShiftCategory::Character, "fall").unwrap();
        assert_eq!(fall.narrative_hooks, vec!["A rival strikes"]);
        assert_eq!(fall.eligibility.as_ref().unwrap().min_pressure, Some(0.5));
        assert!(types.get(ShiftCategory::Faction, "fall").is_none());
        let generic = ShiftTypes::template_or_generic(Some(&types), ShiftCategory::Faction, "fall");
        assert_eq!(generic.description, "A fall affecting faction");
    }

    #[test]
    fn manual_proposal_sections() {
        let template = ShiftTypeTemplate::generic("fall", ShiftCategory::Character);
        let text = request().render(&template, &mut Lcg::new(1));
        assert!(text.starts_with("# Fate-Shift Proposal: Lord Varen\n"));
        assert!(text.contains("**Fate Pressure at Assessment:** 65.0%"));
        assert!(text.contains("- **Roll:** [Not recorded - manual proposal]"));
        assert!(text.contains("- **Threshold:** 65 (based on pressure)"));
        assert!(text.contains("Lord Varen experiences a major fall."));
        assert!(text.contains("Vulnerabilities should be documented"));
        assert!(text.ends_with("*Generated by world-fates skill on 2026-05-01*"));
    }

    #[test]
    fn alternatives_snapshot() {
        let template = ShiftTypeTemplate::generic("fall", ShiftCategory::Character);
        let text = request().render(&template, &mut Lcg::new(1));
        let start = text.find("## Alternative Options").unwrap();
        let end = text.find("## Approval Required").unwrap();
        insta::assert_snapshot!(text[start..end].trim_end(), @r"
        ## Alternative Options

        1. Reduce severity to moderate with slower progression
        2. Change type to diminishment with equivalent severity
        3. Defer decision and increase pressure by 0.1 for next assessment
        ");
    }

    #[test]
    fn recorded_roll_and_vulnerabilities() {
        let mut req = request();
        req.category = ShiftCategory::Faction;
        req.roll = Some(15);
        req.pressure = 0.82;
        req.vulnerabilities = vec!["Secret heir".into(), "Debt".into()];
        let template = ShiftTypeTemplate {
            description: "Loss of status".into(),
            severities: BTreeMap::from([("major".into(), "Stripped of title".into())]),
            eligibility: None,
            narrative_hooks: vec!["A rival strikes".into()],
        };
        let text = req.render(&template, &mut Lcg::new(1));
        assert!(text.contains("- **Roll:** 15\n- **Threshold:** 82\n"));
        assert!(text.contains("- Secret heir\n- Debt"));
        assert!(text.contains("A rival strikes"));
        assert!(text.contains("- **For Lord Varen:** Stripped of title"));
        assert!(text.contains("Lord Varen's fall creates opportunities"));
    }

    #[test]
    fn category_parsing() {
        assert_eq!("Faction".parse::<ShiftCategory>().unwrap(), ShiftCategory::Faction);
        assert!("planet".parse::<ShiftCategory>().is_err());
    }
}
