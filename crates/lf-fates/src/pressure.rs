//! The fate-pressure formula.
//!
//! ```text
//! pressure = (power * tenure_modifier * vulnerability / 10)
//!          / (protection * max(fortune, 0.5))
//!          + risk_exposure
//! ```
//!
//! clamped to `[0, 1]` and mapped onto five fate states. How a free-text
//! vulnerability or protection is weighted is a [`RiskHeuristic`]; the
//! default is a keyword table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::exposure::{ExposureLogEntry, risk_exposure};

/// Lowest power level.
pub const MIN_POWER: u32 = 1;
/// Highest power level.
pub const MAX_POWER: u32 = 10;
/// Highest fortune buffer.
pub const MAX_FORTUNE: f64 = 5.0;
/// Cap on the summed vulnerability score and on the protection factor.
pub const SCORE_CAP: f64 = 10.0;

/// Weights free-text vulnerabilities and protections.
pub trait RiskHeuristic {
    /// Weight of one vulnerability.
    fn vulnerability_weight(&self, vulnerability: &str) -> f64;
    /// Weight of one protection.
    fn protection_weight(&self, protection: &str) -> f64;
}

/// A group of keywords sharing one weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordRule {
    /// Lowercase substrings; any one matches.
    pub keywords: &'static [&'static str],
    /// Weight when matched.
    pub weight: f64,
}

/// Keyword groups for vulnerabilities, first match wins.
pub const VULNERABILITY_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["secret", "hidden"],
        weight: 3.0,
    },
    KeywordRule {
        keywords: &["flaw", "weakness", "addiction"],
        weight: 2.0,
    },
    KeywordRule {
        keywords: &["conflict", "war", "feud"],
        weight: 1.5,
    },
    KeywordRule {
        keywords: &["enemy", "rival", "opponent"],
        weight: 1.0,
    },
    KeywordRule {
        keywords: &["depends", "relies", "needs"],
        weight: 1.0,
    },
];

/// Keyword groups for protections, first match wins.
pub const PROTECTION_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["divine", "god", "blessed"],
        weight: 3.0,
    },
    KeywordRule {
        keywords: &["magical", "enchant", "ward"],
        weight: 3.0,
    },
    KeywordRule {
        keywords: &["fortif", "stronghold", "castle"],
        weight: 2.0,
    },
    KeywordRule {
        keywords: &["popular", "beloved", "supported"],
        weight: 2.0,
    },
    KeywordRule {
        keywords: &["ally", "loyal", "friend"],
        weight: 1.0,
    },
    KeywordRule {
        keywords: &["network", "spies", "intelligence"],
        weight: 1.0,
    },
];

/// The default keyword-table heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordHeuristic {
    /// Vulnerability groups, in matching order.
    pub vulnerability_rules: &'static [KeywordRule],
    /// Weight of a vulnerability no group matches.
    pub vulnerability_default: f64,
    /// Protection groups, in matching order.
    pub protection_rules: &'static [KeywordRule],
    /// Weight of a protection no group matches.
    pub protection_default: f64,
}

impl Default for KeywordHeuristic {
    fn default() -> Self {
        Self {
            vulnerability_rules: VULNERABILITY_RULES,
            vulnerability_default: 1.0,
            protection_rules: PROTECTION_RULES,
            protection_default: 0.5,
        }
    }
}

fn weigh(rules: &[KeywordRule], default: f64, item: &str) -> f64 {
    let lower = item.to_lowercase();
    rules
        .iter()
        .find(|r| r.keywords.iter().any(|k| lower.contains(k)))
        .map_or(default, |r| r.weight)
}

impl RiskHeuristic for KeywordHeuristic {
    fn vulnerability_weight(&self, vulnerability: &str) -> f64 {
        weigh(self.vulnerability_rules, self.vulnerability_default, vulnerability)
    }

    fn protection_weight(&self, protection: &str) -> f64 {
        weigh(self.protection_rules, self.protection_default, protection)
    }
}

/// Tenure multiplier for years in power.
pub fn tenure_modifier(years: f64) -> f64 {
    if years < 1.0 {
        0.5
    } else if years <= 5.0 {
        1.0
    } else if years <= 20.0 {
        1.5
    } else if years <= 50.0 {
        2.0
    } else {
        2.5
    }
}

/// Summed vulnerability weights, capped at 10.
pub fn vulnerability_score(items: &[String], heuristic: &dyn RiskHeuristic) -> f64 {
    items
        .iter()
        .map(|v| heuristic.vulnerability_weight(v))
        .sum::<f64>()
        .min(SCORE_CAP)
}

/// One plus the summed protection weights, capped at 10.
pub fn protection_factor(items: &[String], heuristic: &dyn RiskHeuristic) -> f64 {
    (1.0 + items
        .iter()
        .map(|p| heuristic.protection_weight(p))
        .sum::<f64>())
    .min(SCORE_CAP)
}

/// Placeholder vulnerabilities when only a count is known.
pub fn synthetic_vulnerabilities(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("vulnerability_{i}")).collect()
}

/// Placeholder protections when only a count is known.
pub fn synthetic_protections(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("protection_{i}")).collect()
}

/// Everything the formula needs about one entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FatePressureInput {
    /// Power level, 1-10.
    pub power_level: u32,
    /// Years in the current position.
    pub tenure_years: f64,
    /// Vulnerability descriptions.
    pub vulnerabilities: Vec<String>,
    /// Protection descriptions.
    pub protections: Vec<String>,
    /// Fortune buffer, 0-5.
    pub fortune_buffer: f64,
    /// Exposure events so far.
    pub exposure_log: Vec<ExposureLogEntry>,
}

/// The five fate states, in ascending pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FateState {
    /// Pressure below 20%.
    F1,
    /// Pressure below 35%.
    F2,
    /// Pressure below 60%.
    F3,
    /// Pressure below 85%.
    F4,
    /// Pressure 85% and above.
    F5,
}

impl FateState {
    /// The state for a clamped pressure.
    pub fn from_pressure(pressure: f64) -> Self {
        if pressure < 0.20 {
            Self::F1
        } else if pressure < 0.35 {
            Self::F2
        } else if pressure < 0.60 {
            Self::F3
        } else if pressure < 0.85 {
            Self::F4
        } else {
            Self::F5
        }
    }

    /// Short label.
    pub fn label(self) -> &'static str {
        match self {
            Self::F1 => "Stable Ascent",
            Self::F2 => "Peak Power",
            Self::F3 => "Overextension",
            Self::F4 => "Precarious Position",
            Self::F5 => "Fall in Progress",
        }
    }

    /// What the state means for the story.
    pub fn interpretation(self) -> &'static str {
        match self {
            Self::F1 => {
                "This entity is relatively stable. Monitor for changes but no immediate action needed."
            }
            Self::F2 => {
                "At peak influence. Consider surfacing hidden vulnerabilities or introducing rivals."
            }
            Self::F3 => {
                "High pressure. Fate-shift likely if pressure continues. Consider Tier 2 choices."
            }
            Self::F4 => {
                "Critical pressure. Fate-offered choices should be generated. Death rolls possible."
            }
            Self::F5 => {
                "Terminal pressure. Focus on managing the transition and documenting the fall."
            }
        }
    }

    /// Suggested next actions.
    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            Self::F1 | Self::F2 => &[
                "Log exposure events as they occur",
                "Re-assess after significant events",
            ],
            Self::F3 => &[
                "Consider fate-choice for dramatic moments",
                "Track vulnerabilities carefully",
                "Fate-shifts at Moderate or Minor severity possible",
            ],
            Self::F4 => &[
                "Run fate-choice to generate a Tier 2 choice",
                "Death/fall rolls active if in danger",
                "Consider voluntary NPC transition option",
            ],
            Self::F5 => &[
                "Fall is in progress or imminent",
                "Run propose-shift to document the end",
                "Focus on managing consequences for world",
            ],
        }
    }
}

impl fmt::Display for FateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// The intermediate values of the formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PressureComponents {
    /// Clamped power level.
    pub power_level: u32,
    /// Tenure multiplier.
    pub tenure_modifier: f64,
    /// Capped vulnerability score.
    pub vulnerability_score: f64,
    /// Capped protection factor.
    pub protection_factor: f64,
    /// Clamped fortune buffer.
    pub fortune_buffer: f64,
    /// Summed exposure.
    pub risk_exposure: f64,
}

/// Result of a pressure calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FatePressureReport {
    /// Formula inputs after weighting and clamping.
    pub components: PressureComponents,
    /// Pressure in `[0, 1]`.
    pub fate_pressure: f64,
    /// Fate state code.
    pub state: FateState,
    /// Fate state label.
    pub state_description: String,
    /// What the state means.
    pub interpretation: String,
    /// Suggested next actions.
    pub recommendations: Vec<String>,
}

/// Compute the fate pressure of `input`.
///
/// Power is clamped to 1-10 and fortune to 0-5 before use.
pub fn calculate_pressure(
    input: &FatePressureInput,
    heuristic: &dyn RiskHeuristic,
) -> FatePressureReport {
    let power_level = input.power_level.clamp(MIN_POWER, MAX_POWER);
    let fortune_buffer = input.fortune_buffer.clamp(0.0, MAX_FORTUNE);
    let components = PressureComponents {
        power_level,
        tenure_modifier: tenure_modifier(input.tenure_years),
        vulnerability_score: vulnerability_score(&input.vulnerabilities, heuristic),
        protection_factor: protection_factor(&input.protections, heuristic),
        fortune_buffer,
        risk_exposure: risk_exposure(&input.exposure_log),
    };

    let numerator = f64::from(power_level)
        * components.tenure_modifier
        * (components.vulnerability_score / SCORE_CAP);
    let denominator = components.protection_factor * fortune_buffer.max(0.5);
    let fate_pressure = (numerator / denominator + components.risk_exposure).clamp(0.0, 1.0);
    let state = FateState::from_pressure(fate_pressure);

    tracing::debug!(numerator, denominator, fate_pressure, %state, "fate pressure");

    FatePressureReport {
        components,
        fate_pressure,
        state,
        state_description: state.label().to_string(),
        interpretation: state.interpretation().to_string(),
        recommendations: state
            .recommendations()
            .iter()
            .map(|r| r.to_string())
            .collect(),
    }
}
