//! The fate roll: a percentile die against the pressure threshold.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use lf_core::{Lcg, LfError};

/// How hard a fate-shift lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftSeverity {
    /// A warning: reputation damage, small loss.
    Minor,
    /// A setback: resource lost, vulnerability exposed.
    Moderate,
    /// A significant loss that is hard to recover from.
    Major,
    /// Total loss, no return.
    Catastrophic,
}

impl ShiftSeverity {
    /// All severities, mildest first.
    pub const ALL: [ShiftSeverity; 4] = [
        ShiftSeverity::Minor,
        ShiftSeverity::Moderate,
        ShiftSeverity::Major,
        ShiftSeverity::Catastrophic,
    ];

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Moderate => "moderate",
            Self::Major => "major",
            Self::Catastrophic => "catastrophic",
        }
    }

    /// The next milder severity, if any.
    pub fn lesser(self) -> Option<Self> {
        match self {
            Self::Minor => None,
            Self::Moderate => Some(Self::Minor),
            Self::Major => Some(Self::Moderate),
            Self::Catastrophic => Some(Self::Major),
        }
    }

    /// Two lines of narrative guidance for a shift of this severity.
    pub fn guidance(self) -> [&'static str; 2] {
        match self {
            Self::Catastrophic => [
                "The wheel turns heavily. A catastrophic fate-shift is warranted.",
                "Consider: death, complete fall, total collapse, destruction.",
            ],
            Self::Major => [
                "A major turn of the wheel. Significant consequences follow.",
                "Consider: serious wound, major loss, significant decline, defeat.",
            ],
            Self::Moderate => [
                "The wheel moves. A moderate setback occurs.",
                "Consider: vulnerability exposed, resource lost, ally turns.",
            ],
            Self::Minor => [
                "A warning from fate. Minor consequences manifest.",
                "Consider: reputation damage, small loss, omen of worse to come.",
            ],
        }
    }
}

impl fmt::Display for ShiftSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftSeverity {
    type Err = LfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sev| sev.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                LfError::InvalidArgument(format!(
                    "severity must be minor, moderate, major, or catastrophic, got '{s}'"
                ))
            })
    }
}

/// Outcome of one fate roll.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FateRoll {
    /// The d100 result.
    pub roll: u32,
    /// `pressure * 100`.
    pub threshold: f64,
    /// Whether `roll < threshold`.
    pub shift_triggered: bool,
    /// Severity of the shift; `none` when nothing triggered.
    #[serde(serialize_with = "severity_or_none")]
    pub severity: Option<ShiftSeverity>,
    /// In danger, pressure above 50%, fortune below 1.
    pub death_eligible: bool,
    /// The uniform death draw.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_roll: Option<f64>,
    /// Death happens below this value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_threshold: Option<f64>,
    /// Whether the entity dies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death_occurs: Option<bool>,
    /// Set when death was narrowly avoided; the fortune buffer should drop by 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fortune_decrement: Option<bool>,
}

fn severity_or_none<S: Serializer>(
    severity: &Option<ShiftSeverity>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(severity.map_or("none", ShiftSeverity::as_str))
}

/// Whether a death sub-roll applies.
pub fn death_eligible(pressure: f64, in_danger: bool, fortune: f64) -> bool {
    in_danger && pressure > 0.5 && fortune < 1.0
}

/// `(pressure - 0.5) * 2 * (1 - fortune / 5)`.
pub fn death_threshold(pressure: f64, fortune: f64) -> f64 {
    (pressure - 0.5) * 2.0 * (1.0 - fortune / 5.0)
}

/// Severity for a triggered roll, by where it falls under the threshold.
pub fn severity_for(roll: u32, threshold: f64) -> ShiftSeverity {
    let roll = f64::from(roll);
    if roll < threshold * 0.25 {
        ShiftSeverity::Catastrophic
    } else if roll < threshold * 0.50 {
        ShiftSeverity::Major
    } else if roll < threshold * 0.75 {
        ShiftSeverity::Moderate
    } else {
        ShiftSeverity::Minor
    }
}

/// Roll against `pressure`.
///
/// One d100 is drawn. A second uniform draw happens only when the shift
/// triggered and the entity is eligible for death.
pub fn roll_fate(pressure: f64, in_danger: bool, fortune: f64, rng: &mut Lcg) -> FateRoll {
    let roll = rng.d100();
    let threshold = pressure * 100.0;
    let shift_triggered = f64::from(roll) < threshold;
    let severity = shift_triggered.then(|| severity_for(roll, threshold));
    let eligible = death_eligible(pressure, in_danger, fortune);

    let mut result = FateRoll {
        roll,
        threshold,
        shift_triggered,
        severity,
        death_eligible: eligible,
        death_roll: None,
        death_threshold: None,
        death_occurs: None,
        fortune_decrement: None,
    };

    if eligible && shift_triggered {
        let draw = rng.next_f64();
        let limit = death_threshold(pressure, fortune);
        let dies = draw < limit;
        result.death_roll = Some(draw);
        result.death_threshold = Some(limit);
        result.death_occurs = Some(dies);
        result.fortune_decrement = (!dies).then_some(true);
    }

    tracing::debug!(roll, threshold, shift_triggered, eligible, "fate roll");
    result
}
