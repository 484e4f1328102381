//! World fates for Loreforge.
//!
//! Powerful entities accumulate "fate pressure" from their power, tenure,
//! vulnerabilities, and risky events, offset by protections and fortune. The
//! pressure drives a percentile fate roll, dramatic choices offered at high
//! pressure, and Markdown proposals for the shift that follows. Every random
//! draw goes through [`lf_core::Lcg`], so a seed reproduces a whole session.

/// Dramatic choices offered to entities under high pressure.
pub mod choice;
/// Exposure events and their pressure increments.
pub mod exposure;
/// The fate-pressure formula and the five fate states.
pub mod pressure;
/// Fate-shift proposals rendered as Markdown.
pub mod proposal;
/// The percentile fate roll and the death sub-roll.
pub mod roll;

/// Re-export choice types.
pub use choice::{ChoicePath, ChoicePattern, FateChoice, FateChoiceData, death_odds};
/// Re-export exposure types.
pub use exposure::{ExposureCategory, ExposureEvent, ExposureLogEntry, categorize};
/// Re-export pressure types.
pub use pressure::{
    FatePressureInput, FatePressureReport, FateState, KeywordHeuristic, RiskHeuristic,
    calculate_pressure,
};
/// Re-export proposal types.
pub use proposal::{ProposalRequest, ShiftCategory, ShiftTypeTemplate, ShiftTypes};
/// Re-export roll types.
pub use roll::{FateRoll, ShiftSeverity, roll_fate};
