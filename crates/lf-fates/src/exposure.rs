//! Exposure events: risky moments that add to an entity's fate pressure.
//!
//! An event description is sorted into the first category whose keywords it
//! mentions. The category's base increment can be overridden, and the result
//! is always clamped to [`MIN_INCREMENT`, `MAX_INCREMENT`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use lf_core::{LfResult, load_json, read_json, write_json_pretty};

/// Smallest pressure increment one event can add.
pub const MIN_INCREMENT: f64 = 0.01;
/// Largest pressure increment one event can add.
pub const MAX_INCREMENT: f64 = 0.30;

/// One entry of an entity's risk exposure log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureLogEntry {
    /// Date of the event, `YYYY-MM-DD`.
    pub date: String,
    /// What happened.
    pub event: String,
    /// Pressure added by the event.
    pub pressure: f64,
}

/// A kind of risky event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureCategory {
    /// Category name, e.g. `narrow_escape`.
    pub name: &'static str,
    /// Default pressure increment.
    pub base: f64,
    /// Human-readable description.
    pub description: &'static str,
    /// Lowercase substrings that place an event in this category.
    pub keywords: &'static [&'static str],
}

/// The categories, in matching order.
pub const DEFAULT_CATEGORIES: &[ExposureCategory] = &[
    ExposureCategory {
        name: "combat",
        base: 0.10,
        description: "Active combat, violence, or physical danger",
        keywords: &[
            "combat",
            "battle",
            "fight",
            "wound",
            "attack",
            "assassination",
            "duel",
        ],
    },
    ExposureCategory {
        name: "intrigue",
        base: 0.05,
        description: "Political maneuvering, subtle threats",
        keywords: &["intrigue", "politics", "scheme", "plot", "manipulat", "negotiat"],
    },
    ExposureCategory {
        name: "betrayal",
        base: 0.15,
        description: "Trust violated, ally turns against",
        keywords: &["betray", "turned", "abandon", "traitor", "double-cross"],
    },
    ExposureCategory {
        name: "revelation",
        base: 0.20,
        description: "Secret exposed, truth revealed",
        keywords: &["secret", "reveal", "exposed", "discover", "truth", "uncover"],
    },
    ExposureCategory {
        name: "overreach",
        base: 0.10,
        description: "Hubris, overconfident action",
        keywords: &["hubris", "overconfident", "reckless", "arrogant", "foolish"],
    },
    ExposureCategory {
        name: "loss",
        base: 0.08,
        description: "Resource, ally, or territory lost",
        keywords: &["lost", "death of", "defeat", "lose", "fallen"],
    },
    ExposureCategory {
        name: "challenge",
        base: 0.12,
        description: "Direct challenge to power or status",
        keywords: &["challenge", "rival", "contest", "dispute", "claim"],
    },
    ExposureCategory {
        name: "narrow_escape",
        base: 0.05,
        description: "Survived dangerous situation",
        keywords: &["narrow", "escape", "surviv", "barely", "close call"],
    },
];

const FALLBACK_CATEGORY: &str = "intrigue";

/// The first category in `categories` with a keyword in `event`.
///
/// Unmatched events fall back to `intrigue`, or to the first category when
/// the table has no `intrigue`. Returns `None` only for an empty table.
pub fn categorize<'a>(categories: &'a [ExposureCategory], event: &str) -> Option<&'a ExposureCategory> {
    let lower = event.to_lowercase();
    categories
        .iter()
        .find(|c| c.keywords.iter().any(|k| lower.contains(k)))
        .or_else(|| categories.iter().find(|c| c.name == FALLBACK_CATEGORY))
        .or_else(|| categories.first())
}

/// Clamp an increment to the allowed range.
pub fn clamp_increment(pressure: f64) -> f64 {
    pressure.clamp(MIN_INCREMENT, MAX_INCREMENT)
}

/// A categorised exposure event, ready to print or append to a log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureEvent {
    /// Date logged.
    pub date: String,
    /// Entity the event happened to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// What happened.
    pub event: String,
    /// Matched category name.
    pub category: String,
    /// Clamped pressure increment.
    pub pressure: f64,
    /// Description of the matched category.
    pub category_description: String,
}

impl ExposureEvent {
    /// Categorise `event` and settle its increment.
    ///
    /// `override_pressure` replaces the category's base before clamping.
    pub fn new(
        categories: &[ExposureCategory],
        event: &str,
        override_pressure: Option<f64>,
        entity: Option<String>,
        date: &str,
    ) -> Self {
        let category = categorize(categories, event);
        let base = category.map_or(MIN_INCREMENT, |c| c.base);
        let pressure = clamp_increment(override_pressure.unwrap_or(base));
        tracing::debug!(
            event,
            category = category.map_or("", |c| c.name),
            pressure,
            "exposure categorised"
        );
        Self {
            date: date.to_string(),
            entity,
            event: event.to_string(),
            category: category.map_or(FALLBACK_CATEGORY, |c| c.name).to_string(),
            pressure,
            category_description: category.map_or("", |c| c.description).to_string(),
        }
    }

    /// The log entry for this event.
    pub fn to_entry(&self) -> ExposureLogEntry {
        ExposureLogEntry {
            date: self.date.clone(),
            event: self.event.clone(),
            pressure: self.pressure,
        }
    }
}

/// Total pressure of a log.
pub fn risk_exposure(log: &[ExposureLogEntry]) -> f64 {
    log.iter().map(|e| e.pressure).sum()
}

/// Read an exposure log: a JSON array of entries.
pub fn load_exposure_log(path: &Path) -> LfResult<Vec<ExposureLogEntry>> {
    read_json(path)
}

/// Append `entry` to the log at `path`, creating the file when missing.
pub fn append_exposure(path: &Path, entry: ExposureLogEntry) -> LfResult<Vec<ExposureLogEntry>> {
    let mut log: Vec<ExposureLogEntry> = load_json(path)?.unwrap_or_default();
    log.push(entry);
    write_json_pretty(path, &log)?;
    tracing::info!(path = %path.display(), entries = log.len(), "exposure appended");
    Ok(log)
}
