//! The taste rubric: weighted dimensions with indicator phrases.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use lf_core::{DataDir, LfResult, read_json};

/// Path of the rubric inside the data directory.
pub const DIMENSIONS_FILE: &str = "taste/dimensions.json";

/// One axis of the rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// What the dimension measures.
    #[serde(default)]
    pub description: String,
    /// What good content looks like.
    #[serde(default)]
    pub positive_pole: String,
    /// What bad content looks like.
    #[serde(default)]
    pub negative_pole: String,
    /// Relative weight in the overall score.
    pub weight: f64,
    /// Questions a human reviewer asks; not used in scoring.
    #[serde(default)]
    pub check_questions: Vec<String>,
    /// Phrases that indicate the positive pole.
    #[serde(default)]
    pub positive_indicators: Vec<String>,
    /// Phrases that indicate the negative pole.
    #[serde(default)]
    pub negative_indicators: Vec<String>,
}

impl Dimension {
    /// Number of indicator phrases on both sides.
    pub fn total_indicators(&self) -> usize {
        self.positive_indicators.len() + self.negative_indicators.len()
    }
}

/// Scoring notes carried by the rubric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scoring {
    /// Meaning of each score value.
    #[serde(default)]
    pub scale: BTreeMap<String, String>,
    /// Free-form description of the calculation.
    #[serde(default)]
    pub calculation: Option<serde_json::Value>,
    /// Interpretation text keyed by band (`4.0+`, `3.0-3.9`, `2.0-2.9`, `below_2.0`).
    #[serde(default)]
    pub interpretation: BTreeMap<String, String>,
}

/// A full rubric file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rubric {
    /// Dimensions in scoring order.
    pub dimensions: Vec<Dimension>,
    /// Scoring notes.
    #[serde(default)]
    pub scoring: Scoring,
}

impl Rubric {
    /// Load a rubric that must exist.
    pub fn load(path: &Path) -> LfResult<Self> {
        let rubric: Self = read_json(path)?;
        tracing::debug!(path = %path.display(), dimensions = rubric.dimensions.len(), "rubric loaded");
        Ok(rubric)
    }

    /// Load the rubric shipped in the data directory.
    pub fn from_data_dir(data: &DataDir) -> LfResult<Self> {
        Self::load(&data.join(DIMENSIONS_FILE))
    }

    /// The dimension with `id`.
    pub fn dimension(&self, id: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lf_core::LfError;
    use tempfile::TempDir;

    const RUBRIC: &str = r#"{
        "dimensions": [{
            "id": "competence",
            "name": "Competence",
            "description": "Characters solve problems methodically",
            "positive_pole": "Methodical problem-solving",
            "negative_pole": "Luck and coincidence",
            "weight": 1.5,
            "check_questions": ["Do characters earn their wins?"],
            "positive_indicators": ["methodical investigation"],
            "negative_indicators": ["lucky coincidence", "sudden inspiration"]
        }],
        "scoring": {
            "scale": {"5": "Exemplary"},
            "interpretation": {"4.0+": "Ship it"}
        }
    }"#;

    #[test]
    fn parses_snake_case_rubric() {
        let rubric: Rubric = serde_json::from_str(RUBRIC).unwrap();
        let dim = rubric.dimension("competence").unwrap();
        assert_eq!(dim.weight, 1.5);
        assert_eq!(dim.total_indicators(), 3);
        assert_eq!(rubric.scoring.interpretation["4.0+"], "Ship it");
        assert!(rubric.dimension("voice").is_none());
    }

    #[test]
    fn missing_rubric_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = Rubric::load(&dir.path().join("dimensions.json")).unwrap_err();
        assert!(matches!(err, LfError::NotFound(_)));
    }

    #[test]
    fn loads_from_data_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("taste")).unwrap();
        std::fs::write(dir.path().join(DIMENSIONS_FILE), RUBRIC).unwrap();
        let rubric = Rubric::from_data_dir(&DataDir::new(dir.path())).unwrap();
        assert_eq!(rubric.dimensions.len(), 1);
    }
}
