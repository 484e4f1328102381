//! Scoring content against a rubric.
//!
//! Each dimension gets a 0-5 score from how many of its positive and negative
//! indicators the text exhibits. A score of 0 means the dimension is absent
//! and does not count toward the weighted overall score.

use std::fmt;

use serde::Serialize;

use crate::dimension::{Dimension, Rubric};
use crate::matcher::IndicatorMatcher;

/// Overall scores below this fail the audit.
pub const PASS_THRESHOLD: f64 = 2.0;
/// Dimensions at or below this score get a recommendation.
pub const LOW_SCORE: u8 = 2;
/// Highest possible score.
pub const MAX_SCORE: u8 = 5;

const LOW_CONFIDENCE_NOTE: &str =
    "Note: Some dimensions had low confidence scores due to limited indicator matches.";

/// How much of a dimension's indicator set the text touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// At least 30% of indicators matched.
    High,
    /// At least 10% matched.
    Medium,
    /// Fewer.
    Low,
}

impl Confidence {
    /// Confidence for `matched` of `total` indicators. No indicators is low.
    pub fn from_ratio(matched: usize, total: usize) -> Self {
        if total == 0 {
            return Self::Low;
        }
        let ratio = matched as f64 / total as f64;
        if ratio >= 0.3 {
            Self::High
        } else if ratio >= 0.1 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// One-character marker for terminal output.
    pub fn marker(self) -> char {
        match self {
            Self::High => '✓',
            Self::Medium => '~',
            Self::Low => '?',
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        })
    }
}

/// Score for a dimension given its positive and negative match counts.
pub fn score_counts(positive: usize, negative: usize) -> u8 {
    match (positive, negative) {
        (0, 0) => 0,
        (p, 0) => {
            if p >= 2 {
                5
            } else {
                4
            }
        }
        (0, n) => {
            if n >= 2 {
                1
            } else {
                2
            }
        }
        (p, n) => {
            let ratio = p as f64 / (p + n) as f64;
            if ratio >= 0.75 {
                4
            } else if ratio >= 0.5 {
                3
            } else if ratio >= 0.25 {
                2
            } else {
                1
            }
        }
    }
}

/// The result for one dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScore {
    /// Dimension id.
    pub id: String,
    /// Dimension name.
    pub name: String,
    /// 0 (absent) to 5.
    pub score: u8,
    /// Dimension weight.
    pub weight: f64,
    /// `score * weight`.
    pub weighted_score: f64,
    /// Positive indicators found.
    pub positive_matches: Vec<String>,
    /// Negative indicators found.
    pub negative_matches: Vec<String>,
    /// How much of the indicator set matched.
    pub confidence: Confidence,
}

impl DimensionScore {
    /// Whether the dimension appeared in the text at all.
    pub fn is_present(&self) -> bool {
        self.score > 0
    }
}

/// Score `text` on one dimension.
pub fn score_dimension(
    text: &str,
    dimension: &Dimension,
    matcher: &dyn IndicatorMatcher,
) -> DimensionScore {
    let positive: Vec<String> = matcher
        .matches(text, &dimension.positive_indicators)
        .into_iter()
        .map(str::to_string)
        .collect();
    let negative: Vec<String> = matcher
        .matches(text, &dimension.negative_indicators)
        .into_iter()
        .map(str::to_string)
        .collect();

    let score = score_counts(positive.len(), negative.len());
    let confidence =
        Confidence::from_ratio(positive.len() + negative.len(), dimension.total_indicators());
    tracing::debug!(
        dimension = %dimension.id,
        positive = positive.len(),
        negative = negative.len(),
        score,
        "dimension scored"
    );

    DimensionScore {
        id: dimension.id.clone(),
        name: dimension.name.clone(),
        score,
        weight: dimension.weight,
        weighted_score: f64::from(score) * dimension.weight,
        positive_matches: positive,
        negative_matches: negative,
        confidence,
    }
}

/// Weighted mean of the present dimensions; 0 when none is present.
pub fn overall_score(scores: &[DimensionScore]) -> f64 {
    let (sum, weight) = scores
        .iter()
        .filter(|s| s.is_present())
        .fold((0.0, 0.0), |(sum, weight), s| {
            (sum + s.weighted_score, weight + s.weight)
        });
    if weight > 0.0 { sum / weight } else { 0.0 }
}

/// Interpretation text for an overall score.
pub fn interpret(score: f64, rubric: &Rubric) -> String {
    let (key, fallback) = if score >= 4.0 {
        ("4.0+", "Strong alignment")
    } else if score >= 3.0 {
        ("3.0-3.9", "Adequate alignment")
    } else if score >= 2.0 {
        ("2.0-2.9", "Significant misalignment")
    } else {
        ("below_2.0", "Major revision needed")
    };
    rubric
        .scoring
        .interpretation
        .get(key)
        .filter(|text| !text.is_empty())
        .map_or_else(|| fallback.to_string(), Clone::clone)
}

/// Advice for present dimensions that scored low.
///
/// When nothing scored low, a single note is returned if any present
/// dimension had low confidence.
pub fn recommendations(scores: &[DimensionScore], rubric: &Rubric) -> Vec<String> {
    let mut lines = Vec::new();
    for score in scores.iter().filter(|s| s.is_present() && s.score <= LOW_SCORE) {
        let Some(dimension) = rubric.dimension(&score.id) else {
            continue;
        };
        lines.push(format!(
            "[{}] Low score ({}/{MAX_SCORE}): {}",
            dimension.name, score.score, dimension.description
        ));
        lines.push(format!("  -> Aim for: {}", dimension.positive_pole));
        if !score.negative_matches.is_empty() {
            let issues: Vec<&str> = score
                .negative_matches
                .iter()
                .take(2)
                .map(String::as_str)
                .collect();
            lines.push(format!("  -> Found issues: {}", issues.join("; ")));
        }
    }

    if lines.is_empty()
        && scores
            .iter()
            .any(|s| s.is_present() && s.confidence == Confidence::Low)
    {
        lines.push(LOW_CONFIDENCE_NOTE.to_string());
    }
    lines
}

/// A complete audit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    /// The audited file, when the text came from one.
    pub file: Option<String>,
    /// Weighted mean of present dimensions.
    pub overall_score: f64,
    /// Interpretation of the overall score.
    pub interpretation: String,
    /// Per-dimension results in rubric order.
    pub dimensions: Vec<DimensionScore>,
    /// Advice for low-scoring dimensions.
    pub recommendations: Vec<String>,
}

impl AuditResult {
    /// Whether the content clears [`PASS_THRESHOLD`].
    pub fn passed(&self) -> bool {
        self.overall_score >= PASS_THRESHOLD
    }
}

/// Audit `text` against every dimension of `rubric`.
pub fn audit(
    text: &str,
    file: Option<String>,
    rubric: &Rubric,
    matcher: &dyn IndicatorMatcher,
) -> AuditResult {
    let dimensions: Vec<DimensionScore> = rubric
        .dimensions
        .iter()
        .map(|d| score_dimension(text, d, matcher))
        .collect();
    let overall = overall_score(&dimensions);
    tracing::info!(overall, dimensions = dimensions.len(), "audit complete");
    AuditResult {
        file,
        overall_score: overall,
        interpretation: interpret(overall, rubric),
        recommendations: recommendations(&dimensions, rubric),
        dimensions,
    }
}
