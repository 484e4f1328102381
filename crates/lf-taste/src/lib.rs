//! Taste audit for Loreforge.
//!
//! Content is scored against a rubric of weighted dimensions. Each dimension
//! lists positive and negative indicator phrases; an [`IndicatorMatcher`]
//! decides which ones a text exhibits, and the counts map to a 0-5 score.

/// Scoring and the audit result.
pub mod audit;
/// The rubric file model.
pub mod dimension;
/// Indicator matching strategies.
pub mod matcher;

/// Re-export audit types.
pub use audit::{AuditResult, Confidence, DimensionScore, audit, overall_score, score_dimension};
/// Re-export rubric types.
pub use dimension::{Dimension, Rubric, Scoring};
/// Re-export matchers.
pub use matcher::{FuzzyTermMatcher, IndicatorMatcher};
