//! Indicator matching strategies.

/// Minimum length, exclusive, of an indicator word that takes part in matching.
pub const MIN_TERM_LEN: usize = 4;
/// Share of an indicator's terms that must appear in the text.
pub const TERM_SHARE: f64 = 0.6;

/// Decides which indicator phrases a text exhibits.
pub trait IndicatorMatcher {
    /// Whether `indicator` is present in `lowered`, the lowercased text.
    fn is_match(&self, lowered: &str, indicator: &str) -> bool;

    /// The indicators from `indicators` present in `text`, in order.
    fn matches<'a>(&self, text: &str, indicators: &'a [String]) -> Vec<&'a str> {
        let lowered = text.to_lowercase();
        indicators
            .iter()
            .filter(|i| self.is_match(&lowered, i))
            .map(String::as_str)
            .collect()
    }
}

/// Matches an indicator when most of its longer words occur in the text.
///
/// Words of [`MIN_TERM_LEN`] characters or fewer are ignored, so an indicator
/// made only of short words never matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyTermMatcher;

impl IndicatorMatcher for FuzzyTermMatcher {
    fn is_match(&self, lowered: &str, indicator: &str) -> bool {
        let indicator = indicator.to_lowercase();
        let terms: Vec<&str> = indicator
            .split_whitespace()
            .filter(|t| t.chars().count() > MIN_TERM_LEN)
            .collect();
        if terms.is_empty() {
            return false;
        }
        let found = terms.iter().filter(|t| lowered.contains(*t)).count();
        found as f64 >= terms.len() as f64 * TERM_SHARE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(text: &str, indicator: &str) -> bool {
        FuzzyTermMatcher.is_match(&text.to_lowercase(), indicator)
    }

    #[test]
    fn all_terms_present() {
        assert!(matched(
            "Her methodical investigation paid off.",
            "methodical investigation"
        ));
    }

    #[test]
    fn sixty_percent_is_enough() {
        // 3 of 5 long terms.
        assert!(matched("alpha bravo charlie", "alpha bravo charlie deltas echoes"));
        assert!(!matched("alpha bravo", "alpha bravo charlie deltas echoes"));
    }

    #[test]
    fn short_words_ignored() {
        assert!(!matched("a cat sat on it", "a cat sat"));
        assert!(matched("the hidden cost", "the cost is hidden"));
    }

    #[test]
    fn substring_and_case() {
        assert!(matched("INSTITUTIONAL incentives abound", "incentive"));
        assert!(!matched("nothing here", "incentive"));
    }

    #[test]
    fn matches_keeps_order() {
        let indicators = vec![
            "quiet competence".to_string(),
            "lucky break".to_string(),
            "careful planning".to_string(),
        ];
        let found = FuzzyTermMatcher.matches(
            "Careful planning and quiet competence.",
            &indicators,
        );
        assert_eq!(found, vec!["quiet competence", "careful planning"]);
    }
}
