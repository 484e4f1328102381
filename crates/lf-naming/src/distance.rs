/// Case-insensitive Levenshtein distance with unit costs.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(&a.to_lowercase(), &b.to_lowercase())
}
