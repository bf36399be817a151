//! Sentence-level highlighting of query terms
//!
//! Splits on the literal `". "` rather than doing real sentence-boundary
//! detection. Abbreviations, decimal numbers, and a trailing period with no
//! following space are all mishandled on purpose; the split heuristic is
//! the observable contract and changing it needs sign-off.

/// Extract up to `max` sentence-like segments containing any query term
///
/// Matching is substring-based on the lowercased segment, not word-boundary
/// based, so a term that is a prefix of a longer word still matches.
/// Segments are returned trimmed, in original order. No terms, or no
/// matching segment, yields an empty vector.
pub fn highlight(content: &str, terms: &[String], max: usize) -> Vec<String> {
    if terms.is_empty() {
        return Vec::new();
    }

    content
        .split(". ")
        .map(str::trim)
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            terms.iter().any(|term| lower.contains(term.as_str()))
        })
        .take(max)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_matches_in_order() {
        let content = "Alpha leads. Beta follows. Gamma ends.";
        let result = highlight(content, &terms(&["beta", "gamma"]), 2);
        assert_eq!(result, vec!["Beta follows", "Gamma ends."]);
    }

    #[test]
    fn test_caps_at_max() {
        let content = "One alpha. Two alpha. Three alpha. Four alpha.";
        let result = highlight(content, &terms(&["alpha"]), 2);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0], "One alpha");
    }

    #[test]
    fn test_no_terms_yields_empty() {
        assert!(highlight("Something here.", &[], 2).is_empty());
    }

    #[test]
    fn test_no_match_yields_empty() {
        let result = highlight("Alpha beta.", &terms(&["gamma"]), 2);
        assert!(result.is_empty());
    }

    #[test]
    fn test_substring_match() {
        // "weav" matches inside "weaving"
        let result = highlight("Memory weaving blends state.", &terms(&["weav"]), 2);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_case_insensitive() {
        let result = highlight("MEMORY weaving wins.", &terms(&["memory"]), 2);
        assert_eq!(result, vec!["MEMORY weaving wins."]);
    }

    #[test]
    fn test_split_requires_space_after_period() {
        // "v2.protocol" contains a period with no following space, so it
        // stays a single segment
        let result = highlight("Use v2.protocol here", &terms(&["protocol"]), 2);
        assert_eq!(result, vec!["Use v2.protocol here"]);
    }

    #[test]
    fn test_segments_are_trimmed() {
        let result = highlight("alpha.  padded beta here", &terms(&["beta"]), 2);
        assert_eq!(result, vec!["padded beta here"]);
    }
}
