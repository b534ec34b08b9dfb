// ============================================================
// Layer 4 — Keyword Scorer
// ============================================================
// The lexical feature: what fraction of a criterion's keywords
// appear in the answer?
//
// Matching is case-insensitive substring containment — "ATP"
// matches inside "ATP-synthase". Deliberately simple: rubric
// keywords are short technical terms, and stemming or fuzzy
// matching would reward near-misses the rubric author did not
// intend.
//
// The empty-keyword default:
//   A criterion with no keywords cannot be scored lexically, so
//   it receives a configurable partial credit (default 0.5)
//   rather than 0 — the rubric item exists, the answer just
//   cannot be checked against it automatically. The default is
//   an inherited heuristic, not a calibrated value.

/// Scores a text against an ordered keyword list.
pub struct KeywordScorer {
    /// Credit returned for an empty keyword list, in [0, 1]
    empty_credit: f32,
}

impl KeywordScorer {
    /// Create a scorer with the given empty-list credit.
    /// The credit is clamped to [0, 1] on construction.
    pub fn new(empty_credit: f32) -> Self {
        Self { empty_credit: empty_credit.clamp(0.0, 1.0) }
    }

    /// The configured empty-list credit. The aggregator applies
    /// this directly to max_points when a criterion has no
    /// usable keywords, bypassing the feature split.
    pub fn empty_credit(&self) -> f32 {
        self.empty_credit
    }

    /// True when the list has at least one non-blank keyword.
    pub fn has_scorable_keywords(keywords: &[String]) -> bool {
        keywords.iter().any(|k| !k.trim().is_empty())
    }

    /// Fraction of keywords found in the text, in [0, 1].
    /// Keywords are trimmed and matched case-insensitively;
    /// blank keywords are skipped. Pure and deterministic.
    pub fn score(&self, text: &str, keywords: &[String]) -> f32 {
        // Skip blank entries up front so they don't dilute the ratio
        let usable: Vec<&str> = keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect();

        if usable.is_empty() {
            return self.empty_credit;
        }

        let text_lower = text.to_lowercase();
        let found = usable
            .iter()
            .filter(|k| text_lower.contains(&k.to_lowercase()))
            .count();

        found as f32 / usable.len() as f32
    }
}

impl Default for KeywordScorer {
    fn default() -> Self {
        Self::new(0.5)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn kws(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_all_found() {
        let s = KeywordScorer::default();
        let score = s.score("The mitochondria produces ATP", &kws(&["mitochondria", "ATP"]));
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_partial_found() {
        let s = KeywordScorer::default();
        let score = s.score("Only mitochondria here", &kws(&["mitochondria", "ATP"]));
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_case_insensitive() {
        let s = KeywordScorer::default();
        assert_eq!(s.score("MITOCHONDRIA", &kws(&["mitochondria"])), 1.0);
    }

    #[test]
    fn test_empty_list_default_credit() {
        let s = KeywordScorer::default();
        assert_eq!(s.score("any text", &[]), 0.5);
        // Deterministic: same inputs, same answer
        assert_eq!(s.score("any text", &[]), 0.5);
    }

    #[test]
    fn test_blank_keywords_skipped() {
        let s = KeywordScorer::default();
        // Only the one real keyword counts; blanks fall back to empty credit
        assert_eq!(s.score("has cell wall", &kws(&[" ", "cell", ""])), 1.0);
        assert_eq!(s.score("anything", &kws(&["", "  "])), 0.5);
    }

    #[test]
    fn test_scorable_keyword_detection() {
        assert!(KeywordScorer::has_scorable_keywords(&kws(&["cell"])));
        assert!(KeywordScorer::has_scorable_keywords(&kws(&["", "cell"])));
        assert!(!KeywordScorer::has_scorable_keywords(&kws(&["", "  "])));
        assert!(!KeywordScorer::has_scorable_keywords(&[]));
    }

    #[test]
    fn test_bounds() {
        let s = KeywordScorer::default();
        let score = s.score("", &kws(&["a", "b", "c"]));
        assert!((0.0..=1.0).contains(&score));
        assert_eq!(score, 0.0);
    }
}
