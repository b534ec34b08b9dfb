// ============================================================
// Layer 4 — Grammar Heuristic Scorer
// ============================================================
// An approximation, not a grammar parser. Two cheap checks per
// sentence-like unit:
//
//   (a) the unit does not start with an uppercase letter
//   (b) the unit contains an immediately repeated word,
//       case-insensitive ("the the") — counted at most once
//       per unit, since OCR stutter tends to cluster
//
// Score = max(0, 1 - issues / units).
//
// Edge cases:
//   - zero evaluable units → 0 (never divides by zero)
//   - input is never rejected, only downgraded
//
// OCR text fails (a) constantly because case detection on
// handwriting is unreliable; that is fine — this feature only
// nudges the basic-score composite, it carries 20% weight.

use crate::scoring::stats::split_sentences;

/// Scores sentence-level grammar hygiene in [0, 1].
pub struct GrammarScorer;

impl GrammarScorer {
    /// Create a new GrammarScorer instance
    pub fn new() -> Self {
        Self
    }

    /// Heuristic grammar score in [0, 1]; 0 for empty input.
    pub fn score(&self, text: &str) -> f32 {
        let units = split_sentences(text);
        if units.is_empty() {
            return 0.0;
        }

        let mut issues = 0usize;

        for unit in &units {
            // Check (a): first character should be uppercase.
            // A leading digit or symbol also counts as an issue —
            // same treatment as a lowercase letter.
            if let Some(first) = unit.chars().next() {
                if !first.is_uppercase() {
                    issues += 1;
                }
            }

            // Check (b): immediately repeated identical word.
            // At most one issue per unit regardless of repeats.
            let words: Vec<&str> = unit.split_whitespace().collect();
            for pair in words.windows(2) {
                if pair[0].eq_ignore_ascii_case(pair[1]) {
                    issues += 1;
                    break;
                }
            }
        }

        (1.0 - issues as f32 / units.len() as f32).max(0.0)
    }
}

impl Default for GrammarScorer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_zero() {
        let g = GrammarScorer::new();
        assert_eq!(g.score(""), 0.0);
        assert_eq!(g.score("   "), 0.0);
        assert_eq!(g.score("..!?"), 0.0);
    }

    #[test]
    fn test_clean_text_is_one() {
        let g = GrammarScorer::new();
        assert_eq!(g.score("The cell divides. It grows again."), 1.0);
    }

    #[test]
    fn test_lowercase_start_penalised() {
        let g = GrammarScorer::new();
        // one issue over two units
        let score = g.score("the cell divides. It grows.");
        assert!((score - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_repeated_word_penalised() {
        let g = GrammarScorer::new();
        let score = g.score("The the cell divides.");
        // Starts uppercase (ok) but has "The the" → 1 issue / 1 unit
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_repeated_word_case_insensitive_counts_once() {
        let g = GrammarScorer::new();
        // "The the" and "is is" in one unit → still only 1 issue
        let score = g.score("The the cell is is here. It works.");
        assert!((score - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_bounds_never_negative() {
        let g = GrammarScorer::new();
        // every unit has both issue types, ratio could exceed 1 without max(0, ..)
        let score = g.score("the the end. a a b. x x y.");
        assert!((0.0..=1.0).contains(&score));
        assert_eq!(score, 0.0);
    }
}
