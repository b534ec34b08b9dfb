// ============================================================
// Layer 4 — Suggestion Generator
// ============================================================
// Produces human-readable review hints that accompany an
// automated score. The grader sees these next to the answer
// and decides whether a manual review is needed.
//
// Pure rule list with a FIXED check order (tests depend on the
// ordering being reproducible):
//   1. short-text warning      (below the word threshold)
//   2. low-structure warning   (below the sentence threshold)
//   3. OCR-artifact warning    (garbage markers present)
//   4. positive callout        (academic vocabulary found)
//
// No rule ever suppresses another; the output is simply every
// rule that fired, in order.

use crate::domain::config::ScoringConfig;
use crate::scoring::stats::TextStats;

/// Generates review hints from text statistics.
pub struct SuggestionGenerator<'a> {
    config: &'a ScoringConfig,
}

impl<'a> SuggestionGenerator<'a> {
    /// Create a generator over the configured thresholds.
    pub fn new(config: &'a ScoringConfig) -> Self {
        Self { config }
    }

    /// Apply the fixed rule list. Pure function of the inputs.
    /// Word and sentence counts are passed in (rather than
    /// recounted) so the report and the suggestions can never
    /// disagree about them.
    pub fn suggest(
        &self,
        text:           &str,
        word_count:     usize,
        sentence_count: usize,
    ) -> Vec<String> {
        let mut suggestions = Vec::new();

        if text.trim().is_empty() {
            suggestions.push("No text found in submission".to_string());
            return suggestions;
        }

        let stats = TextStats::analyze(text);

        // Rule 1: short text
        if word_count < self.config.short_answer_words {
            suggestions.push(
                "Submission appears to be quite short. Consider checking if all \
                 content was captured."
                    .to_string(),
            );
        }

        // Rule 2: low structure
        if sentence_count < self.config.low_structure_sentences {
            suggestions.push(
                "Limited sentence structure detected. May need manual review."
                    .to_string(),
            );
        }

        // Rule 3: OCR artifacts
        if stats.has_garbage {
            suggestions.push(
                "OCR artifacts detected. Manual review recommended for accuracy."
                    .to_string(),
            );
        }

        // Rule 4: positive callout
        if !stats.vocabulary_found.is_empty() {
            suggestions.push(format!(
                "Good academic language detected: {}",
                stats.vocabulary_found.join(", "),
            ));
        }

        suggestions
    }
}
