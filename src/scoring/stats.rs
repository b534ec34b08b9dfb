// ============================================================
// Layer 4 — Text Statistics
// ============================================================
// Cheap counts over the normalized answer text, shared by the
// basic-score fallback in the aggregator and by the suggestion
// generator. Computed once per grading request.
//
// What is counted:
//   - words:      whitespace-separated tokens
//   - sentences:  non-empty units between sentence terminators
//   - academic indicators: connective phrases that correlate
//     with structured argument ("therefore", "for example", ...)
//   - academic vocabulary: nouns that correlate with analytical
//     writing ("analysis", "evidence", ...) — reported back to
//     the grader as a positive callout
//   - garbage markers: sequences that OCR emits when it cannot
//     read a region (replacement chars, ??? runs)
//
// These are correlates, not measurements — they only ever feed
// heuristic sub-scores and warnings, never a hard reject.

/// Connective phrases suggesting structured academic argument.
/// Matched case-insensitively as substrings.
pub const ACADEMIC_INDICATORS: [&str; 9] = [
    "because",
    "therefore",
    "however",
    "furthermore",
    "moreover",
    "in conclusion",
    "for example",
    "such as",
    "according to",
];

/// Analytical vocabulary reported as a positive callout.
pub const ACADEMIC_VOCABULARY: [&str; 5] =
    ["analysis", "conclusion", "evidence", "argument", "theory"];

/// Sequences that indicate unreadable OCR regions.
pub const GARBAGE_MARKERS: [&str; 3] = ["\u{FFFD}", "???", "###"];

/// Split text into sentence-like units on sentence terminators.
/// Units are trimmed; empty units are dropped. This is shared
/// by the grammar scorer and the structure-similarity feature.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Statistics computed once over a normalized answer.
#[derive(Debug, Clone)]
pub struct TextStats {
    /// Whitespace-separated token count
    pub word_count: usize,

    /// Non-empty sentence-unit count
    pub sentence_count: usize,

    /// How many of the ACADEMIC_INDICATORS phrases appear
    pub indicator_count: usize,

    /// Which ACADEMIC_VOCABULARY words appear, in list order
    pub vocabulary_found: Vec<&'static str>,

    /// True when any GARBAGE_MARKERS sequence appears
    pub has_garbage: bool,
}

impl TextStats {
    /// Compute all statistics in one pass over a lowercased copy.
    pub fn analyze(text: &str) -> Self {
        let lower = text.to_lowercase();

        let word_count     = text.split_whitespace().count();
        let sentence_count = split_sentences(text).len();

        let indicator_count = ACADEMIC_INDICATORS
            .iter()
            .filter(|ind| lower.contains(*ind))
            .count();

        let vocabulary_found: Vec<&'static str> = ACADEMIC_VOCABULARY
            .iter()
            .filter(|w| lower.contains(*w))
            .copied()
            .collect();

        let has_garbage = GARBAGE_MARKERS.iter().any(|m| text.contains(m));

        Self {
            word_count,
            sentence_count,
            indicator_count,
            vocabulary_found,
            has_garbage,
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let s = TextStats::analyze("This works because of gravity. Therefore it falls.");
        assert_eq!(s.word_count, 8);
        assert_eq!(s.sentence_count, 2);
        assert_eq!(s.indicator_count, 2); // "because", "therefore"
    }

    #[test]
    fn test_empty_text() {
        let s = TextStats::analyze("");
        assert_eq!(s.word_count, 0);
        assert_eq!(s.sentence_count, 0);
        assert_eq!(s.indicator_count, 0);
        assert!(s.vocabulary_found.is_empty());
        assert!(!s.has_garbage);
    }

    #[test]
    fn test_vocabulary_in_list_order() {
        let s = TextStats::analyze("The theory rests on evidence from the analysis.");
        // Order follows ACADEMIC_VOCABULARY, not appearance order
        assert_eq!(s.vocabulary_found, vec!["analysis", "evidence", "theory"]);
    }

    #[test]
    fn test_garbage_detection() {
        assert!(TextStats::analyze("start ??? end").has_garbage);
        assert!(TextStats::analyze("bad \u{FFFD} scan").has_garbage);
        assert!(!TextStats::analyze("clean text?").has_garbage);
    }

    #[test]
    fn test_split_sentences_drops_empty_units() {
        assert_eq!(split_sentences("One.. Two!  ?"), vec!["One", "Two"]);
        assert!(split_sentences("").is_empty());
    }
}
