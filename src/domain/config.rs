// ============================================================
// Layer 3 — Scoring Configuration
// ============================================================
// Every unexplained heuristic in the scoring pipeline lives
// here as data, not as a hard-coded constant:
//
//   - The 0.7 / 0.3 keyword-vs-semantic split per criterion
//   - The 0.5 partial credit when a criterion has no keywords
//   - The basic-score component weights (used when an
//     assignment has no criteria at all)
//   - The caps that turn raw counts into [0,1] sub-scores
//   - The suggestion thresholds
//
// None of these values are calibrated — they are inherited
// defaults. Keeping them configurable lets deployments tune
// them without a code change.
//
// The basic-score weights must sum to 1.0 so the composite
// stays in [0, 1] before rescaling to the assignment maximum.
//
// Reference: Rust Book §5 (Structs), serde derive docs

use serde::{Deserialize, Serialize};

/// Tunable weights and thresholds for the scoring pipeline.
/// `Default` reproduces the documented heuristics exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight of the keyword score within a criterion score
    pub keyword_weight: f32,

    /// Weight of the semantic score within a criterion score
    pub semantic_weight: f32,

    /// Fraction of max_points granted when a criterion has no
    /// keywords at all (partial-credit default)
    pub empty_keyword_credit: f32,

    /// Basic score: weight of the completeness component
    pub completeness_weight: f32,

    /// Basic score: weight of the sentence-structure component
    pub structure_weight: f32,

    /// Basic score: weight of the academic-language component
    pub quality_weight: f32,

    /// Basic score: weight of the grammar component
    pub grammar_weight: f32,

    /// Word count at which the completeness sub-score caps at 1.0
    pub words_for_full_credit: usize,

    /// Sentence count at which the structure sub-score caps at 1.0
    pub sentences_for_full_credit: usize,

    /// Academic-indicator count at which the quality sub-score
    /// caps at 1.0
    pub indicators_for_full_credit: usize,

    /// Suggestions: warn when the answer has fewer words than this
    pub short_answer_words: usize,

    /// Suggestions: warn when the answer has fewer sentences
    /// than this
    pub low_structure_sentences: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            keyword_weight:             0.7,
            semantic_weight:            0.3,
            empty_keyword_credit:       0.5,
            completeness_weight:        0.3,
            structure_weight:           0.2,
            quality_weight:             0.3,
            grammar_weight:             0.2,
            words_for_full_credit:      100,
            sentences_for_full_credit:  5,
            indicators_for_full_credit: 3,
            short_answer_words:         50,
            low_structure_sentences:    3,
        }
    }
}
