// ============================================================
// Layer 3 — Grading Output Types
// ============================================================
// The value types produced by the two grading paths:
//
//   GradeReport      — criterion-weighted aggregation result
//                      plus review suggestions (main path)
//   PredictionReport — trained-model grade label plus the
//                      3-feature vector it consumed (aux path)
//   FeatureScores    — ephemeral per-(text, criterion) feature
//                      vector, consumed by the aggregator and
//                      never persisted directly
//   GradeLabel       — the predictor output, with an explicit
//                      sentinel for the model-unavailable case
//
// Reference: Rust Book §5 (Structs), §6 (Enums)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-(text, criterion) extracted feature scores.
/// All values are in [0, 1]; semantic is None when no embedding
/// model is available or the criterion has no description.
#[derive(Debug, Clone, Copy)]
pub struct FeatureScores {
    /// Fraction of criterion keywords found in the text
    pub keyword: f32,

    /// Embedding cosine similarity to the criterion description
    pub semantic: Option<f32>,

    /// Sentence-level grammar heuristic score
    pub grammar: f32,
}

/// The result of grading one submission against an assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    /// Final score, always within [0, max_score]
    pub score: f32,

    /// The assignment's maximum score
    pub max_score: f32,

    /// Word count of the normalized answer text
    pub word_count: usize,

    /// Sentence count of the normalized answer text
    pub sentence_count: usize,

    /// score / max_score, or 0 when max_score is 0.
    /// A cheap proxy for how confident the reviewer can be.
    pub confidence: f32,

    /// Human-readable review hints, in fixed rule order
    pub suggestions: Vec<String>,
}

/// Output of the trained-model grading path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionReport {
    /// The predicted grade label (or the unavailable sentinel)
    pub label: GradeLabel,

    /// TF-IDF cosine similarity between answer and reference
    pub tfidf_similarity: f32,

    /// Full-text embedding cosine similarity
    pub full_similarity: f32,

    /// Mean sentence-aligned embedding similarity
    pub structure_similarity: f32,
}

/// A discrete grade produced by the trained classifier.
///
/// `Unavailable` is the sentinel returned whenever the model
/// artifact failed to load — prediction degrades, it never fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeLabel {
    /// A label from the classifier's configured label set, e.g. "B"
    Label(String),

    /// The model artifact is not loaded; no prediction was made
    Unavailable,
}

impl fmt::Display for GradeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeLabel::Label(s)    => write!(f, "{s}"),
            GradeLabel::Unavailable => write!(f, "model unavailable"),
        }
    }
}
