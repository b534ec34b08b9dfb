// ============================================================
// Layer 4 — Semantic Similarity Scorer
// ============================================================
// The dense feature: cosine similarity between the mean-pooled
// embedding of the answer and of the reference text (usually a
// criterion description).
//
// Two degradation rules, in line with the "grade something,
// never crash" policy:
//   - either input empty           → 0
//   - no embedder available (None) → 0
//
// Embeddings of unrelated texts can yield NEGATIVE cosine
// values. A negative semantic score would subtract points in
// the aggregator, so the result is clamped to [0, 1] here —
// "less than unrelated" carries no extra information for
// grading purposes.
//
// Reference: Reimers & Gurevych (2019) Sentence-BERT

use crate::domain::traits::EmbeddingSource;

/// Cosine similarity of two vectors, in [-1, 1].
/// Returns 0 for mismatched lengths or zero-norm inputs
/// (the embedder's zero-vector failure fallback lands here).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot:    f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Scores semantic closeness of two texts via an EmbeddingSource.
pub struct SemanticScorer<'a, E: EmbeddingSource> {
    /// None when the deployment has no embedding capability —
    /// resolved once at startup, not probed per call.
    source: Option<&'a E>,
}

impl<'a, E: EmbeddingSource> SemanticScorer<'a, E> {
    /// Create a scorer over an optional embedding source.
    pub fn new(source: Option<&'a E>) -> Self {
        Self { source }
    }

    /// Embedding cosine similarity clamped to [0, 1].
    /// 0 when either input is empty or embedding is unavailable.
    pub fn score(&self, text: &str, reference: &str) -> f32 {
        if text.trim().is_empty() || reference.trim().is_empty() {
            return 0.0;
        }

        let Some(source) = self.source else {
            return 0.0;
        };

        match (source.embed(text), source.embed(reference)) {
            (Some(a), Some(b)) => cosine_similarity(&a, &b).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// Stub that maps known texts to canned vectors.
    struct CannedEmbedder;

    impl EmbeddingSource for CannedEmbedder {
        fn embed(&self, text: &str) -> Option<Vec<f32>> {
            match text {
                "up"      => Some(vec![0.0, 1.0]),
                "down"    => Some(vec![0.0, -1.0]),
                "right"   => Some(vec![1.0, 0.0]),
                "broken"  => Some(vec![0.0, 0.0]), // zero-vector fallback
                _         => Some(vec![1.0, 1.0]),
            }
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    #[test]
    fn test_cosine_identical() {
        assert!((cosine_similarity(&[1.0, 2.0], &[1.0, 2.0]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_and_zero_norm() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_negative_cosine_clamped() {
        let e = CannedEmbedder;
        let s = SemanticScorer::new(Some(&e));
        // cosine("up", "down") is -1; the score must clamp to 0
        assert_eq!(s.score("up", "down"), 0.0);
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        let e = CannedEmbedder;
        let s = SemanticScorer::new(Some(&e));
        assert_eq!(s.score("", "up"), 0.0);
        assert_eq!(s.score("up", "   "), 0.0);
    }

    #[test]
    fn test_no_embedder_scores_zero() {
        let s: SemanticScorer<CannedEmbedder> = SemanticScorer::new(None);
        assert_eq!(s.score("up", "up"), 0.0);
    }

    #[test]
    fn test_zero_vector_fallback_scores_zero() {
        let e = CannedEmbedder;
        let s = SemanticScorer::new(Some(&e));
        assert_eq!(s.score("broken", "up"), 0.0);
    }
}
