// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// The auxiliary, model-driven grading path. Builds the
// 3-feature similarity vector between a student answer and the
// reference answer, then asks the trained classifier for a
// discrete grade label:
//
//   feature 1: TF-IDF cosine similarity   (lexical overlap)
//   feature 2: full-text embedding cosine (overall meaning)
//   feature 3: structure similarity       (sentence-by-sentence
//              alignment — did the answer cover the reference's
//              parts, in roughly the same shape?)
//
// Structure similarity: embed every sentence of the reference
// and of the answer in one batched forward pass, pair them by
// index, score each pair by
// cosine (a reference sentence with no counterpart scores 0),
// and take the mean. Crude but cheap; order changes and
// missing parts both lower the feature monotonically.
//
// Degradation: with no embedder, features 2 and 3 are 0 and
// the classifier still runs on the lexical feature alone; with
// no classifier artifact, the report carries the sentinel
// label. Either way the caller gets a PredictionReport.

use std::sync::Arc;

use crate::domain::report::PredictionReport;
use crate::infra::registry::ModelRegistry;
use crate::scoring::normalizer::TextNormalizer;
use crate::scoring::semantic::cosine_similarity;
use crate::scoring::stats::split_sentences;
use crate::scoring::tfidf::tfidf_similarity;

pub struct PredictUseCase {
    registry: Arc<ModelRegistry>,
}

impl PredictUseCase {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }

    /// Predict a grade label for an answer against a reference.
    pub fn execute(&self, raw_answer: &str, raw_reference: &str) -> PredictionReport {
        let normalizer = TextNormalizer::new();
        let answer    = normalizer.normalize(raw_answer);
        let reference = normalizer.normalize(raw_reference);

        let tfidf = tfidf_similarity(&answer, &reference);

        let (full, structure) = match self.registry.embedder() {
            Some(embedder) => {
                let full = cosine_similarity(
                    &embedder.embed(&answer),
                    &embedder.embed(&reference),
                ).clamp(0.0, 1.0);

                let structure = structure_similarity(&answer, &reference, |batch| {
                    embedder.embed_batch(batch)
                });

                (full, structure)
            }
            None => (0.0, 0.0),
        };

        let label = self.registry.predictor().predict(tfidf, full, structure);

        tracing::info!(
            tfidf, full, structure,
            "Predicted grade label: {label}",
        );

        PredictionReport {
            label,
            tfidf_similarity:     tfidf,
            full_similarity:      full,
            structure_similarity: structure,
        }
    }
}

/// Mean sentence-aligned embedding similarity in [0, 1].
/// Every sentence of both texts goes through ONE batched
/// embedding call — one padded forward pass instead of a pass
/// per sentence. Generic over the batch function so it is
/// testable with canned vectors.
fn structure_similarity<F>(answer: &str, reference: &str, embed_batch: F) -> f32
where
    F: Fn(&[&str]) -> Vec<Vec<f32>>,
{
    let ref_sentences = split_sentences(reference);
    if ref_sentences.is_empty() {
        return 0.0;
    }
    let ans_sentences = split_sentences(answer);

    let mut batch: Vec<&str> =
        Vec::with_capacity(ans_sentences.len() + ref_sentences.len());
    batch.extend(&ans_sentences);
    batch.extend(&ref_sentences);

    let embeddings = embed_batch(&batch);
    if embeddings.len() != batch.len() {
        // A source that cannot honour the batch contract scores 0
        return 0.0;
    }
    let (ans_vecs, ref_vecs) = embeddings.split_at(ans_sentences.len());

    let total: f32 = ref_vecs
        .iter()
        .enumerate()
        .map(|(i, ref_vec)| match ans_vecs.get(i) {
            // No counterpart sentence → this component scores 0
            None => 0.0,
            Some(ans_vec) => cosine_similarity(ans_vec, ref_vec).clamp(0.0, 1.0),
        })
        .sum();

    total / ref_vecs.len() as f32
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::GradeLabel;

    /// Canned batch embedding: one axis per known sentence.
    fn canned(texts: &[&str]) -> Vec<Vec<f32>> {
        texts
            .iter()
            .map(|text| match *text {
                "First part"  => vec![1.0, 0.0, 0.0],
                "Second part" => vec![0.0, 1.0, 0.0],
                _             => vec![0.0, 0.0, 1.0],
            })
            .collect()
    }

    #[test]
    fn test_structure_identical() {
        let s = structure_similarity(
            "First part. Second part.",
            "First part. Second part.",
            canned,
        );
        assert!((s - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_structure_missing_sentence() {
        let s = structure_similarity("First part.", "First part. Second part.", canned);
        assert!((s - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_structure_empty_reference() {
        assert_eq!(structure_similarity("Anything.", "", canned), 0.0);
    }

    #[test]
    fn test_structure_misordered_scores_lower() {
        let aligned = structure_similarity(
            "First part. Second part.",
            "First part. Second part.",
            canned,
        );
        let swapped = structure_similarity(
            "Second part. First part.",
            "First part. Second part.",
            canned,
        );
        assert!(swapped < aligned);
    }

    #[test]
    fn test_all_sentences_embedded_in_one_batch() {
        use std::cell::Cell;
        let calls = Cell::new(0usize);
        let counted = |texts: &[&str]| {
            calls.set(calls.get() + 1);
            canned(texts)
        };
        let s = structure_similarity(
            "First part. Second part.",
            "First part. Second part.",
            counted,
        );
        assert!((s - 1.0).abs() < 1e-6);
        // Four sentences, one embedding call
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_execute_without_any_artifacts() {
        let registry = Arc::new(ModelRegistry::new("/nonexistent/models"));
        let uc = PredictUseCase::new(registry);
        let report = uc.execute("the cell divides", "the cell divides");
        // Lexical feature still works; dense features degrade to 0
        assert!((report.tfidf_similarity - 1.0).abs() < 1e-5);
        assert_eq!(report.full_similarity, 0.0);
        assert_eq!(report.structure_similarity, 0.0);
        assert_eq!(report.label, GradeLabel::Unavailable);
    }
}
