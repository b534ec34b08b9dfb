// ============================================================
// Layer 2 — Grade Use Case
// ============================================================
// The main grading workflow:
//   1. Normalize the raw OCR text
//   2. Aggregate feature scores over the assignment's criteria
//      (or the basic heuristic composite when there are none)
//   3. Generate review suggestions for the human grader
//   4. Package everything into a GradeReport
//
// Design principle carried through every step: grade
// something, even if low-confidence, rather than fail the
// request. This method returns a GradeReport for ANY input —
// empty text, broken criteria, missing models included.
//
// The caller (the web collaborator) persists the report
// against its submission record; nothing is written here.

use std::sync::Arc;

use crate::domain::config::ScoringConfig;
use crate::domain::criterion::Criterion;
use crate::domain::report::GradeReport;
use crate::infra::registry::ModelRegistry;
use crate::ml::embedder::TextEmbedder;
use crate::scoring::aggregator::Aggregator;
use crate::scoring::normalizer::TextNormalizer;
use crate::scoring::stats::TextStats;
use crate::scoring::suggestions::SuggestionGenerator;

pub struct GradeUseCase {
    registry: Arc<ModelRegistry>,
    config:   ScoringConfig,
}

impl GradeUseCase {
    pub fn new(registry: Arc<ModelRegistry>, config: ScoringConfig) -> Self {
        Self { registry, config }
    }

    /// Grade one submission. Total: every input produces a
    /// report, bounded to [0, assignment_max].
    pub fn execute(
        &self,
        raw_text:       &str,
        criteria:       &[Criterion],
        assignment_max: f32,
    ) -> GradeReport {
        let normalizer = TextNormalizer::new();
        let text = normalizer.normalize(raw_text);

        // Resolve the embedding capability once for this request;
        // the Arc keeps the model alive across the aggregation.
        // Only the per-criterion semantic feature needs it, so a
        // criteria-less request leaves the registry cold.
        let embedder: Option<Arc<TextEmbedder>> = if criteria.is_empty() {
            None
        } else {
            self.registry.embedder()
        };

        let aggregator = Aggregator::new(&self.config, embedder.as_deref());
        let score = aggregator.aggregate(&text, criteria, assignment_max);

        let stats = TextStats::analyze(&text);
        let suggestions = SuggestionGenerator::new(&self.config)
            .suggest(&text, stats.word_count, stats.sentence_count);

        let confidence = if assignment_max > 0.0 {
            score / assignment_max
        } else {
            0.0
        };

        tracing::info!(
            score,
            assignment_max,
            words = stats.word_count,
            "Graded submission ({} criteria)",
            criteria.len(),
        );

        GradeReport {
            score,
            max_score: assignment_max,
            word_count: stats.word_count,
            sentence_count: stats.sentence_count,
            confidence,
            suggestions,
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// A registry over a directory with no artifacts: the whole
    /// pipeline must still grade, just without semantic scores.
    fn use_case() -> GradeUseCase {
        let registry = Arc::new(ModelRegistry::new("/nonexistent/models"));
        GradeUseCase::new(registry, ScoringConfig::default())
    }

    #[test]
    fn test_empty_submission() {
        let uc = use_case();
        let report = uc.execute("", &[], 100.0);
        assert_eq!(report.score, 0.0);
        assert_eq!(report.confidence, 0.0);
        assert_eq!(report.suggestions, vec!["No text found in submission".to_string()]);
    }

    #[test]
    fn test_keyword_criterion_without_models() {
        let uc = use_case();
        let criteria = vec![Criterion::new(
            "biology", 10.0, "", vec!["mitochondria".to_string()],
        )];
        let report = uc.execute(
            "The mitochondria is the powerhouse of the cell.",
            &criteria,
            100.0,
        );
        // keyword 1.0 * 0.7 weight, no semantic available → 70
        assert!((report.score - 70.0).abs() < 1e-4);
        assert!((report.confidence - 0.7).abs() < 1e-4);
    }

    #[test]
    fn test_no_criteria_leaves_models_cold() {
        let registry = Arc::new(ModelRegistry::new("/nonexistent/models"));
        let uc = GradeUseCase::new(Arc::clone(&registry), ScoringConfig::default());
        uc.execute("Some answer text here.", &[], 100.0);
        // The basic heuristic path never resolves the embedder
        assert!(!registry.embedder_resolved());

        // A criteria-bearing request does resolve it
        let criteria = vec![Criterion::new("a", 10.0, "", vec!["cell".to_string()])];
        uc.execute("The cell divides.", &criteria, 100.0);
        assert!(registry.embedder_resolved());
    }

    #[test]
    fn test_ocr_artifacts_surface_in_suggestions() {
        let uc = use_case();
        let report = uc.execute("Short answer with ??? garbage.", &[], 100.0);
        assert!(report
            .suggestions
            .iter()
            .any(|s| s.contains("OCR artifacts")));
    }

    #[test]
    fn test_normalization_feeds_scoring() {
        let uc = use_case();
        let criteria = vec![Criterion::new(
            "terms", 10.0, "", vec!["osmosis".to_string()],
        )];
        // "o5mosis" is fixed by the confusion rule before matching
        let report = uc.execute("Water moves by o5mosis across.", &criteria, 100.0);
        assert!(report.score > 0.0);
    }

    #[test]
    fn test_zero_max_score() {
        let uc = use_case();
        let report = uc.execute("Some answer text here.", &[], 0.0);
        assert_eq!(report.score, 0.0);
        assert_eq!(report.confidence, 0.0);
    }
}
