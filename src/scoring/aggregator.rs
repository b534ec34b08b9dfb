// ============================================================
// Layer 4 — Criterion Aggregator
// ============================================================
// Combines per-criterion feature scores into one normalized
// total. This is the main grading path.
//
// Algorithm:
//   1. No criteria → basic_score(): a weighted composite of
//      completeness, sentence structure, academic language,
//      and grammar heuristics (weights sum to 1.0).
//   2. Per criterion:
//        (keyword * kw_weight + semantic * sem_weight) * max_points
//      clamped to max_points. A criterion without a description
//      contributes no semantic score (the scorer returns 0 for
//      an empty reference). A criterion with no usable keywords
//      short-circuits to empty_credit * max_points — flat
//      partial credit, no feature split.
//   3. Sum, normalize by Σ max_points, rescale to
//      assignment_max. Σ max_points == 0 → basic score.
//   4. Clamp the result to [0, assignment_max].
//
// Failure policy: every feature scorer is a total function, so
// a bad criterion can only ever contribute 0 — one rotten
// rubric item never aborts the whole aggregation.
//
// Purity: aggregate() is a pure function of its inputs plus the
// embedder's read-only cached model, so identical inputs always
// produce identical scores.

use crate::domain::config::ScoringConfig;
use crate::domain::criterion::Criterion;
use crate::domain::report::FeatureScores;
use crate::domain::traits::EmbeddingSource;
use crate::scoring::grammar::GrammarScorer;
use crate::scoring::keyword::KeywordScorer;
use crate::scoring::semantic::SemanticScorer;
use crate::scoring::stats::TextStats;

/// Aggregates feature scores over grading criteria.
pub struct Aggregator<'a, E: EmbeddingSource> {
    config:   &'a ScoringConfig,
    keyword:  KeywordScorer,
    grammar:  GrammarScorer,
    semantic: SemanticScorer<'a, E>,
}

impl<'a, E: EmbeddingSource> Aggregator<'a, E> {
    /// Build an aggregator over a config and an optional embedder.
    /// Passing None disables the semantic feature (scores 0).
    pub fn new(config: &'a ScoringConfig, embedder: Option<&'a E>) -> Self {
        Self {
            config,
            keyword:  KeywordScorer::new(config.empty_keyword_credit),
            grammar:  GrammarScorer::new(),
            semantic: SemanticScorer::new(embedder),
        }
    }

    /// Aggregate a normalized answer into a score in
    /// [0, assignment_max].
    pub fn aggregate(
        &self,
        text:           &str,
        criteria:       &[Criterion],
        assignment_max: f32,
    ) -> f32 {
        let assignment_max = assignment_max.max(0.0);

        if criteria.is_empty() {
            return self.basic_score(text, assignment_max);
        }

        let total: f32 = criteria
            .iter()
            .map(|c| self.criterion_score(text, c))
            .sum();

        let max_possible: f32 = criteria.iter().map(|c| c.max_points).sum();
        if max_possible <= 0.0 {
            // All rubric items carry zero weight — fall back to the
            // generic heuristic rather than dividing by zero.
            return self.basic_score(text, assignment_max);
        }

        let normalized = total / max_possible * assignment_max;
        normalized.clamp(0.0, assignment_max)
    }

    /// Score one criterion: extract the ephemeral feature vector,
    /// combine with the configured split, scale by max_points.
    fn criterion_score(&self, text: &str, criterion: &Criterion) -> f32 {
        if text.trim().is_empty() {
            return 0.0;
        }

        // An unscorable rubric item earns its flat partial credit
        // up front; the feature split only applies to scorable ones.
        if !KeywordScorer::has_scorable_keywords(&criterion.keywords) {
            return (self.keyword.empty_credit() * criterion.max_points)
                .clamp(0.0, criterion.max_points);
        }

        let features = self.extract_features(text, criterion);

        let combined = features.keyword * self.config.keyword_weight
            + features.semantic.unwrap_or(0.0) * self.config.semantic_weight;

        (combined * criterion.max_points).clamp(0.0, criterion.max_points)
    }

    /// Build the per-(text, criterion) feature vector. The vector
    /// is consumed immediately — only the derived score survives.
    fn extract_features(&self, text: &str, criterion: &Criterion) -> FeatureScores {
        let keyword = self.keyword.score(text, &criterion.keywords);

        let semantic = if criterion.description.trim().is_empty() {
            None
        } else {
            Some(self.semantic.score(text, &criterion.description))
        };

        let grammar = self.grammar.score(text);

        FeatureScores { keyword, semantic, grammar }
    }

    /// Generic heuristic score for assignments without criteria:
    /// completeness, structure, academic language, and grammar,
    /// each capped at 1.0 and independently weighted.
    pub fn basic_score(&self, text: &str, assignment_max: f32) -> f32 {
        if text.trim().is_empty() {
            return 0.0;
        }

        let cfg   = self.config;
        let stats = TextStats::analyze(text);

        let completeness = (stats.word_count as f32
            / cfg.words_for_full_credit as f32)
            .min(1.0)
            * cfg.completeness_weight;

        let structure = (stats.sentence_count as f32
            / cfg.sentences_for_full_credit as f32)
            .min(1.0)
            * cfg.structure_weight;

        let quality = (stats.indicator_count as f32
            / cfg.indicators_for_full_credit as f32)
            .min(1.0)
            * cfg.quality_weight;

        let grammar = self.grammar.score(text) * cfg.grammar_weight;

        let total = (completeness + structure + quality + grammar) * assignment_max;
        total.clamp(0.0, assignment_max)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// Stub for deployments without embedding capability.
    struct NoEmbedder;

    impl EmbeddingSource for NoEmbedder {
        fn embed(&self, _text: &str) -> Option<Vec<f32>> {
            None
        }

        fn dimension(&self) -> usize {
            0
        }
    }

    fn aggregator(config: &ScoringConfig) -> Aggregator<'_, NoEmbedder> {
        Aggregator::new(config, None)
    }

    #[test]
    fn test_empty_text_no_criteria_is_zero() {
        let cfg = ScoringConfig::default();
        let agg = aggregator(&cfg);
        assert_eq!(agg.aggregate("", &[], 100.0), 0.0);
    }

    #[test]
    fn test_single_keyword_criterion() {
        let cfg = ScoringConfig::default();
        let agg = aggregator(&cfg);
        let criteria = vec![Criterion::new(
            "biology",
            10.0,
            "",
            vec!["mitochondria".to_string()],
        )];
        // keyword = 1.0, no description → no semantic contribution:
        // (1.0 * 0.7) * 10 = 7.0 → normalized: 7/10 * 100 = 70
        let score = agg.aggregate(
            "The mitochondria is the powerhouse of the cell.",
            &criteria,
            100.0,
        );
        assert!((score - 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_keyword_criterion_earns_flat_partial_credit() {
        let cfg = ScoringConfig::default();
        let agg = aggregator(&cfg);
        let criteria = vec![Criterion::new("unscorable", 10.0, "", vec![])];
        // 0.5 * 10 = 5.0 → normalized: 5/10 * 100 = 50, NOT
        // diluted through the 0.7 keyword weight
        let score = agg.aggregate("Any non-empty answer.", &criteria, 100.0);
        assert!((score - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_blank_only_keywords_treated_as_unscorable() {
        let cfg = ScoringConfig::default();
        let agg = aggregator(&cfg);
        let criteria = vec![Criterion::new(
            "blanks",
            10.0,
            "",
            vec!["  ".to_string(), String::new()],
        )];
        let score = agg.aggregate("Any non-empty answer.", &criteria, 100.0);
        assert!((score - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_max_points_falls_back_to_basic() {
        let cfg = ScoringConfig::default();
        let agg = aggregator(&cfg);
        let criteria = vec![Criterion::new("void", 0.0, "", vec![])];
        let text  = "Good answer. It explains the theory because evidence supports it.";
        let score = agg.aggregate(text, &criteria, 100.0);
        let basic = agg.basic_score(text, 100.0);
        assert!((score - basic).abs() < 1e-6);
        assert!(score > 0.0);
    }

    #[test]
    fn test_output_always_bounded() {
        let cfg = ScoringConfig::default();
        let agg = aggregator(&cfg);
        let criteria = vec![
            Criterion::new("a", 5.0, "", vec!["cell".to_string()]),
            Criterion::new("b", 0.0, "", vec![]),
        ];
        for text in ["", "cell", "cell cell cell. The cell divides."] {
            let score = agg.aggregate(text, &criteria, 50.0);
            assert!((0.0..=50.0).contains(&score), "score {score} out of range");
        }
    }

    #[test]
    fn test_monotonic_in_criterion_contribution() {
        let cfg = ScoringConfig::default();
        let agg = aggregator(&cfg);
        // Same rubric; the second text satisfies one more keyword of
        // criterion "a" while criterion "b" stays fixed.
        let criteria = vec![
            Criterion::new("a", 10.0, "", vec!["osmosis".into(), "diffusion".into()]),
            Criterion::new("b", 10.0, "", vec!["membrane".into()]),
        ];
        let lower  = agg.aggregate("Covers osmosis and the membrane.", &criteria, 100.0);
        let higher = agg.aggregate(
            "Covers osmosis, diffusion and the membrane.",
            &criteria,
            100.0,
        );
        assert!(higher >= lower);
    }

    #[test]
    fn test_idempotent() {
        let cfg = ScoringConfig::default();
        let agg = aggregator(&cfg);
        let criteria = vec![Criterion::new("a", 10.0, "", vec!["cell".into()])];
        let text = "The cell divides. Therefore it grows.";
        assert_eq!(
            agg.aggregate(text, &criteria, 100.0),
            agg.aggregate(text, &criteria, 100.0),
        );
    }

    #[test]
    fn test_long_structured_answer_scores_high() {
        let cfg = ScoringConfig::default();
        let agg = aggregator(&cfg);

        // ~120 words, 6 sentences, 4 academic indicators.
        let sentence = "The experiment shows a clear trend across every trial \
                        that we measured in the laboratory over several weeks";
        let text = format!(
            "{s} because the data is consistent. \
             {s} therefore the hypothesis holds. \
             {s} however some noise remains. \
             {s} for example trial nine drifted. \
             {s}. \
             The final reading confirms the pattern seen earlier in every case."
        , s = sentence);

        let score = agg.basic_score(&text, 100.0);
        // completeness and structure cap at full credit; quality caps
        // via 4 indicators; grammar varies with case heuristics.
        assert!((60.0..=100.0).contains(&score), "score {score} out of range");
    }
}
