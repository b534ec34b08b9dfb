// ============================================================
// Layer 4 — Scoring Pipeline
// ============================================================
// This layer turns raw OCR text into a bounded, explainable
// score. The pipeline flows in this order:
//
//   raw OCR text
//       │
//       ▼
//   TextNormalizer     → whitespace, artifact, confusion fixes
//       │
//       ▼
//   feature extractors → KeywordScorer    (lexical containment)
//       │                GrammarScorer    (sentence heuristics)
//       │                SemanticScorer   (embedding cosine)
//       ▼
//   Aggregator         → criterion-weighted total in
//       │                [0, assignment_max]
//       ▼
//   SuggestionGenerator → review hints for the human grader
//
// The auxiliary prediction path additionally uses:
//   TfidfScorer        → TF-IDF cosine similarity feature
//
// Each module is responsible for exactly one step.
// Every function here is total: bad input downgrades the
// score, it never aborts the request.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Cleans raw extracted text before any scoring
pub mod normalizer;

/// Word/sentence/indicator statistics shared by several steps
pub mod stats;

/// Case-insensitive keyword containment scoring
pub mod keyword;

/// Sentence-level grammar heuristics
pub mod grammar;

/// Embedding cosine similarity scoring
pub mod semantic;

/// TF-IDF cosine similarity between two texts
pub mod tfidf;

/// Criterion-weighted score aggregation
pub mod aggregator;

/// Human-readable review hints
pub mod suggestions;
