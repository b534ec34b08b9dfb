// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Traits are Rust's way of defining shared behaviour —
// similar to interfaces in Java or abstract classes in Python.
//
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - ml::TextEmbedder implements EmbeddingSource
//   - Test stubs also implement EmbeddingSource, so the
//     aggregator is testable without any model artifact
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use anyhow::Result;
use crate::domain::criterion::Criterion;

// ─── EmbeddingSource ──────────────────────────────────────────────────────────
/// Any component that can turn text into a fixed-length vector.
///
/// Implementations:
///   - ml::TextEmbedder → mean-pooled transformer embeddings
///   - test stubs       → canned vectors, or None for the
///                        "no model available" case
pub trait EmbeddingSource {
    /// Embed one text. Returns `None` when no embedding capability
    /// is available; implementations that ARE available must return
    /// a vector of their fixed dimension (a zero vector on internal
    /// failure — embedding degrades, it never fails the request).
    fn embed(&self, text: &str) -> Option<Vec<f32>>;

    /// The embedding dimension, constant for the lifetime of
    /// the implementation instance.
    fn dimension(&self) -> usize;
}

// ─── CriteriaSource ───────────────────────────────────────────────────────────
/// Any component that can supply the grading criteria for an
/// assignment. Criteria are read-only during grading.
///
/// Implementations:
///   - infra::CriteriaStore → JSON file keyed by assignment id
///   - (external) the web backend's database-backed store
pub trait CriteriaSource {
    /// Load all criteria for the given assignment identifier.
    /// An unknown assignment yields an empty Vec, not an error —
    /// grading falls back to the basic heuristic score.
    fn criteria_for(&self, assignment_id: &str) -> Result<Vec<Criterion>>;
}
