// ============================================================
// Layer 3 — Criterion Domain Type
// ============================================================
// Represents a single rubric item used to grade part of an
// answer. Criteria belong to exactly one assignment and are
// read-only during grading.
//
// Example:
//   name:        "Cell biology terminology"
//   max_points:  10.0
//   description: "Explains the role of the mitochondria in
//                 cellular respiration"
//   keywords:    ["mitochondria", "ATP", "respiration"]
//
// Keywords come from stored records in one of two historical
// serialisations: a JSON array ("[\"a\",\"b\"]") or a plain
// comma-separated string ("a, b"). Both are accepted by the
// parsing adapter below so that by the time a Criterion
// exists, keywords are always an ordered Vec<String>.
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

/// A named, point-weighted rubric item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Criterion {
    /// Human-readable name of the rubric item
    pub name: String,

    /// Maximum points this criterion can contribute.
    /// Must be >= 0 — negative values are clamped on construction.
    pub max_points: f32,

    /// Reference description of the expected answer content.
    /// Used for semantic similarity; may be empty.
    #[serde(default)]
    pub description: String,

    /// Ordered keywords expected in a good answer.
    /// Order is preserved from the stored record.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Criterion {
    /// Create a new Criterion. Negative max_points are clamped to 0
    /// so a malformed record can never produce a negative score.
    pub fn new(
        name:        impl Into<String>,
        max_points:  f32,
        description: impl Into<String>,
        keywords:    Vec<String>,
    ) -> Self {
        Self {
            name:        name.into(),
            max_points:  max_points.max(0.0),
            description: description.into(),
            keywords,
        }
    }
}

/// Parse a stored keyword blob into an ordered keyword list.
///
/// Accepts either serialisation found in the criteria store:
///   1. JSON array:      `["mitochondria", "ATP"]`
///   2. Comma-separated: `mitochondria, ATP`
///
/// Falls back from (1) to (2), and returns an empty Vec for
/// blank input — malformed keyword data is an InputError that
/// is recovered locally, never escalated.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    // Try the JSON array form first
    if let Ok(list) = serde_json::from_str::<Vec<String>>(trimmed) {
        return list
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
    }

    // Fall back to comma-separated form
    trimmed
        .split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}
