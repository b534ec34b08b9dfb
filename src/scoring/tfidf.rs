// ============================================================
// Layer 4 — TF-IDF Similarity
// ============================================================
// The lexical feature for the trained-model grading path:
// cosine similarity between TF-IDF vectors of the answer and
// the reference, computed over the two-document corpus formed
// by exactly that pair.
//
// Formula (smooth idf, matching the common library default):
//   tf(t, d)  = raw count of t in d
//   idf(t)    = ln((1 + n) / (1 + df(t))) + 1      with n = 2
//   weight    = tf * idf, then L2-normalised per document
//
// With only two documents, df(t) is 1 or 2:
//   df = 2 (shared term) → idf = 1.0
//   df = 1 (unique term) → idf = ln(3/2) + 1 ≈ 1.405
// Shared terms still dominate the dot product because unique
// terms contribute nothing to it.
//
// Tokenisation: lowercase, split on non-alphanumeric runs.
//
// Reference: Salton & Buckley (1988) Term-weighting approaches

use std::collections::HashMap;

use crate::scoring::semantic::cosine_similarity;

/// TF-IDF cosine similarity between two texts, in [0, 1].
/// Returns 0 when either text has no tokens.
pub fn tfidf_similarity(a: &str, b: &str) -> f32 {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let tf_a = term_counts(&tokens_a);
    let tf_b = term_counts(&tokens_b);

    // Stable vocabulary order so both vectors align index-by-index
    let mut vocab: Vec<&String> = tf_a.keys().chain(tf_b.keys()).collect();
    vocab.sort();
    vocab.dedup();

    let n_docs = 2.0f32;
    let mut vec_a = Vec::with_capacity(vocab.len());
    let mut vec_b = Vec::with_capacity(vocab.len());

    for term in &vocab {
        let count_a = *tf_a.get(*term).unwrap_or(&0) as f32;
        let count_b = *tf_b.get(*term).unwrap_or(&0) as f32;

        let df = (count_a > 0.0) as u32 + (count_b > 0.0) as u32;
        let idf = ((1.0 + n_docs) / (1.0 + df as f32)).ln() + 1.0;

        vec_a.push(count_a * idf);
        vec_b.push(count_b * idf);
    }

    // cosine_similarity normalises internally, so the explicit L2
    // normalisation step cancels out — the ratio is identical.
    cosine_similarity(&vec_a, &vec_b).clamp(0.0, 1.0)
}

/// Lowercase tokens split on non-alphanumeric runs.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Raw term counts per token.
fn term_counts(tokens: &[String]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for t in tokens {
        *counts.entry(t.clone()).or_insert(0) += 1;
    }
    counts
}
